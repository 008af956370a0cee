pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{HealthRecord, RecordData, UpdateRecordRequest};
pub use router::health_record_routes;
