pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CreateHealthMetricRequest, HealthMetric, UpdateHealthMetricRequest};
pub use router::health_metric_routes;
