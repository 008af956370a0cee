pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Payment, PaymentRequest};
pub use router::payment_routes;
