pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{SignupRequest, User, UserRole};
pub use router::user_routes;
