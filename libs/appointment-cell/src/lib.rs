pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, AppointmentStatus, BookAppointmentRequest, RescheduleAppointmentRequest};
pub use router::appointment_routes;
