use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use discussion_cell::router::discussion_routes;
use health_metric_cell::router::health_metric_routes;
use health_record_cell::router::health_record_routes;
use message_cell::router::message_routes;
use payment_cell::router::payment_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    // Signup, health metrics and direct messages all hang off /api/users.
    let user_scoped = Router::new()
        .merge(user_routes(state.clone()))
        .merge(health_metric_routes(state.clone()))
        .merge(message_routes(state.clone()));

    Router::new()
        .route("/", get(|| async { "CareSync API is running!" }))
        .nest("/api/users", user_scoped)
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest(
            "/api/electronicHealthRecords",
            health_record_routes(state.clone()),
        )
        .nest("/api/groupDiscussions", discussion_routes(state.clone()))
        .nest("/api/payments", payment_routes(state))
}
