use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn health_record_routes(state: Arc<AppConfig>) -> Router {
    // GET takes a doctor's user id, PATCH a record id; they share the one
    // path segment the API exposes.
    Router::new()
        .route(
            "/{id}",
            get(handlers::list_doctor_records).patch(handlers::update_record),
        )
        .with_state(state)
}
