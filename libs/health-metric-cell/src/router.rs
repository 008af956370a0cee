use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn health_metric_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{user_id}/healthMetrics",
            get(handlers::list_metrics).post(handlers::create_metric),
        )
        .route(
            "/{user_id}/healthMetrics/{metric_id}",
            patch(handlers::update_metric),
        )
        .with_state(state)
}
