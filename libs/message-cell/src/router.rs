use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn message_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{user_id}/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .with_state(state)
}
