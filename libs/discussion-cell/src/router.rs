use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn discussion_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::create_discussion).get(handlers::list_discussions),
        )
        .route("/{discussion_id}", get(handlers::get_discussion))
        .route(
            "/{discussion_id}/messages",
            post(handlers::post_discussion_message),
        )
        .with_state(state)
}
