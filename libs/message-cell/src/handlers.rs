use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::SendMessageRequest;
use crate::services::messaging::MessagingService;

#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = ids::parse_path_id(&user_id, "user ID")?;

    let service = MessagingService::new(&state);
    let messages = service.list_for_user(user_id).await?;

    let payload: Vec<Value> = messages.iter().map(|message| message.api_payload()).collect();

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Messages fetched successfully!",
            Value::Array(payload),
        )),
    ))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let sender_id = ids::parse_path_id(&user_id, "user ID")?;

    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let content = ids::non_empty_str(&request.content).ok_or_else(missing)?;
    let receiver_id = ids::as_id(&request.receiver_id).ok_or_else(missing)?;

    let service = MessagingService::new(&state);
    let message = service.send(sender_id, receiver_id, content).await?;

    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Message sent successfully!",
            message.api_payload(),
        )),
    ))
}
