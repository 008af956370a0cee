use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::{extractor, ids};

use crate::models::{CreateDiscussionRequest, PostDiscussionMessageRequest};
use crate::services::discussion::DiscussionService;

#[axum::debug_handler]
pub async fn create_discussion(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDiscussionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let topic = ids::non_empty_str(&request.topic).ok_or_else(missing)?;
    let content = ids::non_empty_str(&request.content).ok_or_else(missing)?;

    if request.user_id.is_null() {
        return Err(missing());
    }
    let user_id = ids::as_id(&request.user_id)
        .ok_or_else(|| AppError::BadRequest("Invalid user ID".to_string()))?;

    let service = DiscussionService::new(&state);
    let discussion = service.create(user_id, topic, content).await?;

    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Group discussion created successfully!",
            discussion.api_payload(),
        )),
    ))
}

/// Listing is scoped to the authenticated caller forwarded in the `userId`
/// header; there is no anonymous view of discussions.
#[axum::debug_handler]
pub async fn list_discussions(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let caller = extractor::require_caller(&headers)?;

    let service = DiscussionService::new(&state);
    let discussions = service.list_for_user(caller.user_id).await?;

    let payload: Vec<Value> = discussions
        .iter()
        .map(|discussion| discussion.api_payload())
        .collect();

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Group discussions fetched successfully!",
            Value::Array(payload),
        )),
    ))
}

#[axum::debug_handler]
pub async fn get_discussion(
    State(state): State<Arc<AppConfig>>,
    Path(discussion_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let discussion_id = ids::parse_path_id(&discussion_id, "discussion ID")?;

    let service = DiscussionService::new(&state);
    let discussion = service.get(discussion_id).await?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Group discussion details fetched successfully!",
            discussion.api_payload(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn post_discussion_message(
    State(state): State<Arc<AppConfig>>,
    Path(discussion_id): Path<String>,
    Json(request): Json<PostDiscussionMessageRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let discussion_id = ids::parse_path_id(&discussion_id, "discussion ID")?;

    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let content = ids::non_empty_str(&request.content).ok_or_else(missing)?;

    if request.user_id.is_null() {
        return Err(missing());
    }
    let sender_id = ids::as_id(&request.user_id)
        .ok_or_else(|| AppError::BadRequest("Invalid user ID".to_string()))?;

    let service = DiscussionService::new(&state);
    let message = service
        .post_message(discussion_id, sender_id, content)
        .await?;

    // Discussion postings expose the sender as `userId`; the receiver is an
    // implementation detail of the row.
    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Message posted successfully!",
            json!({
                "id": message.id,
                "userId": message.sender_id,
                "content": message.content,
                "createdAt": message.created_at.to_rfc3339(),
                "updatedAt": message.updated_at.to_rfc3339(),
                "isEncrypted": message.is_encrypted,
            }),
        )),
    ))
}
