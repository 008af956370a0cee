use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::{CreateHealthMetricRequest, UpdateHealthMetricRequest};
use crate::services::metrics::MetricService;

#[axum::debug_handler]
pub async fn list_metrics(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = ids::parse_path_id(&user_id, "user ID")?;

    let service = MetricService::new(&state);
    let metrics = service.list_for_user(user_id).await?;

    let payload: Vec<Value> = metrics.iter().map(|metric| metric.api_payload()).collect();

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Health metrics fetched successfully!",
            Value::Array(payload),
        )),
    ))
}

#[axum::debug_handler]
pub async fn create_metric(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateHealthMetricRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = ids::parse_path_id(&user_id, "user ID")?;

    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let goal = ids::as_number(&request.goal).ok_or_else(missing)?;
    let value = ids::as_number(&request.value).ok_or_else(missing)?;
    let metric_type = ids::non_empty_str(&request.metric_type).ok_or_else(missing)?;

    let service = MetricService::new(&state);
    let metric = service.create(user_id, metric_type, value, goal).await?;

    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Health metric created successfully!",
            metric.api_payload(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn update_metric(
    State(state): State<Arc<AppConfig>>,
    Path((user_id, metric_id)): Path<(String, String)>,
    Json(request): Json<UpdateHealthMetricRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let invalid = || AppError::BadRequest("Invalid user ID or metric ID".to_string());
    let user_id = ids::parse_path_id(&user_id, "user ID").map_err(|_| invalid())?;
    let metric_id = ids::parse_path_id(&metric_id, "metric ID").map_err(|_| invalid())?;

    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let goal = ids::as_number(&request.goal).ok_or_else(missing)?;
    let value = ids::as_number(&request.value).ok_or_else(missing)?;

    let service = MetricService::new(&state);
    let metric = service.update(user_id, metric_id, goal, value).await?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Health metric updated successfully!",
            metric.api_payload(),
        )),
    ))
}
