use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::{RecordData, UpdateRecordRequest};
use crate::services::records::RecordService;

/// The path id here is the doctor's user id: the record listing is the
/// doctor-facing view of the charts they keep.
#[axum::debug_handler]
pub async fn list_doctor_records(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor_id = ids::parse_path_id(&user_id, "doctor ID")?;

    let service = RecordService::new(&state);
    let records = service.list_for_doctor(doctor_id).await?;

    let payload: Vec<Value> = records.iter().map(|record| record.api_payload()).collect();

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Electronic health records fetched successfully!",
            Value::Array(payload),
        )),
    ))
}

#[axum::debug_handler]
pub async fn update_record(
    State(state): State<Arc<AppConfig>>,
    Path(record_id): Path<String>,
    Json(request): Json<UpdateRecordRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let record_id = ids::parse_path_id(&record_id, "record ID")?;

    if request.record_data.is_null() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let record_data: RecordData = serde_json::from_value(request.record_data)
        .map_err(|_| AppError::BadRequest("Invalid record data".to_string()))?;

    let service = RecordService::new(&state);
    let record = service.replace_record_data(record_id, record_data).await?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Electronic health record updated successfully!",
            record.api_payload(),
        )),
    ))
}
