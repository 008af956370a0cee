use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::PaymentRequest;
use crate::services::payment::PaymentService;

#[axum::debug_handler]
pub async fn process_payment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let missing = || AppError::BadRequest("Missing required fields".to_string());
    let amount = ids::as_number(&request.amount).ok_or_else(missing)?;
    let user_id = ids::as_id(&request.user_id).ok_or_else(missing)?;
    let appointment_id = ids::as_id(&request.appointment_id).ok_or_else(missing)?;
    let payment_method = ids::non_empty_str(&request.payment_method).ok_or_else(missing)?;

    let service = PaymentService::new(&state);
    let payment = service
        .capture(user_id, appointment_id, amount, payment_method)
        .await?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Payment processed successfully!",
            payment.api_payload(),
        )),
    ))
}
