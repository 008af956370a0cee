use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::{AppointmentError, BookAppointmentRequest, RescheduleAppointmentRequest};
use crate::services::booking::BookingService;

fn parse_appointment_date(value: &Value) -> Result<DateTime<Utc>, AppError> {
    let raw = ids::non_empty_str(value)
        .ok_or_else(|| AppError::BadRequest("Invalid appointment date".to_string()))?;

    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest("Invalid appointment date".to_string()))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let invalid_ids = || AppError::BadRequest("Invalid user or doctor ID".to_string());
    let user_id = ids::as_id(&request.user_id).ok_or_else(invalid_ids)?;
    let doctor_id = ids::as_id(&request.doctor_id).ok_or_else(invalid_ids)?;
    let appointment_date = parse_appointment_date(&request.appointment_date)?;

    let service = BookingService::new(&state);

    let appointment = service
        .book(user_id, doctor_id, appointment_date)
        .await
        .map_err(|e| match e {
            AppointmentError::PartyNotFound => {
                AppError::NotFound("User or Doctor not found".to_string())
            }
            AppointmentError::SlotTaken => {
                AppError::Conflict("Appointment slot not available".to_string())
            }
            AppointmentError::NotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            AppointmentError::Database(msg) => AppError::Database(msg),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Appointment booked successfully!",
            appointment.api_payload(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment_id = ids::parse_path_id(&appointment_id, "appointment ID")?;

    let service = BookingService::new(&state);

    let appointment = service.get(appointment_id).await.map_err(|e| match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::Database(msg) => AppError::Database(msg),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Appointment details fetched successfully!",
            appointment.api_payload(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment_id = ids::parse_path_id(&appointment_id, "appointment ID")?;
    let appointment_date = parse_appointment_date(&request.appointment_date)?;

    let service = BookingService::new(&state);

    let appointment = service
        .reschedule(appointment_id, appointment_date)
        .await
        .map_err(|e| match e {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::Database(msg) => AppError::Database(msg),
            other => AppError::Internal(other.to_string()),
        })?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Appointment updated successfully!",
            appointment.api_payload(),
        )),
    ))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment_id = ids::parse_path_id(&appointment_id, "appointment ID")?;

    let service = BookingService::new(&state);

    let snapshot = service.remove(appointment_id).await.map_err(|e| match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::Database(msg) => AppError::Database(msg),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok((
        StatusCode::OK,
        Json(envelope::success(
            "Appointment deleted successfully!",
            snapshot.api_payload(),
        )),
    ))
}
