use std::sync::Arc;
use std::sync::OnceLock;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use regex::Regex;
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::{envelope, error::AppError};
use shared_utils::ids;

use crate::models::{SignupRequest, UserRole};
use crate::services::account::AccountService;

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let missing = || AppError::BadRequest("Missing required fields".to_string());

    let name = ids::non_empty_str(&request.name).ok_or_else(missing)?;
    let email = ids::non_empty_str(&request.email).ok_or_else(missing)?;
    let password = ids::non_empty_str(&request.password).ok_or_else(missing)?;
    let role_raw = ids::non_empty_str(&request.role).ok_or_else(missing)?;

    let role = UserRole::parse(role_raw)
        .ok_or_else(|| AppError::BadRequest("Invalid role".to_string()))?;

    if !email_pattern().is_match(email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let service = AccountService::new(&state);
    let user = service.signup(name, email, password, role).await?;

    Ok((
        StatusCode::CREATED,
        Json(envelope::success(
            "Account created successfully!",
            user.api_payload(),
        )),
    ))
}
