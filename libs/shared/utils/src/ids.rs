use serde_json::Value;

use shared_models::error::AppError;

/// Strictly parse a path segment as a numeric identifier. Fails before any
/// storage access with the route's own 400 message.
pub fn parse_path_id(raw: &str, label: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {}", label)))
}

/// Coerce a body field to a numeric identifier. Accepts a JSON integer or a
/// numeric string; anything else (including an absent field) is `None`.
pub fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// A non-empty string body field.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// A numeric body field, accepting a JSON number or numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
