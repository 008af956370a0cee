use serde_json::{json, Value};

/// Success half of the uniform `{success, message, data}` response contract.
/// The failure half lives in [`crate::error::AppError`].
pub fn success(message: &str, data: Value) -> Value {
    json!({
        "success": true,
        "message": message,
        "data": data
    })
}
