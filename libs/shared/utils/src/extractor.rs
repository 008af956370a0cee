use axum::http::HeaderMap;

use shared_models::error::AppError;

use crate::ids;

/// Identity of an authenticated caller. Session issuance and lookup belong to
/// an upstream collaborator; by the time a request reaches a handler the
/// resolved identity travels in the `userId` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: i64,
}

/// Resolve the caller or fail: absent identity is 401, a malformed one 400.
pub fn require_caller(headers: &HeaderMap) -> Result<CallerIdentity, AppError> {
    let raw = headers
        .get("userId")
        .ok_or_else(|| AppError::Auth("User not authenticated".to_string()))?;

    let raw = raw
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid user ID".to_string()))?;

    let user_id = ids::parse_path_id(raw, "user ID")?;
    Ok(CallerIdentity { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        assert_matches!(require_caller(&headers), Err(AppError::Auth(msg)) => {
            assert_eq!(msg, "User not authenticated");
        });
    }

    #[test]
    fn test_non_numeric_header_is_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert("userId", HeaderValue::from_static("abc"));
        assert_matches!(require_caller(&headers), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn test_numeric_header_resolves_the_caller() {
        let mut headers = HeaderMap::new();
        headers.insert("userId", HeaderValue::from_static("31"));
        assert_eq!(require_caller(&headers).unwrap(), CallerIdentity { user_id: 31 });
    }
}
