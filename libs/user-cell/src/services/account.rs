use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::{StoreClient, StoreError};
use shared_models::error::AppError;

use crate::models::{User, UserRole};
use crate::services::password;

pub struct AccountService {
    store: StoreClient,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Register a new account. The email is the account key: a row with the
    /// same address, whether found by the pre-check or reported by the store
    /// as a duplicate key, rejects the signup.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        debug!("signing up {}", email);

        let existing: Option<User> = self
            .store
            .select_one("users", &[("email", format!("eq.{}", email))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_some() {
            return Err(AppError::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user: User = self
            .store
            .insert(
                "users",
                json!({
                    "name": name,
                    "email": email,
                    "password": password_hash,
                    "role": role.to_string(),
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::BadRequest(
                    "An account with this email already exists".to_string(),
                ),
                other => AppError::Database(other.to_string()),
            })?;

        info!("account {} created for {}", user.id, user.email);
        Ok(user)
    }
}
