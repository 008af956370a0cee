use chrono::Utc;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_models::error::AppError;

use crate::models::Message;

pub struct MessagingService {
    store: StoreClient,
}

impl MessagingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Every message the user sent or received.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Message>, AppError> {
        debug!("listing messages for user {}", user_id);

        self.store
            .select(
                "messages",
                &[(
                    "or",
                    format!("(sender_id.eq.{0},receiver_id.eq.{0})", user_id),
                )],
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a direct message. The content travels as given; `is_encrypted`
    /// is bookkeeping only, no cipher is applied here.
    pub async fn send(
        &self,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> Result<Message, AppError> {
        debug!("storing message from {} to {}", sender_id, receiver_id);

        let now = Utc::now();
        self.store
            .insert(
                "messages",
                json!({
                    "sender_id": sender_id,
                    "receiver_id": receiver_id,
                    "content": content,
                    "is_encrypted": true,
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
