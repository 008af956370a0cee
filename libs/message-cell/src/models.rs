use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One row in the messages table. Direct mail and group-discussion postings
/// share this shape; a discussion posting addresses the discussion owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub is_encrypted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn api_payload(&self) -> Value {
        json!({
            "id": self.id,
            "content": self.content,
            "senderId": self.sender_id,
            "receiverId": self.receiver_id,
            "isEncrypted": self.is_encrypted,
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: Value,
    pub receiver_id: Value,
}
