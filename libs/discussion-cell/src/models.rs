use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDiscussion {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub content: String,
    pub is_encrypted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupDiscussion {
    pub fn api_payload(&self) -> Value {
        json!({
            "id": self.id,
            "topic": self.topic,
            "userId": self.user_id,
            "content": self.content,
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
            "isEncrypted": self.is_encrypted,
        })
    }
}

/// Email projection of a user row, for notification fan-out.
#[derive(Debug, Deserialize)]
pub struct MemberEmail {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDiscussionRequest {
    pub topic: Value,
    pub user_id: Value,
    pub content: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostDiscussionMessageRequest {
    pub user_id: Value,
    pub content: Value,
}
