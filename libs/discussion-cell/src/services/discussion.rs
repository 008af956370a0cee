use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use message_cell::models::Message;
use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_mailer::{MailTemplate, MailerClient};
use shared_models::error::AppError;

use crate::models::{GroupDiscussion, MemberEmail};

pub struct DiscussionService {
    store: StoreClient,
    mailer: MailerClient,
}

impl DiscussionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            mailer: MailerClient::new(config),
        }
    }

    pub async fn create(
        &self,
        user_id: i64,
        topic: &str,
        content: &str,
    ) -> Result<GroupDiscussion, AppError> {
        debug!("creating discussion for user {}", user_id);

        let owner: Option<MemberEmail> = self
            .store
            .select_one("users", &[("id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if owner.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let now = Utc::now();
        let discussion: GroupDiscussion = self
            .store
            .insert(
                "group_discussions",
                json!({
                    "user_id": user_id,
                    "topic": topic,
                    "content": content,
                    "is_encrypted": true,
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        info!("discussion {} created", discussion.id);
        Ok(discussion)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<GroupDiscussion>, AppError> {
        debug!("listing discussions for user {}", user_id);

        self.store
            .select("group_discussions", &[("user_id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get(&self, discussion_id: i64) -> Result<GroupDiscussion, AppError> {
        debug!("fetching discussion {}", discussion_id);

        self.store
            .select_one("group_discussions", &[("id", format!("eq.{}", discussion_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound("Group discussion not found".to_string()))
    }

    /// Post into a discussion: the message row addresses the discussion
    /// owner, then every user linked to the discussion is notified. With no
    /// linked users nothing is sent, and a mail failure never unwinds the
    /// stored message.
    pub async fn post_message(
        &self,
        discussion_id: i64,
        sender_id: i64,
        content: &str,
    ) -> Result<Message, AppError> {
        let sender: Option<MemberEmail> = self
            .store
            .select_one("users", &[("id", format!("eq.{}", sender_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if sender.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let discussion = self.get(discussion_id).await?;

        let now = Utc::now();
        let message: Message = self
            .store
            .insert(
                "messages",
                json!({
                    "sender_id": sender_id,
                    "receiver_id": discussion.user_id,
                    "content": content,
                    "is_encrypted": true,
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let members: Vec<MemberEmail> = self
            .store
            .select(
                "users",
                &[
                    ("id", format!("eq.{}", discussion.user_id)),
                    ("select", "email".to_string()),
                ],
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let recipients: Vec<String> = members.into_iter().map(|member| member.email).collect();
        let template = MailTemplate::new(
            "New message in group discussion",
            format!("<p>A new message has been posted in the discussion: {}</p>", content),
            format!("A new message has been posted in the discussion: {}", content),
        );
        if let Err(err) = self.mailer.send(&recipients, &template).await {
            warn!("discussion notification mail failed: {}", err);
        }

        info!("message {} posted to discussion {}", message.id, discussion_id);
        Ok(message)
    }
}
