use chrono::Utc;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_models::error::AppError;

use crate::models::HealthMetric;

/// Email-free projection of a user row; existence is all the metric flow
/// needs to know.
#[derive(Debug, serde::Deserialize)]
struct UserRef {
    #[allow(dead_code)]
    id: i64,
}

pub struct MetricService {
    store: StoreClient,
}

impl MetricService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<HealthMetric>, AppError> {
        debug!("listing health metrics for user {}", user_id);

        self.store
            .select("health_metrics", &[("user_id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// New metrics always start with the milestone flag down; nothing in the
    /// API flips it later.
    pub async fn create(
        &self,
        user_id: i64,
        metric_type: &str,
        value: f64,
        goal: f64,
    ) -> Result<HealthMetric, AppError> {
        debug!("creating {} metric for user {}", metric_type, user_id);

        let user: Option<UserRef> = self
            .store
            .select_one("users", &[("id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let now = Utc::now();
        self.store
            .insert(
                "health_metrics",
                json!({
                    "user_id": user_id,
                    "metric_type": metric_type,
                    "value": value,
                    "goal": goal,
                    "milestone_achieved": false,
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update is scoped to (metric, user) so one user cannot reach another's
    /// metric by id alone.
    pub async fn update(
        &self,
        user_id: i64,
        metric_id: i64,
        goal: f64,
        value: f64,
    ) -> Result<HealthMetric, AppError> {
        debug!("updating metric {} for user {}", metric_id, user_id);

        let mut updated: Vec<HealthMetric> = self
            .store
            .update(
                "health_metrics",
                &[
                    ("id", format!("eq.{}", metric_id)),
                    ("user_id", format!("eq.{}", user_id)),
                ],
                json!({
                    "goal": goal,
                    "value": value,
                    "updated_at": Utc::now().to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.is_empty() {
            return Err(AppError::NotFound(
                "Health metric not found or not updated".to_string(),
            ));
        }
        Ok(updated.remove(0))
    }
}
