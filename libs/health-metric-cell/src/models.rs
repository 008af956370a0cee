use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    pub id: i64,
    pub user_id: i64,
    pub metric_type: String,
    pub value: f64,
    pub goal: f64,
    pub milestone_achieved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthMetric {
    pub fn api_payload(&self) -> Value {
        json!({
            "id": self.id,
            "goal": self.goal,
            "value": self.value,
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
            "metricType": self.metric_type,
            "milestoneAchieved": self.milestone_achieved,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateHealthMetricRequest {
    pub goal: Value,
    pub value: Value,
    pub metric_type: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateHealthMetricRequest {
    pub goal: Value,
    pub value: Value,
}
