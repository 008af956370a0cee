use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Structured clinical payload. Updates replace the whole object; there is no
/// field-level merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordData {
    pub notes: String,
    pub condition: String,
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub record_data: RecordData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthRecord {
    pub fn api_payload(&self) -> Value {
        json!({
            "id": self.id,
            "userId": self.user_id,
            "doctorId": self.doctor_id,
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
            "recordData": self.record_data,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub record_data: Value,
}
