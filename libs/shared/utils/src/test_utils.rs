use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub store_url: String,
    pub store_service_key: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            store_service_key: "test-service-key".to_string(),
            mail_api_url: "http://localhost:54322".to_string(),
            mail_api_key: "test-mail-key".to_string(),
            mail_from: "no-reply@caresync.example".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: self.store_service_key.clone(),
            mail_api_url: self.mail_api_url.clone(),
            mail_api_key: self.mail_api_key.clone(),
            mail_from: self.mail_from.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned storage rows in the shape the PostgREST collaborator returns.
pub struct MockStoreRows;

impl MockStoreRows {
    pub fn user(id: i64, name: &str, email: &str, role: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "password": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA",
            "role": role,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn appointment(id: i64, user_id: i64, doctor_id: i64, date: &str, status: &str) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "doctor_id": doctor_id,
            "appointment_date": date,
            "status": status,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn health_record(id: i64, user_id: i64, doctor_id: i64) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "doctor_id": doctor_id,
            "record_data": {
                "notes": "Stable, follow up in six months",
                "condition": "Hypertension",
                "medications": ["Lisinopril 10mg"]
            },
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn group_discussion(id: i64, user_id: i64, topic: &str) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "topic": topic,
            "content": "Opening post",
            "is_encrypted": true,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn message(id: i64, sender_id: i64, receiver_id: i64, content: &str) -> Value {
        json!({
            "id": id,
            "sender_id": sender_id,
            "receiver_id": receiver_id,
            "content": content,
            "is_encrypted": true,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn health_metric(id: i64, user_id: i64, metric_type: &str, value: f64, goal: f64) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "metric_type": metric_type,
            "value": value,
            "goal": goal,
            "milestone_achieved": false,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    pub fn payment(id: i64, user_id: i64, appointment_id: i64, amount: f64) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "appointment_id": appointment_id,
            "amount": amount,
            "payment_method": "card",
            "payment_status": "Completed",
            "payment_date": "2026-01-10T09:00:00Z"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_produces_a_usable_app_config() {
        let config = TestConfig::default().to_app_config();
        assert!(config.is_configured());
        assert!(config.is_mailer_configured());
    }

    #[test]
    fn test_mock_rows_use_storage_column_names() {
        let row = MockStoreRows::appointment(1, 2, 3, "2026-08-07T10:00:00Z", "scheduled");
        assert_eq!(row["doctor_id"], 3);
        assert_eq!(row["status"], "scheduled");
        assert!(row.get("doctorId").is_none());
    }
}
