use chrono::Utc;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_models::error::AppError;

use crate::models::{HealthRecord, RecordData};

pub struct RecordService {
    store: StoreClient,
}

impl RecordService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Records kept by a doctor. An empty result is a 404, not an empty list.
    pub async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<HealthRecord>, AppError> {
        debug!("listing health records for doctor {}", doctor_id);

        let records: Vec<HealthRecord> = self
            .store
            .select(
                "electronic_health_records",
                &[("doctor_id", format!("eq.{}", doctor_id))],
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if records.is_empty() {
            return Err(AppError::NotFound("No records found".to_string()));
        }
        Ok(records)
    }

    /// Full-object replace of the clinical payload, stamping `updated_at`.
    pub async fn replace_record_data(
        &self,
        record_id: i64,
        record_data: RecordData,
    ) -> Result<HealthRecord, AppError> {
        debug!("replacing record data for record {}", record_id);

        let existing: Option<HealthRecord> = self
            .store
            .select_one(
                "electronic_health_records",
                &[("id", format!("eq.{}", record_id))],
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_none() {
            return Err(AppError::NotFound("Record not found".to_string()));
        }

        let mut updated: Vec<HealthRecord> = self
            .store
            .update(
                "electronic_health_records",
                &[("id", format!("eq.{}", record_id))],
                json!({
                    "record_data": record_data,
                    "updated_at": Utc::now().to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.is_empty() {
            return Err(AppError::NotFound("Record not found".to_string()));
        }
        Ok(updated.remove(0))
    }
}
