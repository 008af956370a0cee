use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use shared_database::StoreClient;

use crate::models::{Appointment, AppointmentError};

/// Advisory slot check: a (doctor, timestamp) pair is a bookable unit and at
/// most one appointment may occupy it. The read is not atomic with the
/// subsequent insert; the store's own uniqueness reporting is the backstop
/// for writers that race past it.
pub struct SlotConflictService {
    store: Arc<StoreClient>,
}

impl SlotConflictService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    pub async fn slot_taken(
        &self,
        doctor_id: i64,
        appointment_date: DateTime<Utc>,
    ) -> Result<bool, AppointmentError> {
        debug!("checking slot for doctor {} at {}", doctor_id, appointment_date);

        let existing: Vec<Appointment> = self
            .store
            .select(
                "appointments",
                &[
                    ("doctor_id", format!("eq.{}", doctor_id)),
                    ("appointment_date", format!("eq.{}", appointment_date.to_rfc3339())),
                ],
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        Ok(!existing.is_empty())
    }
}
