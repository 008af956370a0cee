use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{StoreClient, StoreError};
use shared_mailer::{MailTemplate, MailerClient};

use crate::models::{Appointment, AppointmentError, AppointmentStatus, BookingParty};
use crate::services::conflict::SlotConflictService;

pub struct BookingService {
    store: Arc<StoreClient>,
    conflict_service: SlotConflictService,
    mailer: MailerClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(StoreClient::new(config));

        Self {
            conflict_service: SlotConflictService::new(Arc::clone(&store)),
            mailer: MailerClient::new(config),
            store,
        }
    }

    /// Book a slot: both parties must exist (the doctor side with the doctor
    /// role), the exact (doctor, timestamp) pair must be free, and the booking
    /// user gets a confirmation mail after the row lands.
    pub async fn book(
        &self,
        user_id: i64,
        doctor_id: i64,
        appointment_date: DateTime<Utc>,
    ) -> Result<Appointment, AppointmentError> {
        info!("booking appointment for user {} with doctor {}", user_id, doctor_id);

        let user: Option<BookingParty> = self
            .store
            .select_one("users", &[("id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let doctor: Option<BookingParty> = self
            .store
            .select_one(
                "users",
                &[
                    ("id", format!("eq.{}", doctor_id)),
                    ("role", "eq.doctor".to_string()),
                ],
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let (Some(user), Some(_doctor)) = (user, doctor) else {
            return Err(AppointmentError::PartyNotFound);
        };

        if self
            .conflict_service
            .slot_taken(doctor_id, appointment_date)
            .await?
        {
            warn!("slot conflict for doctor {} at {}", doctor_id, appointment_date);
            return Err(AppointmentError::SlotTaken);
        }

        let now = Utc::now();
        let appointment: Appointment = self
            .store
            .insert(
                "appointments",
                json!({
                    "user_id": user_id,
                    "doctor_id": doctor_id,
                    "appointment_date": appointment_date.to_rfc3339(),
                    "status": AppointmentStatus::Scheduled.to_string(),
                    "created_at": now.to_rfc3339(),
                    "updated_at": now.to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| match e {
                // A concurrent writer won the slot between the advisory read
                // and this insert.
                StoreError::Conflict(_) => AppointmentError::SlotTaken,
                other => AppointmentError::Database(other.to_string()),
            })?;

        let when = appointment.appointment_date.to_rfc3339();
        let template = MailTemplate::new(
            "Appointment Confirmation",
            format!("<h1>Your appointment is confirmed for {}</h1>", when),
            format!("Your appointment is confirmed for {}", when),
        );
        if let Err(err) = self.mailer.send(&[user.email], &template).await {
            warn!("appointment confirmation mail failed: {}", err);
        }

        info!("appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn get(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        debug!("fetching appointment {}", appointment_id);

        self.store
            .select_one("appointments", &[("id", format!("eq.{}", appointment_id))])
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    /// Move an existing appointment to a new timestamp. Reschedules stamp
    /// `updated_at`; the slot is not re-checked for conflicts.
    pub async fn reschedule(
        &self,
        appointment_id: i64,
        appointment_date: DateTime<Utc>,
    ) -> Result<Appointment, AppointmentError> {
        debug!("rescheduling appointment {} to {}", appointment_id, appointment_date);

        let _existing = self.get(appointment_id).await?;

        let mut updated: Vec<Appointment> = self
            .store
            .update(
                "appointments",
                &[("id", format!("eq.{}", appointment_id))],
                json!({
                    "appointment_date": appointment_date.to_rfc3339(),
                    "updated_at": Utc::now().to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        if updated.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(updated.remove(0))
    }

    /// Delete an appointment, returning the pre-deletion snapshot for client
    /// reconciliation.
    pub async fn remove(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        debug!("deleting appointment {}", appointment_id);

        let snapshot = self.get(appointment_id).await?;

        let _removed: Vec<Appointment> = self
            .store
            .delete("appointments", &[("id", format!("eq.{}", appointment_id))])
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        info!("appointment {} deleted", appointment_id);
        Ok(snapshot)
    }
}
