use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_mailer::{MailTemplate, MailerClient};
use shared_models::error::AppError;

use crate::models::{AppointmentRef, PayerEmail, Payment};

pub struct PaymentService {
    store: StoreClient,
    mailer: MailerClient,
}

impl PaymentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            mailer: MailerClient::new(config),
        }
    }

    /// Capture a payment against a scheduled appointment. The appointment
    /// must still be in `scheduled` status; completed or cancelled ones take
    /// no payment. The receipt goes to the payer's own address.
    pub async fn capture(
        &self,
        user_id: i64,
        appointment_id: i64,
        amount: f64,
        payment_method: &str,
    ) -> Result<Payment, AppError> {
        debug!("capturing payment of {} for appointment {}", amount, appointment_id);

        let appointment: Option<AppointmentRef> = self
            .store
            .select_one(
                "appointments",
                &[
                    ("id", format!("eq.{}", appointment_id)),
                    ("status", "eq.scheduled".to_string()),
                ],
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if appointment.is_none() {
            return Err(AppError::NotFound(
                "Appointment not found or not scheduled".to_string(),
            ));
        }

        let payer: Option<PayerEmail> = self
            .store
            .select_one("users", &[("id", format!("eq.{}", user_id))])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let Some(payer) = payer else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        let payment: Payment = self
            .store
            .insert(
                "payments",
                json!({
                    "user_id": user_id,
                    "appointment_id": appointment_id,
                    "amount": amount,
                    "payment_method": payment_method,
                    "payment_status": "Completed",
                    "payment_date": Utc::now().to_rfc3339(),
                }),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let template = MailTemplate::new(
            "Payment Receipt",
            format!("<h1>Payment of ${} processed successfully!</h1>", amount),
            format!("Payment of ${} processed successfully!", amount),
        );
        if let Err(err) = self.mailer.send(&[payer.email], &template).await {
            warn!("payment receipt mail failed: {}", err);
        }

        info!("payment {} captured for appointment {}", payment.id, appointment_id);
        Ok(payment)
    }
}
