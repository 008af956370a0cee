use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub appointment_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    pub fn api_payload(&self) -> Value {
        json!({
            "id": self.id,
            "amount": self.amount,
            "userId": self.user_id,
            "paymentDate": self.payment_date.to_rfc3339(),
            "appointmentId": self.appointment_id,
            "paymentStatus": self.payment_status,
        })
    }
}

/// Existence-only projection of an appointment row.
#[derive(Debug, Deserialize)]
pub struct AppointmentRef {
    pub id: i64,
}

/// The payer's address, for the receipt.
#[derive(Debug, Deserialize)]
pub struct PayerEmail {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Value,
    pub user_id: Value,
    pub appointment_id: Value,
    pub payment_method: Value,
}
