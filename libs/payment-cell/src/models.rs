use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use appointment_cell::Slot;
use shared_database::{DeleteResult, InsertOneResult, StoreError};
use shared_models::error::AppError;

/// Settled appointment. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub service_name: String,
    pub booking_date: String,
    pub booking_slot: String,
    /// `_id` of the pending booking this payment retires.
    #[serde(rename = "bookingID")]
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    pub fn slot(&self) -> Slot {
        Slot::new(
            self.booking_date.as_str(),
            self.booking_slot.as_str(),
            self.service_name.as_str(),
        )
    }
}

/// Outcome of the second settlement step, reported separately from the insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookingRelease {
    Released(DeleteResult),
    Failed { acknowledged: bool, error: String },
}

impl BookingRelease {
    pub fn is_released(&self) -> bool {
        matches!(self, BookingRelease::Released(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementReceipt {
    pub result: InsertOneResult,
    #[serde(rename = "deleteResult")]
    pub delete_result: BookingRelease,
}

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("Slot {date} {slot} for {service} is already paid")]
    SlotTaken {
        date: String,
        slot: String,
        service: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::SlotTaken { .. } => AppError::Conflict(err.to_string()),
            SettlementError::Store(store) => store.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub fees: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}
