// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_database::Filter;

/// Pending, unpaid reservation of a slot.
///
/// Fields the client sends beyond the typed ones are stored untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub service_name: String,
    pub booking_date: String,
    pub booking_slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Catalog entry. Only the name is typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bookable window: date, time slot and service name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: String,
    pub slot: String,
    pub service: String,
}

impl Slot {
    pub fn new(date: impl Into<String>, slot: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            slot: slot.into(),
            service: service.into(),
        }
    }

    /// Exact match on all three fields of a stored booking or payment.
    pub fn filter(&self) -> Filter {
        Filter::new()
            .eq("bookingDate", self.date.as_str())
            .eq("bookingSlot", self.slot.as_str())
            .eq("serviceName", self.service.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: String,
    pub slot: String,
    pub name: String,
}

impl From<SlotQuery> for Slot {
    fn from(query: SlotQuery) -> Self {
        Slot::new(query.date, query.slot, query.name)
    }
}

/// `GET /booked` body; `message` is true when the slot is still free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub message: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_keeps_unknown_fields() {
        let booking: Booking = serde_json::from_value(json!({
            "email": "a@x.com",
            "serviceName": "Checkup",
            "bookingDate": "2024-01-01",
            "bookingSlot": "10am",
            "fees": 50,
            "patientName": "Ann"
        }))
        .unwrap();

        assert_eq!(booking.fees, Some(50.0));
        assert_eq!(booking.extra["patientName"], "Ann");

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["patientName"], "Ann");
        assert_eq!(value["bookingSlot"], "10am");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_slot_filter_matches_only_exact_triple() {
        let slot = Slot::new("2024-01-01", "10am", "Checkup");
        let stored = json!({ "bookingDate": "2024-01-01", "bookingSlot": "10am", "serviceName": "Checkup" });
        let other = json!({ "bookingDate": "2024-01-01", "bookingSlot": "10am", "serviceName": "Dental" });

        assert!(slot.filter().matches(&stored));
        assert!(!slot.filter().matches(&other));
    }
}
