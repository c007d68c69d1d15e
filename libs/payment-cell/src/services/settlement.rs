use std::sync::Arc;

use tracing::{debug, info, warn};

use appointment_cell::{BookingService, SlotAvailabilityService};
use shared_database::{collections, Collection, DocumentStore, Filter, StoreError};

use crate::models::{BookingRelease, Payment, SettlementError, SettlementReceipt};

/// Turns a pending booking into a settled payment.
///
/// Settlement is two independent writes: the payment insert, then the booking
/// delete. A failed delete is reported in the receipt and never rolls the
/// payment back.
pub struct SettlementService {
    payments: Collection<Payment>,
    bookings: BookingService,
    availability: SlotAvailabilityService,
}

impl SettlementService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            payments: Collection::new(Arc::clone(&store), collections::PAYMENTS),
            bookings: BookingService::new(Arc::clone(&store)),
            availability: SlotAvailabilityService::new(store),
        }
    }

    pub async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt, SettlementError> {
        let slot = payment.slot();
        if !self.availability.is_available(&slot).await? {
            warn!(
                "Rejecting payment for {}: slot {} {} {} already settled",
                payment.email, slot.date, slot.slot, slot.service
            );
            return Err(SettlementError::SlotTaken {
                date: slot.date,
                slot: slot.slot,
                service: slot.service,
            });
        }

        let result = self.payments.insert_one(payment).await?;
        info!("Payment {} stored for booking {}", result.inserted_id, payment.booking_id);

        let delete_result = match self.bookings.delete_booking(&payment.booking_id).await {
            Ok(deleted) => {
                debug!("Booking {} released ({} deleted)", payment.booking_id, deleted.deleted_count);
                BookingRelease::Released(deleted)
            }
            Err(e) => {
                warn!(
                    "Payment {} stored but booking {} was not released: {}",
                    result.inserted_id, payment.booking_id, e
                );
                BookingRelease::Failed {
                    acknowledged: false,
                    error: e.to_string(),
                }
            }
        };

        Ok(SettlementReceipt { result, delete_result })
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Payment>, StoreError> {
        self.payments.find(&Filter::new().eq("email", email)).await
    }

    pub async fn list_all(&self) -> Result<Vec<Payment>, StoreError> {
        self.payments.find(&Filter::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};
    use shared_database::{DeleteResult, InMemoryStore, InsertOneResult, UpdateResult};

    fn payment(booking_id: &str) -> Payment {
        Payment {
            id: None,
            email: "a@x.com".to_string(),
            service_name: "Checkup".to_string(),
            booking_date: "2024-01-01".to_string(),
            booking_slot: "10am".to_string(),
            booking_id: booking_id.to_string(),
            fees: Some(50.0),
            transaction_id: Some("pi_123".to_string()),
            extra: Map::new(),
        }
    }

    async fn seed_booking(store: &InMemoryStore) -> String {
        store
            .insert_one(
                collections::BOOKINGS,
                json!({
                    "email": "a@x.com",
                    "serviceName": "Checkup",
                    "bookingDate": "2024-01-01",
                    "bookingSlot": "10am",
                    "fees": 50
                }),
            )
            .await
            .unwrap()
            .inserted_id
    }

    #[tokio::test]
    async fn test_settle_inserts_payment_and_retires_booking() {
        let store = Arc::new(InMemoryStore::new());
        let booking_id = seed_booking(&store).await;
        let service = SettlementService::new(store.clone());

        let receipt = service.settle(&payment(&booking_id)).await.unwrap();

        assert!(receipt.result.acknowledged);
        assert_eq!(
            receipt.delete_result,
            BookingRelease::Released(DeleteResult { acknowledged: true, deleted_count: 1 })
        );
        assert_eq!(store.count(collections::PAYMENTS, &Filter::new()).await, 1);
        assert_eq!(store.count(collections::BOOKINGS, &Filter::by_id(&booking_id)).await, 0);
    }

    #[tokio::test]
    async fn test_settle_with_unknown_booking_still_records_payment() {
        let store = Arc::new(InMemoryStore::new());
        let service = SettlementService::new(store.clone());

        let receipt = service.settle(&payment("no-such-booking")).await.unwrap();

        assert_eq!(
            receipt.delete_result,
            BookingRelease::Released(DeleteResult { acknowledged: true, deleted_count: 0 })
        );
        assert_eq!(store.count(collections::PAYMENTS, &Filter::new()).await, 1);
    }

    #[tokio::test]
    async fn test_settle_rejects_already_paid_slot() {
        let store = Arc::new(InMemoryStore::new());
        let service = SettlementService::new(store.clone());
        service.settle(&payment("b-1")).await.unwrap();

        let err = service.settle(&payment("b-2")).await.unwrap_err();

        assert_matches!(err, SettlementError::SlotTaken { .. });
        assert_eq!(store.count(collections::PAYMENTS, &Filter::new()).await, 1);
    }

    #[tokio::test]
    async fn test_list_by_email() {
        let store = Arc::new(InMemoryStore::new());
        let service = SettlementService::new(store);
        service.settle(&payment("b-1")).await.unwrap();

        assert_eq!(service.list_by_email("a@x.com").await.unwrap().len(), 1);
        assert!(service.list_by_email("b@x.com").await.unwrap().is_empty());
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    /// Store whose booking deletes always fail.
    struct BrokenDeleteStore {
        inner: InMemoryStore,
    }

    #[async_trait]
    impl DocumentStore for BrokenDeleteStore {
        async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
            self.inner.find(collection, filter).await
        }

        async fn find_one(&self, collection: &str, filter: &Filter)
            -> Result<Option<Value>, StoreError> {
            self.inner.find_one(collection, filter).await
        }

        async fn insert_one(&self, collection: &str, document: Value)
            -> Result<InsertOneResult, StoreError> {
            self.inner.insert_one(collection, document).await
        }

        async fn update_one(&self, collection: &str, filter: &Filter, changes: Value)
            -> Result<UpdateResult, StoreError> {
            self.inner.update_one(collection, filter, changes).await
        }

        async fn delete_one(&self, _collection: &str, _filter: &Filter)
            -> Result<DeleteResult, StoreError> {
            Err(StoreError::Api { status: 503, message: "unavailable".to_string() })
        }
    }

    #[tokio::test]
    async fn test_failed_release_keeps_payment_and_booking() {
        let store = Arc::new(BrokenDeleteStore { inner: InMemoryStore::new() });
        let booking_id = seed_booking(&store.inner).await;
        let service = SettlementService::new(store.clone());

        let receipt = service.settle(&payment(&booking_id)).await.unwrap();

        assert!(!receipt.delete_result.is_released());
        assert_eq!(store.inner.count(collections::PAYMENTS, &Filter::new()).await, 1);
        assert_eq!(store.inner.count(collections::BOOKINGS, &Filter::by_id(&booking_id)).await, 1);

        let body = serde_json::to_value(&receipt).unwrap();
        assert_eq!(body["deleteResult"]["acknowledged"], false);
        assert!(body["result"]["insertedId"].is_string());
    }
}
