use std::sync::Arc;

use tracing::debug;

use shared_database::{collections, DocumentStore, StoreError};

use crate::models::Slot;

/// Answers whether a slot already has a settled payment.
///
/// Advisory only: nothing is locked, so two callers can still race for the
/// same slot between this check and their next write.
pub struct SlotAvailabilityService {
    store: Arc<dyn DocumentStore>,
}

impl SlotAvailabilityService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn is_available(&self, slot: &Slot) -> Result<bool, StoreError> {
        let settled = self
            .store
            .find_one(collections::PAYMENTS, &slot.filter())
            .await?;

        debug!(
            "Slot {} {} {} available: {}",
            slot.date, slot.slot, slot.service, settled.is_none()
        );
        Ok(settled.is_none())
    }
}
