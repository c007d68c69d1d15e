// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{
    collections, Collection, DeleteResult, DocumentStore, Filter, InsertOneResult, StoreError,
};

use crate::models::Booking;

/// Pending bookings keyed by requester email or `_id`.
pub struct BookingService {
    bookings: Collection<Booking>,
}

impl BookingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            bookings: Collection::new(store, collections::BOOKINGS),
        }
    }

    /// Stores the booking as sent. Slot conflicts are the caller's concern.
    pub async fn create_booking(&self, booking: &Booking) -> Result<InsertOneResult, StoreError> {
        let result = self.bookings.insert_one(booking).await?;
        info!(
            "Booking {} created for {} on {} {}",
            result.inserted_id, booking.email, booking.booking_date, booking.booking_slot
        );
        Ok(result)
    }

    pub async fn list_by_requester(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        debug!("Listing bookings for {}", email);
        self.bookings.find(&Filter::new().eq("email", email)).await
    }

    pub async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>, StoreError> {
        debug!("Fetching booking {}", booking_id);
        self.bookings.find_one(&Filter::by_id(booking_id)).await
    }

    /// Idempotent: deleting an unknown id reports `deletedCount: 0`.
    pub async fn delete_booking(&self, booking_id: &str) -> Result<DeleteResult, StoreError> {
        let result = self.bookings.delete_one(&Filter::by_id(booking_id)).await?;
        debug!("Deleted {} booking(s) with id {}", result.deleted_count, booking_id);
        Ok(result)
    }
}
