use std::sync::Arc;

use tracing::debug;

use shared_database::{collections, Collection, DocumentStore, Filter, StoreError};

use crate::models::Doctor;

/// Read side of the doctor collection.
pub struct DoctorDirectory {
    doctors: Collection<Doctor>,
}

impl DoctorDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            doctors: Collection::new(store, collections::DOCTORS),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        self.doctors.find(&Filter::new()).await
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, StoreError> {
        debug!("Fetching doctor {}", doctor_id);
        self.doctors.find_one(&Filter::by_id(doctor_id)).await
    }
}
