use std::sync::Arc;

use shared_database::{collections, Collection, DocumentStore, Filter, StoreError};

use crate::models::ServiceEntry;

pub struct CatalogService {
    services: Collection<ServiceEntry>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            services: Collection::new(store, collections::SERVICES),
        }
    }

    pub async fn list_services(&self) -> Result<Vec<ServiceEntry>, StoreError> {
        self.services.find(&Filter::new()).await
    }
}
