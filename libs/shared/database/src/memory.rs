use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{
    ensure_id, DeleteResult, DocumentStore, Filter, InsertOneResult, StoreError, UpdateResult,
};

/// Process-local document store. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: &str, filter: &Filter) -> usize {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Value)
        -> Result<InsertOneResult, StoreError> {
        let inserted_id = ensure_id(&mut document)?;
        debug!("Inserting {} into {}", inserted_id, collection);

        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(document);

        Ok(InsertOneResult { acknowledged: true, inserted_id })
    }

    async fn update_one(&self, collection: &str, filter: &Filter, changes: Value)
        -> Result<UpdateResult, StoreError> {
        let changes = changes.as_object().ok_or(StoreError::NotAnObject)?;

        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
            .and_then(Value::as_object_mut);

        let Some(target) = target else {
            return Ok(UpdateResult { acknowledged: true, matched_count: 0, modified_count: 0 });
        };

        let mut modified = false;
        for (field, value) in changes {
            if target.get(field) != Some(value) {
                target.insert(field.clone(), value.clone());
                modified = true;
            }
        }

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter)
        -> Result<DeleteResult, StoreError> {
        let mut collections = self.collections.write().await;
        let position = collections
            .get(collection)
            .and_then(|docs| docs.iter().position(|doc| filter.matches(doc)));

        let deleted_count = match (position, collections.get_mut(collection)) {
            (Some(index), Some(docs)) => {
                docs.remove(index);
                1
            }
            _ => 0,
        };

        Ok(DeleteResult { acknowledged: true, deleted_count })
    }
}
