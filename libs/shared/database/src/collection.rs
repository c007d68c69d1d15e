use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{DeleteResult, DocumentStore, Filter, InsertOneResult, StoreError};

/// Typed view over one collection of a [`DocumentStore`].
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        self.store
            .find(self.name, filter)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>, StoreError> {
        match self.store.find_one(self.name, filter).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn exists(&self, filter: &Filter) -> Result<bool, StoreError> {
        Ok(self.store.find_one(self.name, filter).await?.is_some())
    }

    pub async fn insert_one(&self, document: &T) -> Result<InsertOneResult, StoreError> {
        let value = serde_json::to_value(document)?;
        self.store.insert_one(self.name, value).await
    }

    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, StoreError> {
        self.store.delete_one(self.name, filter).await
    }
}
