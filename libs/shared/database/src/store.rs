use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

/// Field holding the generated document identifier.
pub const ID_FIELD: &str = "_id";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Store configuration error: {0}")]
    Configuration(String),

    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotAnObject => AppError::BadRequest(err.to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Equality filter over top-level document fields. All conditions must hold.
///
/// A `null` condition matches documents where the field is null or missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            document.get(field).unwrap_or(&Value::Null) == expected
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Query-level access to named collections of JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Value>, StoreError>;

    /// Inserts `document`, assigning an `_id` when it carries none.
    async fn insert_one(&self, collection: &str, document: Value)
        -> Result<InsertOneResult, StoreError>;

    /// Merges the fields of `changes` into the first matching document.
    async fn update_one(&self, collection: &str, filter: &Filter, changes: Value)
        -> Result<UpdateResult, StoreError>;

    async fn delete_one(&self, collection: &str, filter: &Filter)
        -> Result<DeleteResult, StoreError>;
}

/// Makes sure `document` is an object with an `_id`, returning the id.
pub(crate) fn ensure_id(document: &mut Value) -> Result<String, StoreError> {
    let object: &mut Map<String, Value> = document.as_object_mut().ok_or(StoreError::NotAnObject)?;

    match object.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) if !other.is_null() => Ok(other.to_string()),
        _ => {
            let id = Uuid::new_v4().to_string();
            object.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}
