use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use shared_clients::ClientError;
use shared_database::{InsertOneResult, StoreError};
use shared_models::error::AppError;

/// Doctor profile paired with an identity-provider account through `uid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub doctor_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_img: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DoctorProvisioning {
    Provisioned(InsertOneResult),
    AlreadyExists,
    /// The account could not be created; no record was written.
    ProvisioningFailed(String),
}

#[derive(Error, Debug)]
pub enum ProvisioningError {
    #[error("Missing identity-provider account id")]
    MissingAccount,

    #[error(transparent)]
    Identity(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProvisioningError> for AppError {
    fn from(err: ProvisioningError) -> Self {
        match err {
            ProvisioningError::MissingAccount => AppError::BadRequest(err.to_string()),
            ProvisioningError::Identity(client) => client.into(),
            ProvisioningError::Store(store) => store.into(),
        }
    }
}
