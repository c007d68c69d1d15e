use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use shared_clients::{IdentityProvider, NewAccount};
use shared_database::{
    collections, Collection, DeleteResult, DocumentStore, Filter, StoreError, UpdateResult,
};

use shared_models::auth::ADMIN_ROLE;

use crate::models::{Doctor, DoctorProvisioning, ProvisioningError};

/// Keeps doctor and user records in step with their identity-provider accounts.
///
/// Creation writes the account first, deletion removes the account first, and
/// a failed account call leaves the record untouched.
pub struct ProvisioningService {
    store: Arc<dyn DocumentStore>,
    doctors: Collection<Doctor>,
    identity: Arc<dyn IdentityProvider>,
    default_password: String,
}

impl ProvisioningService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            doctors: Collection::new(Arc::clone(&store), collections::DOCTORS),
            store,
            identity,
            default_password: default_password.into(),
        }
    }

    pub async fn create_doctor(&self, mut doctor: Doctor) -> Result<DoctorProvisioning, StoreError> {
        let by_email = Filter::new().eq("doctorEmail", doctor.doctor_email.as_str());
        if self.doctors.exists(&by_email).await? {
            debug!("Doctor {} already registered", doctor.doctor_email);
            return Ok(DoctorProvisioning::AlreadyExists);
        }

        let account = NewAccount {
            email: doctor.doctor_email.clone(),
            password: self.default_password.clone(),
            display_name: doctor.doctor_name.clone(),
            photo_url: doctor.doctor_img.clone(),
        };

        let account = match self.identity.create_account(account).await {
            Ok(account) => account,
            Err(e) => {
                error!("Account creation failed for doctor {}: {}", doctor.doctor_email, e);
                return Ok(DoctorProvisioning::ProvisioningFailed(e.to_string()));
            }
        };

        doctor.uid = Some(account.uid);
        let result = self.doctors.insert_one(&doctor).await?;
        info!("Doctor {} provisioned as {}", doctor.doctor_email, result.inserted_id);

        Ok(DoctorProvisioning::Provisioned(result))
    }

    pub async fn delete_doctor(&self, record_id: &str, uid: Option<&str>)
        -> Result<DeleteResult, ProvisioningError> {
        self.remove_paired(collections::DOCTORS, record_id, uid).await
    }

    pub async fn delete_user(&self, record_id: &str, uid: Option<&str>)
        -> Result<DeleteResult, ProvisioningError> {
        self.remove_paired(collections::USERS, record_id, uid).await
    }

    /// Grants the admin role. No check on the current role or the caller.
    pub async fn promote_user(&self, record_id: &str) -> Result<UpdateResult, StoreError> {
        let result = self
            .store
            .update_one(collections::USERS, &Filter::by_id(record_id), json!({ "role": ADMIN_ROLE }))
            .await?;

        info!(
            "Promoted user {} to {} (matched {}, modified {})",
            record_id, ADMIN_ROLE, result.matched_count, result.modified_count
        );
        Ok(result)
    }

    async fn remove_paired(&self, collection: &str, record_id: &str, uid: Option<&str>)
        -> Result<DeleteResult, ProvisioningError> {
        let uid = uid.filter(|uid| !uid.is_empty()).ok_or(ProvisioningError::MissingAccount)?;

        if let Err(e) = self.identity.delete_account(uid).await {
            warn!("Keeping {} record {}: account {} not deleted: {}", collection, record_id, uid, e);
            return Err(e.into());
        }

        let result = self.store.delete_one(collection, &Filter::by_id(record_id)).await?;
        info!("Removed account {} and {} {} record(s) from {}", uid, result.deleted_count, record_id, collection);
        Ok(result)
    }
}
