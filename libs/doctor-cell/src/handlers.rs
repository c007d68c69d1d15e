use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};

use provisioning_cell::ProvisioningService;
use shared_database::DeleteResult;
use shared_models::auth::Claims;
use shared_models::error::AppError;
use shared_state::AppState;
use shared_utils::extractor::ensure_subject;

use crate::models::{Doctor, DoctorCreated, UidQuery};
use crate::services::directory::DoctorDirectory;

fn provisioning(state: &AppState) -> ProvisioningService {
    ProvisioningService::new(
        Arc::clone(&state.store),
        Arc::clone(&state.identity),
        state.config.doctor_default_password.as_str(),
    )
}

/// Lists every doctor for a caller whose token matches `uid`.
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<UidQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    ensure_subject(&claims, query.uid.as_deref())?;

    let directory = DoctorDirectory::new(Arc::clone(&state.store));
    Ok(Json(directory.list_doctors().await?))
}

#[axum::debug_handler]
pub async fn get_doctor_details(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Option<Doctor>>, AppError> {
    let directory = DoctorDirectory::new(Arc::clone(&state.store));
    Ok(Json(directory.get_doctor(&doctor_id).await?))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(doctor): Json<Doctor>,
) -> Result<DoctorCreated, AppError> {
    let outcome = provisioning(&state).create_doctor(doctor).await?;
    Ok(DoctorCreated(outcome))
}

/// `uid` names the identity-provider account removed alongside the record.
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<UidQuery>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = provisioning(&state)
        .delete_doctor(&doctor_id, query.uid.as_deref())
        .await?;
    Ok(Json(result))
}
