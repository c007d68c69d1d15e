use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};

use provisioning_cell::ProvisioningService;
use shared_database::{DeleteResult, UpdateResult};
use shared_models::auth::Claims;
use shared_models::error::AppError;
use shared_state::AppState;
use shared_utils::extractor::ensure_subject;

use crate::models::{CreateOutcome, UidQuery, User, UserUidQuery};
use crate::services::user::UserService;

fn provisioning(state: &AppState) -> ProvisioningService {
    ProvisioningService::new(
        Arc::clone(&state.store),
        Arc::clone(&state.identity),
        state.config.doctor_default_password.as_str(),
    )
}

/// Lists every user for a caller whose token matches `uid`. Role plays no part.
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<UidQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    ensure_subject(&claims, query.uid.as_deref())?;

    let service = UserService::new(Arc::clone(&state.store));
    Ok(Json(service.list_users().await?))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<CreateOutcome, AppError> {
    let service = UserService::new(Arc::clone(&state.store));
    Ok(service.register_user(&user).await?)
}

#[axum::debug_handler]
pub async fn promote_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UpdateResult>, AppError> {
    Ok(Json(provisioning(&state).promote_user(&user_id).await?))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<UserUidQuery>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = provisioning(&state)
        .delete_user(&user_id, query.user_uid.as_deref())
        .await?;
    Ok(Json(result))
}
