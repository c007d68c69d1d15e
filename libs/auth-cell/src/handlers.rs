use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Json, Query, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Duration;
use serde_json::Value;
use tracing::{debug, info};

use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_state::AppState;
use shared_utils::jwt::{issue_token as sign_token, TokenError, ACCESS_TOKEN_TTL_DAYS};

use crate::models::{ResolvedRole, RoleResponse, UidQuery};
use crate::services::role::{RoleCheck, RoleResolver};

/// `POST /jwt`: signs the posted object as a 30-day access token.
#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Issuing access token");

    let token = sign_token(
        &payload,
        &state.config.access_token_secret,
        Duration::days(ACCESS_TOKEN_TTL_DAYS),
    )
    .map_err(|e| match e {
        TokenError::PayloadNotObject => AppError::BadRequest(e.to_string()),
        _ => AppError::Internal(e.to_string()),
    })?;

    Ok(Json(TokenResponse { token }))
}

/// Lets the request through only for admins. Everyone else gets their
/// resolved role back as a normal response.
pub async fn admin_gate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UidQuery>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let resolver = RoleResolver::new(Arc::clone(&state.store));

    match resolver.resolve(query.uid.as_deref()).await? {
        RoleCheck::Granted { role } => {
            info!("Admin access granted for {:?}", query.uid);
            request.extensions_mut().insert(ResolvedRole(role));
            Ok(next.run(request).await)
        }
        RoleCheck::Denied { role } => Ok(Json(RoleResponse { role }).into_response()),
    }
}

/// `GET /admin`
pub async fn get_admin(Extension(ResolvedRole(role)): Extension<ResolvedRole>) -> Json<RoleResponse> {
    Json(RoleResponse { role: Some(role) })
}
