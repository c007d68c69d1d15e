use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::auth::Claims;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Verifies the raw token in the `authorization` header (no scheme prefix)
/// and stores the decoded [`Claims`] in the request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = request
            .headers()
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

        validate_token(token.trim(), &config.access_token_secret)
            .map_err(|e| AppError::Auth(e.to_string()))?
    };

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Self-service guard: the verified token must belong to `requested_uid`.
pub fn ensure_subject(claims: &Claims, requested_uid: Option<&str>) -> Result<(), AppError> {
    if claims.is_subject(requested_uid) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_subject() {
        let claims: Claims = serde_json::from_value(json!({ "uid": "u-1" })).unwrap();

        assert!(ensure_subject(&claims, Some("u-1")).is_ok());
        assert!(matches!(ensure_subject(&claims, Some("u-2")), Err(AppError::Forbidden(_))));
        assert!(matches!(ensure_subject(&claims, None), Err(AppError::Forbidden(_))));
    }
}
