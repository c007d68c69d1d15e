use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Map, Value};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{Claims, JwtHeader};

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of tokens issued by `POST /jwt`.
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 30;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("JWT secret is not set")]
    MissingSecret,
    #[error("Invalid token format")]
    Malformed,
    #[error("Unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[error("Invalid signature encoding")]
    SignatureEncoding,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Invalid claims encoding")]
    ClaimsEncoding,
    #[error("Invalid claims format")]
    ClaimsFormat,
    #[error("Token payload must be a JSON object")]
    PayloadNotObject,
    #[error("Token expired")]
    Expired,
}

fn new_mac(jwt_secret: &str) -> Result<HmacSha256, TokenError> {
    if jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    HmacSha256::new_from_slice(jwt_secret.as_bytes()).map_err(|_| TokenError::MissingSecret)
}

/// Signs `payload` as an HS256 token valid for `ttl`.
///
/// The payload is not inspected; whatever identity it asserts is signed as-is.
/// `iat` and `exp` are always set by the issuer.
pub fn issue_token(payload: &Value, jwt_secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let mut claims: Map<String, Value> = payload
        .as_object()
        .cloned()
        .ok_or(TokenError::PayloadNotObject)?;

    let now = Utc::now();
    claims.insert("iat".to_string(), json!(now.timestamp()));
    claims.insert("exp".to_string(), json!((now + ttl).timestamp()));

    let header = json!({ "alg": "HS256", "typ": "JWT" });
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let claims_b64 = URL_SAFE_NO_PAD.encode(Value::Object(claims).to_string());
    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = new_mac(jwt_secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, TokenError> {
    let mut mac = new_mac(jwt_secret)?;

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    let [header_b64, claims_b64, signature_b64] = parts.as_slice() else {
        return Err(TokenError::Malformed);
    };

    let header: JwtHeader = URL_SAFE_NO_PAD
        .decode(header_b64)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .ok_or(TokenError::Malformed)?;
    if header.alg != "HS256" {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        TokenError::SignatureEncoding
    })?;

    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());
    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(TokenError::InvalidSignature);
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| TokenError::ClaimsEncoding)?;

    let claims: Claims = serde_json::from_slice(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        TokenError::ClaimsFormat
    })?;

    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp().max(0) as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err(TokenError::Expired);
        }
    }

    debug!("Token validated successfully for uid: {:?}", claims.uid());
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

    #[test]
    fn test_issue_then_validate() {
        let payload = json!({ "uid": "user-1", "email": "a@x.com", "name": "Ann" });
        let token = issue_token(&payload, SECRET, Duration::days(ACCESS_TOKEN_TTL_DAYS)).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.uid(), Some("user-1"));
        assert_eq!(claims.email(), Some("a@x.com"));
        assert_eq!(claims.extra["name"], "Ann");

        let lifetime = claims.exp.unwrap() - claims.iat.unwrap();
        assert_eq!(lifetime, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_non_string_identity_claims_still_validate() {
        let payload = json!({ "uid": "u-1", "email": 42 });
        let token = issue_token(&payload, SECRET, Duration::days(ACCESS_TOKEN_TTL_DAYS)).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.uid(), Some("u-1"));
        assert_eq!(claims.extra["email"], 42);
    }

    #[test]
    fn test_issue_rejects_non_object_payload() {
        let err = issue_token(&json!("user-1"), SECRET, Duration::days(1)).unwrap_err();
        assert_eq!(err, TokenError::PayloadNotObject);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&json!({ "uid": "u" }), SECRET, Duration::days(1)).unwrap();
        assert_eq!(validate_token(&token, "other-secret"), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token(&json!({ "uid": "u" }), SECRET, Duration::hours(-1)).unwrap();
        assert_eq!(validate_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert_eq!(validate_token("abc", SECRET), Err(TokenError::Malformed));
        assert_eq!(validate_token("invalid.token.format", SECRET), Err(TokenError::Malformed));
    }

    #[test]
    fn test_missing_secret() {
        assert_eq!(validate_token("a.b.c", ""), Err(TokenError::MissingSecret));
    }
}
