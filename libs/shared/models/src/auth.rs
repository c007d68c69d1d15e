use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only role the admin gate lets through and the one elevation grants.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims carried by an access token.
///
/// Issuance signs whatever object the caller posts, so only the registered
/// time claims are typed. Everything else, `uid` included, stays in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The `uid` claim, when it is a string.
    pub fn uid(&self) -> Option<&str> {
        self.extra.get("uid").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(Value::as_str)
    }

    /// True when the token subject is exactly `uid`. A missing or non-string
    /// value on either side never matches.
    pub fn is_subject(&self, uid: Option<&str>) -> bool {
        match (self.uid(), uid) {
            (Some(subject), Some(requested)) => subject == requested,
            _ => false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
