use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UidQuery {
    pub uid: Option<String>,
}

/// Body of `GET /admin`. An absent role is omitted rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Role resolved by the admin gate, handed to the guarded handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRole(pub String);
