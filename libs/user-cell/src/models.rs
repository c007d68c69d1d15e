use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_database::InsertOneResult;

pub const ALREADY_EXISTS_MESSAGE: &str = "user already exists";

/// Registered user. `userUid` references the identity-provider account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uid: Option<String>,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(InsertOneResult),
    AlreadyExists,
}

impl IntoResponse for CreateOutcome {
    fn into_response(self) -> Response {
        match self {
            CreateOutcome::Created(result) => Json(result).into_response(),
            CreateOutcome::AlreadyExists => ALREADY_EXISTS_MESSAGE.into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UidQuery {
    pub uid: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUidQuery {
    pub user_uid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_without_role() {
        let user: User = serde_json::from_value(json!({
            "userEmail": "a@x.com",
            "userUid": "acc-1",
            "userName": "Ann"
        }))
        .unwrap();

        assert_eq!(user.role, None);
        assert_eq!(user.extra["userName"], "Ann");
        assert!(serde_json::to_value(&user).unwrap().get("role").is_none());
    }
}
