use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

pub use provisioning_cell::{Doctor, DoctorProvisioning};

pub const ALREADY_EXISTS_MESSAGE: &str = "user already exists";

#[derive(Debug, Deserialize)]
pub struct UidQuery {
    pub uid: Option<String>,
}

/// Response body for `POST /doctorList`. Every outcome is a 200.
pub struct DoctorCreated(pub DoctorProvisioning);

impl IntoResponse for DoctorCreated {
    fn into_response(self) -> Response {
        match self.0 {
            DoctorProvisioning::Provisioned(result) => Json(result).into_response(),
            DoctorProvisioning::AlreadyExists => ALREADY_EXISTS_MESSAGE.into_response(),
            // Failure details stay in the server log.
            DoctorProvisioning::ProvisioningFailed(_) => {
                Json(json!({ "acknowledged": false })).into_response()
            }
        }
    }
}
