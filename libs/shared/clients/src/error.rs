use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} API error ({status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} returned an unexpected response: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },

    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}
