use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::error::ClientError;

const SERVICE: &str = "identity provider";

/// Account to create in the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    #[serde(rename = "localId")]
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Administrative access to the external authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<Account, ClientError>;

    async fn delete_account(&self, uid: &str) -> Result<(), ClientError>;
}

/// Identity Toolkit admin REST client.
/// POST /v1/projects/{project}/accounts and /v1/projects/{project}/accounts:delete
pub struct IdentityToolkitClient {
    client: Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

impl IdentityToolkitClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.identity_api_url.trim_end_matches('/').to_string(),
            project_id: config.identity_project_id.clone(),
            access_token: config.identity_access_token.clone(),
        }
    }

    fn accounts_url(&self, action: Option<&str>) -> String {
        match action {
            Some(action) => format!(
                "{}/v1/projects/{}/accounts:{}",
                self.base_url, self.project_id, action
            ),
            None => format!("{}/v1/projects/{}/accounts", self.base_url, self.project_id),
        }
    }

    fn ensure_configured(&self) -> Result<(), ClientError> {
        if self.project_id.is_empty() || self.access_token.is_empty() {
            return Err(ClientError::NotConfigured { service: SERVICE });
        }
        Ok(())
    }

    async fn post(&self, url: &str, body: serde_json::Value) -> Result<String, ClientError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Request { service: SERVICE, source })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|source| ClientError::Request { service: SERVICE, source })?;

        if !status.is_success() {
            error!("Identity provider request failed: {} - {}", status, response_text);
            return Err(ClientError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: response_text,
            });
        }

        Ok(response_text)
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn create_account(&self, account: NewAccount) -> Result<Account, ClientError> {
        self.ensure_configured()?;
        debug!("Creating identity provider account for {}", account.email);

        let body = serde_json::to_value(&account).map_err(|e| ClientError::Parse {
            service: SERVICE,
            message: e.to_string(),
        })?;
        let response_text = self.post(&self.accounts_url(None), body).await?;

        let created: Account = serde_json::from_str(&response_text).map_err(|e| {
            ClientError::Parse {
                service: SERVICE,
                message: format!("Failed to parse account response: {}", e),
            }
        })?;

        info!("Created identity provider account {}", created.uid);
        Ok(created)
    }

    async fn delete_account(&self, uid: &str) -> Result<(), ClientError> {
        self.ensure_configured()?;
        debug!("Deleting identity provider account {}", uid);

        self.post(&self.accounts_url(Some("delete")), json!({ "localId": uid }))
            .await?;

        info!("Deleted identity provider account {}", uid);
        Ok(())
    }
}
