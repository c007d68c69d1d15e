use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::error::ClientError;

const SERVICE: &str = "payment network";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

/// Payment network tokenization.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in minor units of `currency`.
    async fn create_payment_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, ClientError>;
}

/// Stripe REST client. POST /v1/payment_intents
pub struct StripeClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.payment_api_url.trim_end_matches('/').to_string(),
            secret_key: config.payment_secret_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_payment_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, ClientError> {
        if self.secret_key.is_empty() {
            return Err(ClientError::NotConfigured { service: SERVICE });
        }

        let url = format!("{}/v1/payment_intents", self.base_url);
        debug!("Creating payment intent for {} {}", amount, currency);

        let amount_param = amount.to_string();
        let form = [
            ("amount", amount_param.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|source| ClientError::Request { service: SERVICE, source })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|source| ClientError::Request { service: SERVICE, source })?;

        if !status.is_success() {
            error!("Payment intent creation failed: {} - {}", status, response_text);
            return Err(ClientError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: response_text,
            });
        }

        let intent: PaymentIntent = serde_json::from_str(&response_text).map_err(|e| {
            ClientError::Parse {
                service: SERVICE,
                message: format!("Failed to parse payment intent: {}", e),
            }
        })?;

        info!("Created payment intent {}", intent.id);
        Ok(intent)
    }
}
