use std::sync::Arc;

use tracing::warn;

use shared_clients::{IdentityProvider, IdentityToolkitClient, PaymentGateway, StripeClient};
use shared_config::AppConfig;
use shared_database::{DocumentStore, SupabaseClient};

/// Capabilities shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            store,
            identity,
            payments,
        }
    }

    /// Wires the production adapters from configuration.
    pub fn from_config(config: AppConfig) -> Self {
        if !config.is_payment_configured() {
            warn!("Payment network not configured - payment intents will fail");
        }
        if !config.is_identity_provider_configured() {
            warn!("Identity provider not configured - doctor and user provisioning will fail");
        }

        let store = Arc::new(SupabaseClient::new(&config));
        let identity = Arc::new(IdentityToolkitClient::new(&config));
        let payments = Arc::new(StripeClient::new(&config));

        Self::new(Arc::new(config), store, identity, payments)
    }
}
