use std::sync::Arc;

use tracing::debug;

use shared_clients::{ClientError, PaymentGateway};

pub const PAYMENT_CURRENCY: &str = "usd";

pub struct PaymentIntentService {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentIntentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Requests a client secret for `fees` (major units). Amount limits are
    /// left to the payment network.
    pub async fn create_client_secret(&self, fees: f64) -> Result<String, ClientError> {
        let amount = to_minor_units(fees);
        debug!("Requesting payment intent for {} minor units", amount);

        let intent = self.gateway.create_payment_intent(amount, PAYMENT_CURRENCY).await?;
        Ok(intent.client_secret)
    }
}

fn to_minor_units(fees: f64) -> i64 {
    (fees * 100.0).round() as i64
}
