use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub access_token_secret: String,
    pub payment_secret_key: String,
    pub payment_api_url: String,
    pub identity_api_url: String,
    pub identity_project_id: String,
    pub identity_access_token: String,
    pub doctor_default_password: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            access_token_secret: env::var("ACCESS_KEY")
                .unwrap_or_else(|_| {
                    warn!("ACCESS_KEY not set, using empty value");
                    String::new()
                }),
            payment_secret_key: env::var("PAYMENT_SECRET_KEY")
                .unwrap_or_else(|_| {
                    warn!("PAYMENT_SECRET_KEY not set, using empty value");
                    String::new()
                }),
            payment_api_url: env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            identity_api_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),
            identity_project_id: env::var("IDENTITY_PROJECT_ID")
                .unwrap_or_else(|_| {
                    warn!("IDENTITY_PROJECT_ID not set, using empty value");
                    String::new()
                }),
            identity_access_token: env::var("IDENTITY_ACCESS_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("IDENTITY_ACCESS_TOKEN not set, using empty value");
                    String::new()
                }),
            doctor_default_password: env::var("DOCTOR_DEFAULT_PASSWORD")
                .unwrap_or_else(|_| "123456".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(5000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.access_token_secret.is_empty()
    }

    pub fn is_payment_configured(&self) -> bool {
        !self.payment_secret_key.is_empty() && !self.payment_api_url.is_empty()
    }

    pub fn is_identity_provider_configured(&self) -> bool {
        !self.identity_project_id.is_empty() && !self.identity_access_token.is_empty()
    }
}
