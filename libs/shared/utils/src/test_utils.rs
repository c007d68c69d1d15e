use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;
use uuid::Uuid;

use shared_clients::{Account, ClientError, IdentityProvider, NewAccount, PaymentGateway, PaymentIntent};
use shared_config::AppConfig;
use shared_database::InMemoryStore;
use shared_state::AppState;

use crate::jwt::issue_token;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            access_token_secret: self.jwt_secret.clone(),
            payment_secret_key: "sk_test".to_string(),
            payment_api_url: "http://localhost:12111".to_string(),
            identity_api_url: "http://localhost:9099".to_string(),
            identity_project_id: "doc-house-test".to_string(),
            identity_access_token: "identity-token".to_string(),
            doctor_default_password: "123456".to_string(),
            port: 5000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub uid: String,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com")
    }
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let payload = json!({
            "uid": user.uid,
            "email": user.email,
        });

        issue_token(&payload, secret, Duration::hours(exp_hours.unwrap_or(24)))
            .expect("test secret is not empty")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Identity provider double that records calls and can be told to fail.
#[derive(Default)]
pub struct StubIdentityProvider {
    pub fail_create: bool,
    pub fail_delete: bool,
    created: Mutex<Vec<NewAccount>>,
    deleted: Mutex<Vec<String>>,
}

impl StubIdentityProvider {
    pub fn failing_create() -> Self {
        Self { fail_create: true, ..Self::default() }
    }

    pub fn failing_delete() -> Self {
        Self { fail_delete: true, ..Self::default() }
    }

    pub fn created_accounts(&self) -> Vec<NewAccount> {
        self.created.lock().expect("stub lock").clone()
    }

    pub fn deleted_accounts(&self) -> Vec<String> {
        self.deleted.lock().expect("stub lock").clone()
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn create_account(&self, account: NewAccount) -> Result<Account, ClientError> {
        if self.fail_create {
            return Err(ClientError::Api {
                service: "identity provider",
                status: 400,
                message: "EMAIL_EXISTS".to_string(),
            });
        }

        let email = account.email.clone();
        let mut created = self.created.lock().expect("stub lock");
        created.push(account);

        Ok(Account {
            uid: format!("uid-{}", created.len()),
            email: Some(email),
        })
    }

    async fn delete_account(&self, uid: &str) -> Result<(), ClientError> {
        if self.fail_delete {
            return Err(ClientError::Api {
                service: "identity provider",
                status: 400,
                message: "USER_NOT_FOUND".to_string(),
            });
        }

        self.deleted.lock().expect("stub lock").push(uid.to_string());
        Ok(())
    }
}

/// Payment network double returning a deterministic client secret.
#[derive(Default)]
pub struct StubPaymentGateway {
    requests: Mutex<Vec<(i64, String)>>,
}

impl StubPaymentGateway {
    pub fn requests(&self) -> Vec<(i64, String)> {
        self.requests.lock().expect("stub lock").clone()
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, ClientError> {
        self.requests
            .lock()
            .expect("stub lock")
            .push((amount, currency.to_string()));

        Ok(PaymentIntent {
            id: "pi_test".to_string(),
            client_secret: format!("pi_test_secret_{}", amount),
            amount,
            currency: currency.to_string(),
        })
    }
}

/// Application state wired to in-memory doubles, with handles kept for assertions.
pub struct TestHarness {
    pub config: Arc<AppConfig>,
    pub store: Arc<InMemoryStore>,
    pub identity: Arc<StubIdentityProvider>,
    pub payments: Arc<StubPaymentGateway>,
    pub state: Arc<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_identity(StubIdentityProvider::default())
    }

    pub fn with_identity(identity: StubIdentityProvider) -> Self {
        let config = TestConfig::default().to_arc();
        let store = Arc::new(InMemoryStore::new());
        let identity = Arc::new(identity);
        let payments = Arc::new(StubPaymentGateway::default());

        let state = Arc::new(AppState::new(
            Arc::clone(&config),
            store.clone(),
            identity.clone(),
            payments.clone(),
        ));

        Self {
            config,
            store,
            identity,
            payments,
            state,
        }
    }

    pub fn token_for(&self, user: &TestUser) -> String {
        JwtTestUtils::create_test_token(user, &self.config.access_token_secret, Some(24))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
