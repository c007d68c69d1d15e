use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{collections, Collection, DocumentStore, Filter, StoreError};

use crate::models::{CreateOutcome, User};

pub struct UserService {
    users: Collection<User>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(store, collections::USERS),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.users.find(&Filter::new()).await
    }

    /// One record per `userEmail`; a repeat registration writes nothing.
    pub async fn register_user(&self, user: &User) -> Result<CreateOutcome, StoreError> {
        let by_email = Filter::new().eq("userEmail", user.user_email.as_str());
        if self.users.exists(&by_email).await? {
            debug!("User {} already registered", user.user_email);
            return Ok(CreateOutcome::AlreadyExists);
        }

        let result = self.users.insert_one(user).await?;
        info!("User {} registered as {}", user.user_email, result.inserted_id);
        Ok(CreateOutcome::Created(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use shared_database::InMemoryStore;

    fn user(email: &str) -> User {
        User {
            id: None,
            user_uid: Some("acc-1".to_string()),
            user_email: email.to_string(),
            role: None,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_register_user_once_per_email() {
        let store = Arc::new(InMemoryStore::new());
        let service = UserService::new(store.clone());

        let first = service.register_user(&user("a@x.com")).await.unwrap();
        let second = service.register_user(&user("a@x.com")).await.unwrap();

        assert!(matches!(first, CreateOutcome::Created(_)));
        assert_eq!(second, CreateOutcome::AlreadyExists);
        assert_eq!(store.count(collections::USERS, &Filter::new()).await, 1);
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }
}
