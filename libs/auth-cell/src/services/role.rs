use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_database::{collections, Collection, DocumentStore, Filter, StoreError};
use shared_models::auth::ADMIN_ROLE;

/// Outcome of a role lookup. Denial is an ordinary value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCheck {
    Granted { role: String },
    Denied { role: Option<String> },
}

impl RoleCheck {
    pub fn role(&self) -> Option<&str> {
        match self {
            RoleCheck::Granted { role } => Some(role),
            RoleCheck::Denied { role } => role.as_deref(),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, RoleCheck::Granted { .. })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RoleRecord {
    #[serde(default)]
    role: Option<String>,
}

pub struct RoleResolver {
    users: Collection<RoleRecord>,
}

impl RoleResolver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(store, collections::USERS),
        }
    }

    /// Grants iff the user stored under `uid` has role exactly `"admin"`.
    pub async fn resolve(&self, uid: Option<&str>) -> Result<RoleCheck, StoreError> {
        let Some(uid) = uid else {
            debug!("Role check without uid");
            return Ok(RoleCheck::Denied { role: None });
        };

        let role = self
            .users
            .find_one(&Filter::new().eq("userUid", uid))
            .await?
            .and_then(|record| record.role);

        debug!("Resolved role {:?} for {}", role, uid);

        Ok(match role {
            Some(role) if role == ADMIN_ROLE => RoleCheck::Granted { role },
            role => RoleCheck::Denied { role },
        })
    }
}
