//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bazaar_core::types::AccountId;

/// A registered marketplace account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Unique, case-sensitive login handle.
    pub handle: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh account with a new identifier.
    pub fn new(handle: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            handle: handle.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Redacted view safe to return to callers.
    pub fn view(&self) -> AccountView {
        AccountView::from(self)
    }
}

/// An account without its credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub handle: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            handle: account.handle.clone(),
            created_at: account.created_at,
        }
    }
}
