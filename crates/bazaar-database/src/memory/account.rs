//! In-memory account store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bazaar_core::error::AppError;
use bazaar_core::result::AppResult;
use bazaar_core::types::AccountId;
use bazaar_entity::account::Account;

use crate::store::AccountStore;

/// Account store holding every record in a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }
}

fn handle_taken(accounts: &HashMap<AccountId, Account>, handle: &str, except: AccountId) -> bool {
    accounts
        .values()
        .any(|a| a.id != except && a.handle == handle)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: &Account) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        if handle_taken(&accounts, &account.handle, account.id) {
            return Err(AppError::conflict(format!(
                "Handle '{}' is already taken",
                account.handle
            )));
        }
        if accounts.contains_key(&account.id) {
            return Err(AppError::conflict(format!(
                "Account {} already exists",
                account.id
            )));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.lock().await.get(&id).cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .await
            .values()
            .find(|a| a.handle == handle)
            .cloned())
    }

    async fn update(&self, account: &Account) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        if handle_taken(&accounts, &account.handle, account.id) {
            return Err(AppError::conflict(format!(
                "Handle '{}' is already taken",
                account.handle
            )));
        }
        let stored = accounts
            .get_mut(&account.id)
            .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))?;
        stored.handle = account.handle.clone();
        stored.password_hash = account.password_hash.clone();
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        self.accounts
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }
}
