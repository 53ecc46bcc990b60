//! PostgreSQL account store.

use async_trait::async_trait;
use sqlx::PgPool;

use bazaar_core::error::AppError;
use bazaar_core::result::AppResult;
use bazaar_core::types::AccountId;
use bazaar_entity::account::Account;

use crate::store::AccountStore;

/// Unique constraint on `accounts.handle`.
const HANDLE_CONSTRAINT: &str = "accounts_handle_key";

/// Account store backed by the `accounts` table.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, handle: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(HANDLE_CONSTRAINT) => {
            AppError::conflict(format!("Handle '{handle}' is already taken"))
        }
        _ => AppError::store(format!("Failed to {action} account"), e),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, account: &Account) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO accounts (id, handle, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(account.id)
        .bind(&account.handle)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account.handle, "insert"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, handle, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to find account by id", e))
    }

    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, handle, password_hash, created_at FROM accounts WHERE handle = $1",
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to find account by handle", e))
    }

    async fn update(&self, account: &Account) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE accounts SET handle = $2, password_hash = $3 WHERE id = $1")
                .bind(account.id)
                .bind(&account.handle)
                .bind(&account.password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error(e, &account.handle, "update"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Account {} not found",
                account.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to delete account", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }
}
