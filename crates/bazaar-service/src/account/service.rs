//! Registration, login and self-service account management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bazaar_auth::jwt::TokenAuthority;
use bazaar_auth::password::{PasswordHasher, PasswordValidator};
use bazaar_core::error::{AppError, ErrorKind};
use bazaar_core::types::AccountId;
use bazaar_database::store::AccountStore;
use bazaar_entity::account::{Account, AccountView, validate_handle};

use crate::context::RequestContext;

/// An account together with a freshly issued identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub account: AccountView,
    pub token: String,
}

/// Requested changes to an account. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub handle: Option<String>,
    pub password: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.handle.is_none() && self.password.is_none()
    }
}

/// Owns the account lifecycle. The only component that sees password hashes.
#[derive(Clone)]
pub struct AccountDirectory {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    tokens: Arc<TokenAuthority>,
}

impl std::fmt::Debug for AccountDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountDirectory").finish_non_exhaustive()
    }
}

impl AccountDirectory {
    /// Creates a new account directory.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        tokens: Arc<TokenAuthority>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            validator,
            tokens,
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// Fails with `WeakCredential` for a password outside the policy,
    /// `Conflict` for a taken handle and `InvalidInput` for a malformed one.
    pub async fn register(&self, handle: &str, password: &str) -> Result<AuthSession, AppError> {
        self.validator.validate(password)?;

        if self.accounts.find_by_handle(handle).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Handle '{handle}' is already taken"
            )));
        }

        validate_handle(handle)?;
        let password_hash = self.hasher.hash(password)?;

        let account = Account::new(handle, password_hash);
        self.accounts.insert(&account).await?;

        let token = self.tokens.issue(account.id)?;
        info!(account_id = %account.id, handle = %account.handle, "Account registered");

        Ok(AuthSession {
            account: account.view(),
            token,
        })
    }

    /// Verifies credentials and issues a fresh token.
    ///
    /// Fails with `NotFound` for an unknown handle and `Unauthorized` for a
    /// wrong password.
    pub async fn login(&self, handle: &str, password: &str) -> Result<AuthSession, AppError> {
        let account = self
            .accounts
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account '{handle}' not found")))?;

        self.hasher
            .verify(&account.password_hash, password)
            .map_err(|e| {
                if e.kind == ErrorKind::CredentialMismatch {
                    warn!(account_id = %account.id, "Login rejected: wrong password");
                    e.wrap(ErrorKind::Unauthorized, "invalid handle or password")
                } else {
                    e
                }
            })?;

        let token = self.tokens.issue(account.id)?;
        info!(account_id = %account.id, "Account logged in");

        Ok(AuthSession {
            account: account.view(),
            token,
        })
    }

    /// Returns the public view of an account.
    pub async fn get(&self, id: AccountId) -> Result<AccountView, AppError> {
        self.find(id).await.map(|account| account.view())
    }

    /// Changes the caller's own handle and/or password.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<(), AppError> {
        ensure_self(ctx, id)?;
        if update.is_empty() {
            return Err(AppError::invalid_input(
                "nothing to update: supply a handle or a password",
            ));
        }

        let mut account = self.find(id).await?;

        if let Some(handle) = update.handle {
            if handle != account.handle {
                if self.accounts.find_by_handle(&handle).await?.is_some() {
                    return Err(AppError::conflict(format!(
                        "Handle '{handle}' is already taken"
                    )));
                }
                account.handle = handle;
            }
        }

        if let Some(password) = update.password {
            self.validator.validate(&password)?;
            account.password_hash = self.hasher.hash(&password)?;
        }

        validate_handle(&account.handle)?;
        self.accounts.update(&account).await?;

        info!(account_id = %account.id, handle = %account.handle, "Account updated");
        Ok(())
    }

    /// Deletes the caller's own account.
    pub async fn delete(&self, ctx: &RequestContext, id: AccountId) -> Result<(), AppError> {
        ensure_self(ctx, id)?;
        self.accounts.delete(id).await?;
        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    async fn find(&self, id: AccountId) -> Result<Account, AppError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }
}

fn ensure_self(ctx: &RequestContext, id: AccountId) -> Result<(), AppError> {
    if ctx.account_id != id {
        warn!(caller = %ctx.account_id, target = %id, "Rejected change to another account");
        return Err(AppError::unauthorized(
            "you can only change your own account",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    const PASSWORD: &str = "Passw0rd!";

    #[tokio::test]
    async fn test_register_then_login() {
        let h = Harness::new();
        let registered = h.directory.register("alice", PASSWORD).await.unwrap();
        let logged_in = h.directory.login("alice", PASSWORD).await.unwrap();

        assert_eq!(registered.account.id, logged_in.account.id);
        assert_eq!(
            h.tokens.validate(&registered.token).unwrap(),
            registered.account.id
        );
        assert_eq!(
            h.tokens.validate(&logged_in.token).unwrap(),
            registered.account.id
        );
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let h = Harness::new();
        let err = h.directory.register("alice", "password").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::WeakCredential);
        assert_eq!(h.accounts.len().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_handle() {
        let h = Harness::new();
        h.directory.register("alice", PASSWORD).await.unwrap();
        let err = h.directory.register("alice", PASSWORD).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_bad_handle() {
        let h = Harness::new();
        for handle in ["al", "has space", "dash-ed"] {
            let err = h.directory.register(handle, PASSWORD).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput, "handle {handle:?}");
        }
    }

    #[tokio::test]
    async fn test_login_unknown_and_wrong_password() {
        let h = Harness::new();
        h.directory.register("alice", PASSWORD).await.unwrap();

        let err = h.directory.login("bob", PASSWORD).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = h.directory.login("alice", "Wr0ng!pass").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_update_handle_and_password() {
        let h = Harness::new();
        let session = h.directory.register("alice", PASSWORD).await.unwrap();
        let id = session.account.id;
        let ctx = RequestContext::new(id);

        h.directory
            .update(
                &ctx,
                id,
                AccountUpdate {
                    handle: Some("alice_2".to_string()),
                    password: Some("N3w-pass!".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(h.directory.get(id).await.unwrap().handle, "alice_2");
        assert!(h.directory.login("alice_2", "N3w-pass!").await.is_ok());
        assert_eq!(
            h.directory.login("alice", PASSWORD).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_update_requires_some_field() {
        let h = Harness::new();
        let id = h.directory.register("alice", PASSWORD).await.unwrap().account.id;
        let err = h
            .directory
            .update(&RequestContext::new(id), id, AccountUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_update_to_taken_handle() {
        let h = Harness::new();
        h.directory.register("alice", PASSWORD).await.unwrap();
        let bob = h.directory.register("bobby", PASSWORD).await.unwrap().account.id;

        let err = h
            .directory
            .update(
                &RequestContext::new(bob),
                bob,
                AccountUpdate {
                    handle: Some("alice".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_handle_and_weak_password() {
        let h = Harness::new();
        let id = h.directory.register("alice", PASSWORD).await.unwrap().account.id;
        let ctx = RequestContext::new(id);

        let err = h
            .directory
            .update(
                &ctx,
                id,
                AccountUpdate {
                    handle: Some("no spaces allowed".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);

        let err = h
            .directory
            .update(
                &ctx,
                id,
                AccountUpdate {
                    handle: None,
                    password: Some("short".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::WeakCredential);
    }

    #[tokio::test]
    async fn test_update_and_delete_other_account_unauthorized() {
        let h = Harness::new();
        let alice = h.directory.register("alice", PASSWORD).await.unwrap().account.id;
        let mallory = RequestContext::new(AccountId::new());

        let err = h
            .directory
            .update(
                &mallory,
                alice,
                AccountUpdate {
                    handle: Some("pwned".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = h.directory.delete(&mallory, alice).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(h.directory.get(alice).await.unwrap().handle, "alice");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let h = Harness::new();
        let id = h.directory.register("alice", PASSWORD).await.unwrap().account.id;
        let ctx = RequestContext::new(id);

        h.directory.delete(&ctx, id).await.unwrap();
        assert_eq!(
            h.directory.get(id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            h.directory.delete(&ctx, id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
