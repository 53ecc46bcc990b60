//! Shared fixtures for service tests.

use std::sync::Arc;

use bazaar_auth::jwt::TokenAuthority;
use bazaar_auth::password::{PasswordHasher, PasswordValidator};
use bazaar_core::config::auth::AuthConfig;
use bazaar_database::memory::{MemoryAccountStore, MemoryListingStore};

use crate::account::AccountDirectory;
use crate::listing::ListingEngine;

pub(crate) struct Harness {
    pub accounts: MemoryAccountStore,
    pub listings: MemoryListingStore,
    pub tokens: Arc<TokenAuthority>,
    pub directory: Arc<AccountDirectory>,
    pub engine: ListingEngine,
}

impl Harness {
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "service-test-secret".to_string(),
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            ..AuthConfig::default()
        };
        let accounts = MemoryAccountStore::new();
        let listings = MemoryListingStore::new();
        let tokens = Arc::new(TokenAuthority::new(&config));
        let directory = Arc::new(AccountDirectory::new(
            Arc::new(accounts.clone()),
            Arc::new(PasswordHasher::new(&config).expect("argon2 params")),
            Arc::new(PasswordValidator::new()),
            tokens.clone(),
        ));
        let engine = ListingEngine::new(Arc::new(listings.clone()), directory.clone());

        Self {
            accounts,
            listings,
            tokens,
            directory,
            engine,
        }
    }
}
