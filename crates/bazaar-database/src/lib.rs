//! # bazaar-database
//!
//! Store contracts for accounts and listings, their PostgreSQL
//! implementations, in-memory implementations for tests and local runs,
//! and connection/migration bootstrapping.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryAccountStore, MemoryListingStore};
pub use repositories::{PgAccountStore, PgListingStore};
pub use store::{AccountStore, ListingQuery, ListingStore};
