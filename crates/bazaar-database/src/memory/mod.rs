//! In-memory stores guarded by a Tokio mutex.
//!
//! They enforce the same uniqueness and not-found rules as the
//! PostgreSQL stores and are suitable for tests and single-node demos.

pub mod account;
pub mod listing;

pub use account::MemoryAccountStore;
pub use listing::MemoryListingStore;
