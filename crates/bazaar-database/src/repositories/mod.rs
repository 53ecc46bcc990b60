//! PostgreSQL store implementations.

pub mod account;
pub mod listing;

pub use account::PgAccountStore;
pub use listing::PgListingStore;
