//! # bazaar-service
//!
//! Business rules for Bazaar. [`AccountDirectory`] owns the account
//! lifecycle; [`ListingEngine`] owns listings and the paginated query
//! path, calling the directory only to resolve owner handles.
//!
//! Services receive their stores and auth components as `Arc`s at
//! construction time. Operations that act on behalf of a caller take the
//! caller explicitly, either as a [`RequestContext`] or an optional
//! account ID for anonymous reads.

pub mod account;
pub mod context;
pub mod listing;

#[cfg(test)]
mod testing;

pub use account::{AccountDirectory, AccountUpdate, AuthSession};
pub use context::RequestContext;
pub use listing::ListingEngine;
