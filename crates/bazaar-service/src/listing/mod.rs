//! Listing lifecycle and queries.

pub mod service;

pub use service::ListingEngine;
