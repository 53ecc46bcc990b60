//! Listing entity, its input shapes and field rules.

pub mod model;
pub mod validation;

pub use model::{Listing, ListingPatch, ListingView, NewListing};
