//! Core type definitions used across the Bazaar workspace.

pub mod filter;
pub mod id;
pub mod pagination;
pub mod sorting;

pub use filter::PriceFilter;
pub use id::{AccountId, ListingId};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{ListingSort, SortDirection, SortField};
