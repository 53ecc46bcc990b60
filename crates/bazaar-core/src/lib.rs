//! # bazaar-core
//!
//! Core crate for the Bazaar marketplace API. Contains configuration
//! schemas, typed identifiers, pagination/sorting/filter types for the
//! listing query path, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Bazaar crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
