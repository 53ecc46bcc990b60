//! Account lifecycle.

pub mod service;

pub use service::{AccountDirectory, AccountUpdate, AuthSession};
