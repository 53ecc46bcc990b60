//! Account entity and handle rules.

pub mod model;
pub mod validation;

pub use model::{Account, AccountView};
pub use validation::validate_handle;
