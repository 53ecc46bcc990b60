//! Convenience result type alias for Bazaar.

use crate::error::AppError;

/// A specialized `Result` type for Bazaar operations.
pub type AppResult<T> = Result<T, AppError>;
