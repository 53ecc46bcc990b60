//! Handle shape rules.

use bazaar_core::error::AppError;

/// Shortest accepted handle, in characters.
pub const HANDLE_MIN_LEN: usize = 3;
/// Longest accepted handle, in characters.
pub const HANDLE_MAX_LEN: usize = 50;

/// Check that a handle is 3 to 50 characters of `[A-Za-z0-9_]`.
pub fn validate_handle(handle: &str) -> Result<(), AppError> {
    if handle.trim().is_empty() {
        return Err(AppError::invalid_input("handle is required"));
    }

    let len = handle.chars().count();
    if len < HANDLE_MIN_LEN {
        return Err(AppError::invalid_input(format!(
            "handle must be at least {HANDLE_MIN_LEN} characters"
        )));
    }
    if len > HANDLE_MAX_LEN {
        return Err(AppError::invalid_input(format!(
            "handle must be at most {HANDLE_MAX_LEN} characters"
        )));
    }

    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::invalid_input(
            "handle may only contain letters, digits and underscores",
        ));
    }

    Ok(())
}
