//! Password policy enforcement for new passwords.

use bazaar_core::error::AppError;

/// Symbols that satisfy the "one special character" rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Checks new passwords against the fixed strength policy: 8 to 100
/// characters with at least one ASCII letter, one digit and one symbol
/// from [`SPECIAL_CHARACTERS`].
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    pub fn new() -> Self {
        Self {
            min_length: 8,
            max_length: 100,
        }
    }

    /// Returns the first violated rule as a `WeakCredential` error.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let len = password.chars().count();
        if len < self.min_length {
            return Err(AppError::weak_credential(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if len > self.max_length {
            return Err(AppError::weak_credential(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::weak_credential(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::weak_credential(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(AppError::weak_credential(format!(
                "Password must contain at least one of {SPECIAL_CHARACTERS}"
            )));
        }

        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}
