//! Typed path parameter helpers.

use bazaar_core::error::AppError;
use bazaar_core::types::{AccountId, ListingId};

/// Parses an account ID from a path segment.
pub fn parse_account_id(s: &str) -> Result<AccountId, AppError> {
    s.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid account ID: {s}")))
}

/// Parses a listing ID from a path segment.
pub fn parse_listing_id(s: &str) -> Result<ListingId, AppError> {
    s.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid listing ID: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::error::ErrorKind;

    #[test]
    fn test_parse_ids() {
        let id = AccountId::new();
        assert_eq!(parse_account_id(&id.to_string()).unwrap(), id);
        assert_eq!(
            parse_listing_id("not-a-uuid").unwrap_err().kind,
            ErrorKind::BadRequest
        );
    }
}
