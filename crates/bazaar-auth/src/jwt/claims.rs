//! Claims embedded in an identity token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::types::AccountId;

/// Payload of an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account the token was issued to.
    pub sub: AccountId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    pub fn new(account_id: AccountId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: account_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}
