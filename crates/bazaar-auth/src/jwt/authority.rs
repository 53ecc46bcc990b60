//! Issue and validate identity tokens with one shared secret.

use bazaar_core::config::auth::AuthConfig;
use bazaar_core::error::AppError;
use bazaar_core::types::AccountId;

use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;

/// Pairs an encoder and a decoder built from the same configuration.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenAuthority {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Issues a signed token for `account_id` expiring after the configured TTL.
    pub fn issue(&self, account_id: AccountId) -> Result<String, AppError> {
        self.encoder.issue(account_id)
    }

    /// Returns the account a token was issued to.
    ///
    /// Fails with one of the `Token*` error kinds.
    pub fn validate(&self, token: &str) -> Result<AccountId, AppError> {
        self.decoder.validate(token)
    }

    pub fn encoder(&self) -> &JwtEncoder {
        &self.encoder
    }
}
