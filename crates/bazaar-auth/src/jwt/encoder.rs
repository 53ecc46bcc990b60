//! Identity token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use bazaar_core::config::auth::AuthConfig;
use bazaar_core::error::AppError;
use bazaar_core::types::AccountId;

use super::claims::Claims;

/// Signs identity tokens with HS256.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(config.token_ttl_hours as i64),
        }
    }

    /// Issues a token for `account_id`, valid from now for the configured TTL.
    pub fn issue(&self, account_id: AccountId) -> Result<String, AppError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issues a token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        account_id: AccountId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if account_id.is_nil() {
            return Err(AppError::invalid_input(
                "cannot issue a token for the nil account",
            ));
        }

        let claims = Claims::new(account_id, issued_at, issued_at + self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode identity token: {e}")))
    }
}
