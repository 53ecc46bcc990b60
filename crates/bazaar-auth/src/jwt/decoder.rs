//! Identity token validation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use bazaar_core::config::auth::AuthConfig;
use bazaar_core::error::{AppError, ErrorKind};
use bazaar_core::types::AccountId;

/// Claims as they arrive on the wire, before the subject is trusted.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

/// Token header fields read before signature verification.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

const HMAC_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Verifies identity tokens and extracts the account they were issued to.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Any HMAC algorithm is accepted. Expiry is checked without leeway.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validates `token` and returns the account ID it carries.
    pub fn validate(&self, token: &str) -> Result<AccountId, AppError> {
        if let Some(alg) = header_algorithm(token) {
            if !HMAC_ALGORITHMS.contains(&alg.as_str()) {
                return Err(AppError::new(
                    ErrorKind::TokenSignatureInvalid,
                    format!("unexpected signing method: {alg}"),
                ));
            }
        }

        let data = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;

        let subject = match data.claims.sub {
            Some(serde_json::Value::String(subject)) => subject,
            Some(_) => return Err(claim_invalid("token subject is not a string")),
            None => return Err(claim_invalid("token has no subject")),
        };

        let account_id: AccountId = subject
            .parse()
            .map_err(|_| claim_invalid("token subject is not an account ID"))?;
        if account_id.is_nil() {
            return Err(claim_invalid("token subject is the nil account"));
        }

        Ok(account_id)
    }
}

/// The `alg` of a readable token header, or `None` if the header does not decode.
fn header_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = BASE64_URL.decode(segment.trim_end_matches('=')).ok()?;
    let header: RawHeader = serde_json::from_slice(&bytes).ok()?;
    Some(header.alg)
}

fn claim_invalid(message: &str) -> AppError {
    AppError::new(ErrorKind::TokenClaimInvalid, message)
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AppError {
    let kind = match e.kind() {
        JwtErrorKind::ExpiredSignature => ErrorKind::TokenExpired,
        JwtErrorKind::InvalidSignature
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidAlgorithmName
        | JwtErrorKind::MissingAlgorithm => ErrorKind::TokenSignatureInvalid,
        JwtErrorKind::MissingRequiredClaim(_) | JwtErrorKind::ImmatureSignature => {
            ErrorKind::TokenClaimInvalid
        }
        _ => ErrorKind::TokenMalformed,
    };
    AppError::with_source(kind, format!("Token validation failed: {e}"), e)
}
