//! Authentication and ownership gates.
//!
//! The HTTP layer runs [`AccessGuard::authenticate`] on every protected
//! route and [`AccessGuard::authorize_owner`] on routes whose path ID is
//! itself an account ID. Listing ownership is checked by the listing
//! service against the stored owner instead.

use std::sync::Arc;

use tracing::debug;

use bazaar_core::error::{AppError, ErrorKind};
use bazaar_core::types::AccountId;

use crate::jwt::TokenAuthority;

/// Expected scheme of the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// Derives the caller from a bearer credential and enforces ownership.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    tokens: Arc<TokenAuthority>,
}

impl AccessGuard {
    pub fn new(tokens: Arc<TokenAuthority>) -> Self {
        Self { tokens }
    }

    /// Authentication gate.
    ///
    /// `authorization` is the raw header value. Any failure, including a
    /// token that does not validate, is reported as `Unauthenticated` with
    /// the underlying token error as its source.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AccountId, AppError> {
        let header = authorization
            .ok_or_else(|| AppError::unauthenticated("missing authorization header"))?;
        let token = parse_bearer(header)?;

        self.tokens.validate(token).map_err(|e| {
            debug!(error = %e, "Bearer token rejected");
            e.wrap(ErrorKind::Unauthenticated, "invalid or expired token")
        })
    }

    /// Ownership gate for account-scoped routes.
    ///
    /// `claimed` is the raw path parameter. Fails with `BadRequest` when it
    /// is not an account ID and `Forbidden` when it names another account.
    pub fn authorize_owner(&self, caller: AccountId, claimed: &str) -> Result<AccountId, AppError> {
        let claimed: AccountId = claimed
            .parse()
            .map_err(|_| AppError::bad_request(format!("'{claimed}' is not a valid account ID")))?;

        if claimed != caller {
            return Err(AppError::forbidden(
                "you can only modify your own account",
            ));
        }
        Ok(claimed)
    }
}

/// Splits `"Bearer <token>"` into its token, rejecting anything else.
pub fn parse_bearer(header: &str) -> Result<&str, AppError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Ok(token)
        }
        _ => Err(AppError::unauthenticated(
            "authorization header must be 'Bearer <token>'",
        )),
    }
}
