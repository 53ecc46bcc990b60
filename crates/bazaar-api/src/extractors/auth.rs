//! `AuthUser` and `MaybeAuthUser` extractors: run the bearer token through
//! the access guard and inject the caller's context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use bazaar_core::error::AppError;
use bazaar_core::types::AccountId;
use bazaar_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, available in handlers of protected routes.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(AuthUser(*ctx));
        }

        let account_id = state.guard.authenticate(authorization(parts)?)?;
        let ctx = RequestContext::new(account_id);
        parts.extensions.insert(ctx);
        Ok(AuthUser(ctx))
    }
}

/// Caller on routes where authentication is optional.
///
/// An absent `Authorization` header yields `None`; a header that is present
/// but does not authenticate is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    pub fn account_id(&self) -> Option<AccountId> {
        self.0.map(|ctx| ctx.account_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        Ok(MaybeAuthUser(Some(ctx)))
    }
}

pub(crate) fn authorization(parts: &Parts) -> Result<Option<&str>, AppError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map_err(|_| AppError::unauthenticated("authorization header is not valid text"))
        })
        .transpose()
}
