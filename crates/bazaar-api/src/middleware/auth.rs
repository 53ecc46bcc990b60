//! Ownership gate for routes whose path ID is itself an account ID.

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use bazaar_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::auth::authorization;
use crate::state::AppState;

/// Authenticates the caller and rejects the request unless `{id}` is the
/// caller's own account.
///
/// The caller's context is stored in the request extensions, where the
/// `AuthUser` extractor picks it up without validating the token again.
pub async fn require_account_owner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let caller = state.guard.authenticate(authorization(&parts)?)?;
    state.guard.authorize_owner(caller, &id)?;

    parts.extensions.insert(RequestContext::new(caller));
    Ok(next.run(Request::from_parts(parts, body)).await)
}
