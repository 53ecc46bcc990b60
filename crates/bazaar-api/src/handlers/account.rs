//! Account handlers: register, login, get, update, delete, list owned listings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bazaar_core::types::PageResponse;
use bazaar_entity::account::AccountView;
use bazaar_entity::listing::ListingView;
use bazaar_service::AuthSession;

use crate::dto::request::{LoginRequest, RegisterRequest, UpdateAccountRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::path::parse_account_id;
use crate::extractors::{AuthUser, ListingQueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/accounts/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = state.directory.register(&req.handle, &req.password).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session))))
}

/// POST /api/accounts/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    let session = state.directory.login(&req.handle, &req.password).await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// GET /api/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountView>>, ApiError> {
    let id = parse_account_id(&id)?;
    let account = state.directory.get(id).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// PUT /api/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAccountRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;
    state.directory.update(&auth, id, req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;
    state.directory.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/accounts/{id}/listings
pub async fn list_account_listings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    params: ListingQueryParams,
) -> Result<Json<ApiResponse<PageResponse<ListingView>>>, ApiError> {
    let owner_id = parse_account_id(&id)?;
    let page = state
        .listings
        .list_by_owner(
            owner_id,
            params.page_request(),
            params.sort(),
            &params.price_filter(),
            Some(auth.account_id),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
