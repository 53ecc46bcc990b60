//! Listing handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bazaar_core::types::PageResponse;
use bazaar_entity::listing::ListingView;

use crate::dto::request::{CreateListingRequest, UpdateListingRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::path::parse_listing_id;
use crate::extractors::{AuthUser, ListingQueryParams, MaybeAuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/listings
pub async fn list_listings(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    params: ListingQueryParams,
) -> Result<Json<ApiResponse<PageResponse<ListingView>>>, ApiError> {
    let page = state
        .listings
        .list(
            params.page_request(),
            params.sort(),
            &params.price_filter(),
            caller.account_id(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ListingView>>, ApiError> {
    let id = parse_listing_id(&id)?;
    let listing = state.listings.get(id, caller.account_id()).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// POST /api/listings
pub async fn create_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateListingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ListingView>>), ApiError> {
    let listing = state.listings.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(listing))))
}

/// PUT /api/listings/{id}
pub async fn update_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateListingRequest>,
) -> Result<Json<ApiResponse<ListingView>>, ApiError> {
    let id = parse_listing_id(&id)?;
    let listing = state.listings.edit(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// DELETE /api/listings/{id}
pub async fn delete_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_listing_id(&id)?;
    state.listings.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
