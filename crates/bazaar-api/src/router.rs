//! Route definitions for the Bazaar HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with every route and its state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(account_routes(state.clone()))
        .merge(listing_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Registration, login and account management.
///
/// `PUT` and `DELETE` on an account sit behind the ownership gate.
fn account_routes(state: AppState) -> Router<AppState> {
    let owner_gate =
        axum_middleware::from_fn_with_state(state, middleware::auth::require_account_owner);

    Router::new()
        .route("/accounts/register", post(handlers::account::register))
        .route("/accounts/login", post(handlers::account::login))
        .route(
            "/accounts/{id}",
            get(handlers::account::get_account).merge(
                put(handlers::account::update_account)
                    .delete(handlers::account::delete_account)
                    .route_layer(owner_gate),
            ),
        )
        .route(
            "/accounts/{id}/listings",
            get(handlers::account::list_account_listings),
        )
}

/// Listing CRUD and search.
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/listings",
            get(handlers::listing::list_listings).post(handlers::listing::create_listing),
        )
        .route(
            "/listings/{id}",
            get(handlers::listing::get_listing)
                .put(handlers::listing::update_listing)
                .delete(handlers::listing::delete_listing),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
