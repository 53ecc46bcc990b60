//! # bazaar-api
//!
//! HTTP API layer for Bazaar built on Axum.
//!
//! Provides the REST endpoints, authentication extractors, the account
//! ownership middleware, DTOs and the mapping of [`bazaar_core::AppError`]
//! onto HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
