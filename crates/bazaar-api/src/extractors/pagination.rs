//! Listing query parameter extractor.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use validator::Validate;

use bazaar_core::error::AppError;
use bazaar_core::types::PageRequest;
use bazaar_core::types::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE};

use crate::error::ApiError;

/// Query parameters accepted by the listing collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListingQueryParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i64,
    /// `"<created_at|price> <asc|desc>"`.
    pub sort: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

impl ListingQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.max(1) as u64,
            (self.page_size.max(1) as u64).min(MAX_PAGE_SIZE),
        )
    }

    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or("")
    }

    /// Raw price bounds keyed the way the listing engine reads them.
    pub fn price_filter(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(min) = &self.min_price {
            params.insert("min_price".to_string(), min.clone());
        }
        if let Some(max) = &self.max_price {
            params.insert("max_price".to_string(), max.clone());
        }
        params
    }
}

impl<S> FromRequestParts<S> for ListingQueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListingQueryParams>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        params
            .validate()
            .map_err(|e| AppError::invalid_input(e.to_string()))?;
        if params.page as u64 > MAX_PAGE {
            return Err(
                AppError::invalid_input(format!("page must be at most {MAX_PAGE}")).into(),
            );
        }
        Ok(params)
    }
}
