//! Price range filter for listing queries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Query key for the inclusive lower price bound.
pub const MIN_PRICE_KEY: &str = "min_price";
/// Query key for the inclusive upper price bound.
pub const MAX_PRICE_KEY: &str = "max_price";

/// Inclusive price bounds applied to a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFilter {
    /// Listings priced below this are excluded.
    pub min_price: Option<f64>,
    /// Listings priced above this are excluded.
    pub max_price: Option<f64>,
}

impl PriceFilter {
    /// Build a filter from loosely typed key/value pairs.
    ///
    /// Only `min_price` and `max_price` are recognized; other keys are
    /// ignored. A recognized key whose value is not a finite number is an
    /// `InvalidInput` error.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        Ok(Self {
            min_price: parse_bound(params, MIN_PRICE_KEY)?,
            max_price: parse_bound(params, MAX_PRICE_KEY)?,
        })
    }

    /// Whether no bound is set.
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none()
    }

    /// Whether `price` falls inside both bounds.
    pub fn matches(&self, price: f64) -> bool {
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

fn parse_bound(params: &HashMap<String, String>, key: &str) -> Result<Option<f64>, AppError> {
    let Some(raw) = params.get(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AppError::invalid_input(format!(
            "{key} must be a number, got '{raw}'"
        ))),
    }
}
