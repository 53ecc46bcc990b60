//! Sort specification for listing queries.
//!
//! A sort spec is either empty (newest first) or exactly two
//! whitespace-separated tokens: `"<field> <direction>"`, for example
//! `"price ASC"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(AppError::invalid_input(format!(
                "unknown sort direction '{s}', expected ASC or DESC"
            )))
        }
    }
}

/// Listing columns a query may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation timestamp.
    CreatedAt,
    /// Listing price.
    Price,
}

impl SortField {
    /// Column name in the `listings` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            other => Err(AppError::invalid_input(format!(
                "cannot sort by '{other}', expected created_at or price"
            ))),
        }
    }
}

/// A parsed listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ListingSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a sort spec. Blank input yields the default order.
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(Self::default()),
            [field, direction] => Ok(Self {
                field: field.parse()?,
                direction: direction.parse()?,
            }),
            _ => Err(AppError::invalid_input(format!(
                "invalid sort '{spec}', expected '<field> <direction>'"
            ))),
        }
    }

    /// `ORDER BY` clause body, built from fixed column names only.
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field.column(), self.direction.as_sql())
    }
}

impl Default for ListingSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for ListingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
