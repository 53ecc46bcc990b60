//! # bazaar-entity
//!
//! Domain entity models for Bazaar. Database entities derive
//! `sqlx::FromRow`; the `*View` types are what leaves the service layer.

pub mod account;
pub mod listing;
