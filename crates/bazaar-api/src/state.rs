//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bazaar_auth::AccessGuard;
use bazaar_core::config::AppConfig;
use bazaar_database::DatabasePool;
use bazaar_service::{AccountDirectory, ListingEngine};

/// Shared dependencies handed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; `None` when running over in-memory stores.
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    pub guard: Arc<AccessGuard>,

    // ── Services ─────────────────────────────────────────────
    pub directory: Arc<AccountDirectory>,
    pub listings: Arc<ListingEngine>,
}
