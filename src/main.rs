//! Bazaar server: marketplace API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bazaar_api::AppState;
use bazaar_auth::{AccessGuard, PasswordHasher, PasswordValidator, TokenAuthority};
use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;
use bazaar_database::migration::run_migrations;
use bazaar_database::{DatabasePool, PgAccountStore, PgListingStore};
use bazaar_service::{AccountDirectory, ListingEngine};

#[tokio::main]
async fn main() {
    let env = std::env::var("BAZAAR_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Bazaar v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(db.pool()).await?;
    }

    // ── Step 2: Stores ───────────────────────────────────────────
    let accounts = Arc::new(PgAccountStore::new(db.pool().clone()));
    let listings = Arc::new(PgListingStore::new(db.pool().clone()));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let validator = Arc::new(PasswordValidator::new());
    let tokens = Arc::new(TokenAuthority::new(&config.auth));
    let guard = Arc::new(AccessGuard::new(Arc::clone(&tokens)));

    // ── Step 4: Services ─────────────────────────────────────────
    let directory = Arc::new(AccountDirectory::new(accounts, hasher, validator, tokens));
    let engine = Arc::new(ListingEngine::new(listings, Arc::clone(&directory)));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::new(config),
        db: Some(db.clone()),
        guard,
        directory,
        listings: engine,
    };

    bazaar_api::app::run_server(state, shutdown_signal()).await?;

    db.close().await;
    tracing::info!("Bazaar server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
