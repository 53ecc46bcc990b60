//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use bazaar_core::error::AppError;

/// Apply every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::store(format!("Failed to run migrations: {e}"), e))?;

    info!("Database migrations completed");
    Ok(())
}
