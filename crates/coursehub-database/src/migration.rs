//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use coursehub_core::error::{AppError, ErrorKind};

/// Apply every pending migration embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations applied");
    Ok(())
}
