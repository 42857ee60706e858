//! Database migration utilities

use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Apply all embedded migrations to `pool`
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Migration(e.to_string()))?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Latest applied migration version, if any migration has run
pub async fn current_version(pool: &SqlitePool) -> Result<Option<i64>> {
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if table_exists == 0 {
        return Ok(None);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;
    Ok(version)
}

/// Check if migrations are needed
pub async fn needs_migration(pool: &SqlitePool) -> Result<bool> {
    let latest = sqlx::migrate!("./migrations")
        .iter()
        .map(|m| m.version)
        .max();
    let current = current_version(pool).await?;
    Ok(latest != current)
}
