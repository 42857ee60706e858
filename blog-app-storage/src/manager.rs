//! Storage manager owning the connection pool

use crate::{
    context::BlogContext,
    migrations,
    repositories::{SqliteBlogRepository, SqliteCategoryRepository},
    services::BlogService,
    Error, Result,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::{str::FromStr, sync::Arc};
use tracing::{info, warn};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub migrate_on_startup: bool,
}

/// Main storage manager handing out blog services over a shared pool
pub struct StorageManager {
    pool: Pool<Sqlite>,
    blogs: Arc<BlogService>,
}

impl StorageManager {
    /// Create a new storage manager
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database: {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(Error::Database)?
            .create_if_missing(true);

        // Every connection to ":memory:" opens its own database
        let max_connections = if config.url.contains(":memory:") {
            1
        } else {
            config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Database connection established");

        let manager = Self {
            blogs: Arc::new(BlogService::new(pool.clone())),
            pool,
        };

        if config.migrate_on_startup {
            manager.migrate().await?;
        } else if manager.migration_pending().await? {
            warn!("Database schema is behind; run migrations before serving requests");
        }

        Ok(manager)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Whether embedded migrations have not all been applied
    pub async fn migration_pending(&self) -> Result<bool> {
        migrations::needs_migration(&self.pool).await
    }

    /// Get blog service
    pub fn blog_service(&self) -> Arc<BlogService> {
        self.blogs.clone()
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let blogs_count = SqliteBlogRepository::new(BlogContext::new(self.pool.clone()))
            .count()
            .await?;
        let categories_count = SqliteCategoryRepository::new(self.pool.clone())
            .count()
            .await?;

        Ok(DatabaseStats {
            blogs_count,
            categories_count,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub blogs_count: i64,
    pub categories_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config(migrate_on_startup: bool) -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(10),
            migrate_on_startup,
        }
    }

    #[tokio::test]
    async fn test_in_memory_manager_migrates_and_reports_stats() {
        let manager = StorageManager::new(&memory_config(true)).await.unwrap();

        manager.health_check().await.unwrap();
        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.blogs_count, 0);
        assert_eq!(stats.categories_count, 3);
        assert!(!manager.migration_pending().await.unwrap());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let manager = StorageManager::new(&memory_config(false)).await.unwrap();
        assert!(manager.migration_pending().await.unwrap());

        manager.migrate().await.unwrap();
        manager.migrate().await.unwrap();
        assert!(!manager.migration_pending().await.unwrap());
    }

    #[tokio::test]
    async fn test_creates_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blogs.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: None,
            migrate_on_startup: true,
        };

        let manager = StorageManager::new(&config).await.unwrap();
        manager.health_check().await.unwrap();
        assert!(path.exists());
    }
}
