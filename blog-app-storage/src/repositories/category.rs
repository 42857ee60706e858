//! Category repository implementation

use super::blog::parse_uuid;
use crate::{Error, Result};
use blog_app_core::category::{Category, CategoryId};
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};
use tracing::debug;

/// Read-only repository for categories
pub struct SqliteCategoryRepository {
    pool: Pool<Sqlite>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<Category>> {
        debug!("Listing categories");

        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(parse_category_from_row).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }
}

fn parse_category_from_row(row: &SqliteRow) -> Result<Category> {
    let id: String = row.try_get("id")?;
    Ok(Category {
        id: CategoryId::from_uuid(parse_uuid("category", &id)?),
        name: row.try_get("name")?,
    })
}
