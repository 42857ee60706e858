//! Blog repository implementation

use crate::{context::BlogContext, Error, Result};
use async_trait::async_trait;
use blog_app_core::{
    blog::{AuthorId, Blog, BlogId},
    category::CategoryId,
    ports::BlogRepository,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, author_id, category_id, title, content, created_at, updated_at FROM blogs";

/// Repository for blog entities
pub struct SqliteBlogRepository {
    context: Arc<BlogContext>,
}

impl SqliteBlogRepository {
    /// Create a new blog repository over a request context
    pub fn new(context: Arc<BlogContext>) -> Self {
        Self { context }
    }

    /// Stage a blog for insertion by the unit of work
    pub fn stage(&self, blog: &Blog) {
        debug!("Staging blog: {} ({})", blog.title, blog.id);
        self.context.stage(blog.clone());
    }

    /// Whether a committed or staged blog has this author and title
    pub async fn exists_for_author(&self, author_id: AuthorId, title: &str) -> Result<bool> {
        debug!("Checking title uniqueness for author {}", author_id);

        if self.context.has_staged_title(author_id, title) {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM blogs WHERE author_id = ?1 AND title = ?2)",
        )
        .bind(author_id.to_string())
        .bind(title)
        .fetch_one(self.context.pool())
        .await
        .map_err(Error::Database)?;

        Ok(exists)
    }

    /// Find a blog by ID
    pub async fn find(&self, id: BlogId) -> Result<Option<Blog>> {
        debug!("Finding blog by ID: {}", id);

        let row = sqlx::query(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(self.context.pool())
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(parse_blog_from_row).transpose()
    }

    /// List all blogs, newest first
    pub async fn list(&self) -> Result<Vec<Blog>> {
        debug!("Listing all blogs");

        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
            .fetch_all(self.context.pool())
            .await
            .map_err(Error::Database)?;

        let blogs = rows
            .iter()
            .map(parse_blog_from_row)
            .collect::<Result<Vec<_>>>()?;
        debug!("Found {} blogs", blogs.len());
        Ok(blogs)
    }

    /// List blogs written by one author, newest first
    pub async fn list_by_author(&self, author_id: AuthorId) -> Result<Vec<Blog>> {
        debug!("Listing blogs by author: {}", author_id);

        let rows = sqlx::query(&format!(
            "{} WHERE author_id = ?1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(author_id.to_string())
        .fetch_all(self.context.pool())
        .await
        .map_err(Error::Database)?;

        rows.iter().map(parse_blog_from_row).collect()
    }

    /// Whether the category exists
    pub async fn has_category(&self, id: CategoryId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)")
                .bind(id.to_string())
                .fetch_one(self.context.pool())
                .await
                .map_err(Error::Database)?;
        Ok(exists)
    }

    /// Count committed blogs
    pub async fn count(&self) -> Result<i64> {
        debug!("Counting blogs");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(self.context.pool())
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn add(&self, blog: &Blog) -> blog_app_core::Result<()> {
        self.stage(blog);
        Ok(())
    }

    async fn title_exists_for_author(
        &self,
        author_id: AuthorId,
        title: &str,
    ) -> blog_app_core::Result<bool> {
        Ok(self.exists_for_author(author_id, title).await?)
    }

    async fn find_by_id(&self, id: BlogId) -> blog_app_core::Result<Option<Blog>> {
        Ok(self.find(id).await?)
    }

    async fn category_exists(&self, id: CategoryId) -> blog_app_core::Result<bool> {
        Ok(self.has_category(id).await?)
    }
}

/// Parse a blog from a `blogs` row
fn parse_blog_from_row(row: &SqliteRow) -> Result<Blog> {
    let id: String = row.try_get("id")?;
    let author_id: String = row.try_get("author_id")?;
    let category_id: Option<String> = row.try_get("category_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Blog {
        id: BlogId::from_uuid(parse_uuid("blog", &id)?),
        author_id: AuthorId::from_uuid(parse_uuid("author", &author_id)?),
        category_id: category_id
            .map(|id| parse_uuid("category", &id).map(CategoryId::from_uuid))
            .transpose()?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}

pub(super) fn parse_uuid(what: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        Error::Internal(anyhow::anyhow!("Invalid {} UUID '{}': {}", what, value, e))
    })
}

fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| {
            Error::Internal(anyhow::anyhow!(
                "Failed to parse {} '{}': {}",
                column,
                value,
                e
            ))
        })?
        .with_timezone(&Utc))
}
