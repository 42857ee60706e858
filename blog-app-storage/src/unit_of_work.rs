//! Unit of work committing staged blogs in one transaction

use crate::{context::BlogContext, Error, Result};
use async_trait::async_trait;
use blog_app_core::ports::UnitOfWork;
use std::sync::Arc;
use tracing::{debug, info};

/// Name reported when the (author, title) unique index rejects an insert
pub const AUTHOR_TITLE_CONSTRAINT: &str = "idx_blogs_author_title";

pub struct SqliteUnitOfWork {
    context: Arc<BlogContext>,
}

impl SqliteUnitOfWork {
    pub fn new(context: Arc<BlogContext>) -> Self {
        Self { context }
    }

    /// Write every staged blog inside a single transaction.
    ///
    /// Staged work is consumed whether or not the commit succeeds. If the
    /// returned future is dropped before completion the transaction is
    /// rolled back and nothing becomes visible.
    pub async fn commit(&self) -> Result<u64> {
        let pending = self.context.take_pending();
        if pending.is_empty() {
            debug!("No staged changes to save");
            return Ok(0);
        }

        let mut tx = self.context.pool().begin().await?;
        let mut written = 0u64;

        for blog in &pending {
            let result = sqlx::query(
                r#"
                INSERT INTO blogs (id, author_id, category_id, title, content, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(blog.id.to_string())
            .bind(blog.author_id.to_string())
            .bind(blog.category_id.map(|id| id.to_string()))
            .bind(&blog.title)
            .bind(&blog.content)
            .bind(blog.created_at.to_rfc3339())
            .bind(blog.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::from_sqlx(
                    e,
                    AUTHOR_TITLE_CONSTRAINT,
                    format!("Blog title '{}' already exists for author", blog.title),
                )
            })?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        info!("Saved {} staged blog(s)", written);
        Ok(written)
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn save_changes(&self) -> blog_app_core::Result<u64> {
        Ok(self.commit().await?)
    }
}
