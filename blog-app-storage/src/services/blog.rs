//! Blog service wiring the use cases to SQLite storage

use crate::{
    context::BlogContext,
    repositories::{SqliteBlogRepository, SqliteCategoryRepository},
    unit_of_work::SqliteUnitOfWork,
    Result,
};
use blog_app_core::{
    blog::{AuthorId, Blog, BlogId},
    category::Category,
    create_blog::{CreateBlogCommand, CreateBlogHandler},
    get_blog::{GetBlogHandler, GetBlogQuery},
    ports::CurrentUser,
    Outcome,
};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tracing::{debug, info};

/// Service for blog operations. Each call gets its own [`BlogContext`].
pub struct BlogService {
    pool: Pool<Sqlite>,
}

impl BlogService {
    /// Create a new blog service
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn repository(&self) -> SqliteBlogRepository {
        SqliteBlogRepository::new(BlogContext::new(self.pool.clone()))
    }

    /// Run the create-blog pipeline for the caller resolved by `current_user`
    pub async fn create_blog(
        &self,
        current_user: Arc<dyn CurrentUser>,
        command: CreateBlogCommand,
    ) -> blog_app_core::Result<Outcome<BlogId>> {
        info!("Creating blog: {}", command.title);

        let context = BlogContext::new(self.pool.clone());
        let handler = CreateBlogHandler::new(
            current_user,
            Arc::new(SqliteBlogRepository::new(context.clone())),
            Arc::new(SqliteUnitOfWork::new(context)),
        );
        handler.handle(command).await
    }

    /// Get blog by ID
    pub async fn get_blog(&self, id: BlogId) -> blog_app_core::Result<Outcome<Blog>> {
        debug!("Retrieving blog: {}", id);
        GetBlogHandler::new(Arc::new(self.repository()))
            .handle(GetBlogQuery { id })
            .await
    }

    /// List all blogs
    pub async fn list_blogs(&self) -> Result<Vec<Blog>> {
        self.repository().list().await
    }

    /// List blogs by author
    pub async fn list_blogs_by_author(&self, author_id: AuthorId) -> Result<Vec<Blog>> {
        self.repository().list_by_author(author_id).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.repository().count().await
    }

    /// List the categories a blog can be filed under
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        SqliteCategoryRepository::new(self.pool.clone()).list().await
    }
}
