//! Collaborator traits consumed by the use cases
//!
//! Implementations are supplied explicitly through handler constructors.
//! Every async method is a suspension point; dropping the returned future
//! cancels the call.

use crate::{
    blog::{AuthorId, Blog, BlogId},
    category::CategoryId,
    Result,
};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Resolves the author acting on the current request
#[cfg_attr(test, automock)]
pub trait CurrentUser: Send + Sync {
    /// Identifier of the authenticated caller. Returns
    /// [`crate::Error::Unauthenticated`] when there is none.
    fn author_id(&self) -> Result<AuthorId>;
}

/// Blog persistence collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Stage a blog for insertion. Nothing is durable until
    /// [`UnitOfWork::save_changes`] succeeds.
    async fn add(&self, blog: &Blog) -> Result<()>;

    /// Whether a blog with exactly this author and title already exists
    async fn title_exists_for_author(&self, author_id: AuthorId, title: &str) -> Result<bool>;

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>>;

    async fn category_exists(&self, id: CategoryId) -> Result<bool>;
}

/// Commits staged writes atomically
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Commit all staged writes, returning the number of rows written
    async fn save_changes(&self) -> Result<u64>;
}
