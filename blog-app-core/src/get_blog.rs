//! Get-blog-by-id query

use crate::{
    blog::{Blog, BlogId},
    outcome::Failure,
    ports::BlogRepository,
    Outcome, Result,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlogQuery {
    pub id: BlogId,
}

pub struct GetBlogHandler {
    repository: Arc<dyn BlogRepository>,
}

impl GetBlogHandler {
    pub fn new(repository: Arc<dyn BlogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetBlogQuery) -> Result<Outcome<Blog>> {
        debug!("Retrieving blog: {}", query.id);
        match self.repository.find_by_id(query.id).await? {
            Some(blog) => Ok(Outcome::ok(blog)),
            None => Ok(Failure::not_found(format!("Blog {} not found", query.id)).into()),
        }
    }
}
