//! Create-blog use case
//!
//! Sequence: resolve author, build the candidate, validate, check that the
//! category (if any) exists and that the title is unused by this author,
//! stage the insert, commit. Expected
//! failures come back as [`Outcome::Error`]; faults from collaborators are
//! propagated as `Err`.

use crate::{
    blog::{Blog, BlogId},
    category::CategoryId,
    outcome::Failure,
    ports::{BlogRepository, CurrentUser, UnitOfWork},
    Error, Outcome, Result,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Untrusted create request. The author is never taken from the request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateBlogCommand {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl CreateBlogCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(title: S1, content: S2) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Handler for [`CreateBlogCommand`]
pub struct CreateBlogHandler {
    current_user: Arc<dyn CurrentUser>,
    repository: Arc<dyn BlogRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateBlogHandler {
    pub fn new(
        current_user: Arc<dyn CurrentUser>,
        repository: Arc<dyn BlogRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            current_user,
            repository,
            unit_of_work,
        }
    }

    /// Create one blog and return its identifier
    pub async fn handle(&self, command: CreateBlogCommand) -> Result<Outcome<BlogId>> {
        let author_id = self.current_user.author_id()?;
        let blog = Blog::draft(author_id, command.title, command.content)
            .with_category(command.category_id);
        debug!("Creating blog {} for author {}", blog.id, author_id);

        let validation = blog.validate();
        if let Some(failure) = validation.failure() {
            warn!("Blog rejected for author {}: {}", author_id, failure);
            return Ok(failure.clone().into());
        }

        if let Some(category_id) = blog.category_id {
            if !self.repository.category_exists(category_id).await? {
                warn!("Unknown category {} for author {}", category_id, author_id);
                return Ok(Failure::validation("category invalid").into());
            }
        }

        if self
            .repository
            .title_exists_for_author(author_id, &blog.title)
            .await?
        {
            warn!("Duplicate blog title for author {}", author_id);
            return Ok(duplicate_title(&blog.title).into());
        }

        self.repository.add(&blog).await?;

        match self.unit_of_work.save_changes().await {
            Ok(_) => {}
            Err(Error::ConstraintViolation { constraint, .. }) => {
                warn!(
                    "Blog insert for author {} hit constraint {}",
                    author_id, constraint
                );
                return Ok(duplicate_title(&blog.title).into());
            }
            Err(e) => return Err(e),
        }

        info!("Created blog {} for author {}", blog.id, author_id);
        Ok(Outcome::ok(blog.id))
    }
}

fn duplicate_title(title: &str) -> Failure {
    Failure::conflict(format!(
        "A blog titled '{}' already exists for this author",
        title
    ))
}
