//! Blog aggregate and identifier types
//!
//! A [`Blog`] is created once by the create-blog pipeline and is not
//! mutated afterwards. Construction never normalizes its inputs: whatever
//! title and content are supplied are exactly what is stored.
//!
//! # Examples
//!
//! ```rust
//! use blog_app_core::blog::{AuthorId, Blog};
//!
//! let author = AuthorId::new();
//! let blog = Blog::draft(author, "Hello", "First post");
//!
//! assert_eq!(blog.author_id, author);
//! assert_eq!(blog.created_at, blog.updated_at);
//! assert!(blog.validate().is_ok());
//! ```

use crate::{category::CategoryId, outcome::Failure, Error, Outcome, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, globally unique blog identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for BlogId {
    fn default() -> Self {
        Self(Uuid::nil())
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlogId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of the author owning a blog. The nil value means "no author".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(Uuid);

impl AuthorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AuthorId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Blog aggregate root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Build a candidate blog with a fresh id, stamped with the current time.
    /// The candidate is not validated; call [`Blog::validate`] before persisting.
    pub fn draft<S1, S2>(author_id: AuthorId, title: S1, content: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let now = Utc::now();
        Self {
            id: BlogId::new(),
            title: title.into(),
            content: content.into(),
            author_id,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// File the blog under a category
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Check the aggregate invariants, stopping at the first violation
    pub fn validate(&self) -> Outcome {
        if self.author_id.is_nil() {
            return Failure::validation("author id invalid").into();
        }
        if self.title.trim().is_empty() {
            return Failure::validation("title invalid").into();
        }
        Outcome::ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    #[test]
    fn test_draft_round_trips_inputs() {
        let author = AuthorId::new();
        let blog = Blog::draft(author, "  Padded Title ", "");

        assert_eq!(blog.title, "  Padded Title ");
        assert_eq!(blog.content, "");
        assert_eq!(blog.author_id, author);
        assert!(!blog.id.is_nil());
        assert!(blog.category_id.is_none());
        assert_eq!(blog.created_at, blog.updated_at);
    }

    #[test]
    fn test_with_category() {
        let category = CategoryId::new();
        let blog = Blog::draft(AuthorId::new(), "Filed", "").with_category(Some(category));
        assert_eq!(blog.category_id, Some(category));
    }

    #[test]
    fn test_draft_ids_are_unique() {
        let author = AuthorId::new();
        let first = Blog::draft(author, "a", "b");
        let second = Blog::draft(author, "a", "b");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_long_content_is_kept() {
        let content = vec!["Lorem ipsum"; 1000].join(" ");
        let blog = Blog::draft(AuthorId::new(), "Long", content.clone());
        assert_eq!(blog.content, content);
        assert!(blog.content.len() > 5000);
    }

    #[test]
    fn test_validate_rejects_nil_author() {
        let blog = Blog::draft(AuthorId::nil(), "Title", "Content");
        let outcome = blog.validate();

        let failure = outcome.failure().expect("nil author must fail");
        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(failure.message(), Some("author id invalid"));
    }

    #[test]
    fn test_validate_rejects_blank_titles() {
        for title in ["", "   ", "\t\n"] {
            let blog = Blog::draft(AuthorId::new(), title, "Content");
            let outcome = blog.validate();
            assert_eq!(
                outcome.message(),
                Some("title invalid"),
                "title {:?} should be rejected",
                title
            );
        }
    }

    #[test]
    fn test_validate_reports_author_before_title() {
        let blog = Blog::draft(AuthorId::nil(), "", "Content");
        assert_eq!(blog.validate().message(), Some("author id invalid"));
    }

    #[test]
    fn test_validate_accepts_valid_blog() {
        let blog = Blog::draft(AuthorId::new(), "Valid Blog Title", "");
        assert!(blog.validate().is_ok());
    }

    #[test]
    fn test_id_parsing() {
        let id = BlogId::new();
        let parsed: BlogId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let err = "not-a-uuid".parse::<AuthorId>().unwrap_err();
        assert!(matches!(err, Error::UuidParse(_)));

        assert!(BlogId::default().is_nil());
        assert!(AuthorId::default().is_nil());
    }

    #[test]
    fn test_blog_serialization() {
        let blog = Blog::draft(AuthorId::new(), "serialization-test", "Testing JSON");

        let json = serde_json::to_string(&blog).unwrap();
        assert!(json.contains("serialization-test"));
        assert!(json.contains(&blog.id.to_string()));

        let deserialized: Blog = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, blog);
    }
}
