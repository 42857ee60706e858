//! Request-scoped persistence context
//!
//! A [`BlogContext`] tracks blogs staged by the repository until the unit of
//! work commits them. One context is created per request; the pool behind
//! it is shared.

use blog_app_core::blog::{AuthorId, Blog};
use parking_lot::Mutex;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

pub struct BlogContext {
    pool: Pool<Sqlite>,
    pending: Mutex<Vec<Blog>>,
}

impl BlogContext {
    pub fn new(pool: Pool<Sqlite>) -> Arc<Self> {
        Arc::new(Self {
            pool,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub(crate) fn stage(&self, blog: Blog) {
        self.pending.lock().push(blog);
    }

    pub(crate) fn has_staged_title(&self, author_id: AuthorId, title: &str) -> bool {
        self.pending
            .lock()
            .iter()
            .any(|b| b.author_id == author_id && b.title == title)
    }

    /// Remove and return everything staged so far
    pub(crate) fn take_pending(&self) -> Vec<Blog> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}
