//! Persistence layer for BlogApp
//!
//! This crate provides the SQLite-backed repositories, unit of work and
//! services that run the blog use cases from `blog-app-core`.

pub mod context;
pub mod error;
pub mod manager;
pub mod migrations;
pub mod repositories;
pub mod services;
pub mod unit_of_work;

pub use context::BlogContext;
pub use error::{Error, Result};
pub use manager::{DatabaseConfig, DatabaseStats, StorageManager};
pub use repositories::{SqliteBlogRepository, SqliteCategoryRepository};
pub use services::BlogService;
pub use unit_of_work::SqliteUnitOfWork;

/// Re-export core types for convenience
pub use blog_app_core as core;
