//! Repository implementations for domain entities

pub mod blog;
pub mod category;

pub use blog::SqliteBlogRepository;
pub use category::SqliteCategoryRepository;
