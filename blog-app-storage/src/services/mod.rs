//! Service layer for business logic

pub mod blog;

pub use blog::BlogService;
