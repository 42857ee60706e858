//! Core domain models and use cases for BlogApp
//!
//! This crate contains the blog aggregate, the category read model, the
//! [`Outcome`] type used for expected business failures, the collaborator
//! traits the use cases depend on, and the use cases themselves.

pub mod blog;
pub mod category;
pub mod create_blog;
pub mod error;
pub mod get_blog;
pub mod outcome;
pub mod ports;

pub use error::{Error, Result};
pub use outcome::{Failure, FailureKind, Outcome};
