//! Error types for storage operations

use thiserror::Error;

/// Storage layer error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Map a sqlx error, turning UNIQUE violations into
    /// [`Error::ConstraintViolation`] for the named constraint
    pub(crate) fn from_sqlx(err: sqlx::Error, constraint: &str, message: String) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::ConstraintViolation {
                    constraint: constraint.to_string(),
                    message,
                }
            }
            _ => Error::Database(err),
        }
    }
}

impl From<Error> for blog_app_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::ConstraintViolation {
                constraint,
                message,
            } => blog_app_core::Error::constraint_violation(constraint, message),
            Error::Database(e) => blog_app_core::Error::dependency("database", e.to_string()),
            Error::Migration(message) => blog_app_core::Error::dependency("migrations", message),
            Error::Internal(e) => blog_app_core::Error::Internal(e.to_string()),
        }
    }
}

/// Convenience result type for storage operations
pub type Result<T> = std::result::Result<T, Error>;
