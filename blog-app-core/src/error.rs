//! Fault types for the core domain
//!
//! These describe unexpected conditions (storage unavailable, missing
//! authenticated actor, broken invariants). Expected business failures
//! never travel through this type; they are carried by [`crate::Outcome`].

use thiserror::Error;

/// Core fault type for domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("UUID parsing error: {0}")]
    UuidParse(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Dependency error: {dependency} - {message}")]
    Dependency { dependency: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Error::UuidParse(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl Error {
    /// Create an error for a caller without an authenticated identity
    pub fn unauthenticated<S: Into<String>>(reason: S) -> Self {
        Self::Unauthenticated(reason.into())
    }

    /// Create a constraint violation error
    pub fn constraint_violation<S1: Into<String>, S2: Into<String>>(
        constraint: S1,
        message: S2,
    ) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Create a dependency error
    pub fn dependency<S1: Into<String>, S2: Into<String>>(dependency: S1, message: S2) -> Self {
        Self::Dependency {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Error::Unauthenticated(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Error::ConstraintViolation { .. })
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
