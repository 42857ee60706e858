//! Success/failure outcome for expected business results
//!
//! Use cases return `Result<Outcome<T>>`: the outer `Result` carries faults,
//! the inner [`Outcome`] carries everything a caller is expected to branch on
//! (validation failures, uniqueness conflicts, missing entities).
//!
//! # Examples
//!
//! ```rust
//! use blog_app_core::outcome::{Failure, Outcome};
//!
//! fn parse_positive(n: i64) -> Outcome<u64> {
//!     if n <= 0 {
//!         return Failure::validation("must be positive").into();
//!     }
//!     Outcome::ok(n as u64)
//! }
//!
//! assert_eq!(parse_positive(3).try_get_value(), Some(&3));
//! assert!(parse_positive(-1).is_error());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classification of a failure, used by presentation layers to pick a
/// transport status. Callers never match on the message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Conflict,
    NotFound,
    #[default]
    Unspecified,
}

/// An expected failure with an optional diagnostic message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    kind: FailureKind,
    message: Option<String>,
}

impl Failure {
    /// Failure without a message
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::Unspecified,
            message: Some(message.into()),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: Some(message.into()),
        }
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::Conflict,
            message: Some(message.into()),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::NotFound,
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Turn this failure into a failed outcome of any value type
    pub fn into_outcome<T>(self) -> Outcome<T> {
        Outcome::Error(self)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "operation failed"),
        }
    }
}

impl std::error::Error for Failure {}

/// Outcome of an operation: exactly one of `Ok` or `Error` is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Ok { message: Option<String>, value: T },
    Error(Failure),
}

impl Outcome<()> {
    /// Unit success with a message
    pub fn ok_with_message<S: Into<String>>(message: S) -> Self {
        Outcome::Ok {
            message: Some(message.into()),
            value: (),
        }
    }
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `value`
    pub fn ok(value: T) -> Self {
        Outcome::Ok {
            message: None,
            value,
        }
    }

    pub fn with_message<S: Into<String>>(value: T, message: S) -> Self {
        Outcome::Ok {
            message: Some(message.into()),
            value,
        }
    }

    /// Failed outcome without a message
    pub fn error() -> Self {
        Outcome::Error(Failure::new())
    }

    pub fn error_with_message<S: Into<String>>(message: S) -> Self {
        Outcome::Error(Failure::with_message(message))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// Message attached to either variant
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Ok { message, .. } => message.as_deref(),
            Outcome::Error(failure) => failure.message(),
        }
    }

    /// Value of a successful outcome; `None` on failure
    pub fn try_get_value(&self) -> Option<&T> {
        match self {
            Outcome::Ok { value, .. } => Some(value),
            Outcome::Error(_) => None,
        }
    }

    /// Value of a successful outcome, or `T::default()` on failure
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Outcome::Ok { value, .. } => value,
            Outcome::Error(_) => T::default(),
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Ok { .. } => None,
            Outcome::Error(failure) => Some(failure),
        }
    }

    /// Re-type a failed outcome so it can be returned from a caller with a
    /// different value type. A successful outcome yields `None`.
    pub fn as_failure<U>(&self) -> Option<Outcome<U>> {
        self.failure().cloned().map(Outcome::Error)
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Ok { message, value } => Outcome::Ok {
                message,
                value: f(value),
            },
            Outcome::Error(failure) => Outcome::Error(failure),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, Failure> {
        match self {
            Outcome::Ok { value, .. } => Ok(value),
            Outcome::Error(failure) => Err(failure),
        }
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Outcome::Error(failure)
    }
}
