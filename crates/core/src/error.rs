//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Authentication/authorization failures.
///
/// `InvalidCredentials` covers both "unknown username" and "wrong password";
/// callers must not be able to tell the two apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session's role does not permit the requested operation.
    #[error("forbidden")]
    Forbidden,

    #[error("duplicate username")]
    DuplicateUsername,
}

/// Domain-level error.
///
/// Deterministic business failures only. Every failed operation leaves the
/// store unchanged; nothing here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (negative quantity, empty required field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record with the given id exists.
    #[error("not found")]
    NotFound,

    /// Referential-integrity or lifecycle violation: record still referenced,
    /// illegal status transition, invariant would break.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The backing store could not be accessed. This is the one transient
    /// class; callers may retry the operation as-is.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Whether retrying the same call may succeed without any other change.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
