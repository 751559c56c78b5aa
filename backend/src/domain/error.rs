//! Domain-level error types.
//!
//! These errors are transport agnostic. Every failure that can escape a
//! domain operation is one of the variants of [`Error`]; the HTTP adapter
//! dispatches on the variant tag to decide what the client sees.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error as ThisError;

/// Five-character SQLSTATE code reported by the storage engine.
///
/// # Examples
/// ```
/// use sky_backend::domain::SqlState;
///
/// assert_eq!(SqlState::UNIQUE_VIOLATION.as_str(), "23505");
/// assert_eq!(SqlState::new("23505"), SqlState::UNIQUE_VIOLATION);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlState(Cow<'static, str>);

impl SqlState {
    /// `02000`: the statement matched no rows.
    pub const NO_DATA: Self = Self(Cow::Borrowed("02000"));
    /// `08001`: a connection could not be established.
    pub const CONNECTION_REFUSED: Self = Self(Cow::Borrowed("08001"));
    /// `08006`: an established connection was lost.
    pub const CONNECTION_FAILURE: Self = Self(Cow::Borrowed("08006"));
    /// `23502`: a `NOT NULL` constraint was violated.
    pub const NOT_NULL_VIOLATION: Self = Self(Cow::Borrowed("23502"));
    /// `23503`: a foreign key constraint was violated.
    pub const FOREIGN_KEY_VIOLATION: Self = Self(Cow::Borrowed("23503"));
    /// `23505`: a unique constraint was violated.
    pub const UNIQUE_VIOLATION: Self = Self(Cow::Borrowed("23505"));
    /// `23514`: a check constraint was violated.
    pub const CHECK_VIOLATION: Self = Self(Cow::Borrowed("23514"));
    /// `25006`: a write was attempted inside a read-only transaction.
    pub const READ_ONLY_TRANSACTION: Self = Self(Cow::Borrowed("25006"));
    /// `40001`: the transaction could not be serialised.
    pub const SERIALIZATION_FAILURE: Self = Self(Cow::Borrowed("40001"));
    /// `XX000`: unclassified internal storage failure.
    pub const INTERNAL_ERROR: Self = Self(Cow::Borrowed("XX000"));

    /// Wrap a raw code reported by a driver.
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    /// Borrow the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors emitted by the [`BusinessError`] constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum BusinessErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// A violated domain rule, carrying a message intended for end users.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use sky_backend::domain::BusinessError;
///
/// let err = BusinessError::new("dish is on sale and cannot be deleted");
/// assert_eq!(err.message(), "dish is on sale and cannot be deleted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct BusinessError {
    message: String,
}

impl BusinessError {
    /// Create a new error, panicking if validation fails.
    pub fn new(message: impl Into<String>) -> Self {
        match Self::try_new(message) {
            Ok(value) => value,
            Err(err) => panic!("business error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(message: impl Into<String>) -> Result<Self, BusinessErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(BusinessErrorValidationError::EmptyMessage);
        }
        Ok(Self { message })
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Structured failure surfaced by a storage adapter.
///
/// `detail` carries the driver-supplied detail line. For
/// [`SqlState::UNIQUE_VIOLATION`] PostgreSQL reports it as
/// `Key (<column>)=(<value>) already exists.`
///
/// # Examples
/// ```
/// use sky_backend::domain::{PersistenceError, SqlState};
///
/// let err = PersistenceError::new(SqlState::UNIQUE_VIOLATION, "duplicate key value")
///     .with_detail("Key (name)=(Kung Pao Chicken) already exists.");
/// assert!(err.is_unique_violation());
/// assert_eq!(err.detail(), Some("Key (name)=(Kung Pao Chicken) already exists."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("persistence failure [{sql_state}]: {message}")]
pub struct PersistenceError {
    sql_state: SqlState,
    message: String,
    detail: Option<String>,
}

impl PersistenceError {
    /// Create an error without driver detail.
    pub fn new(sql_state: SqlState, message: impl Into<String>) -> Self {
        Self {
            sql_state,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach the driver-supplied detail line.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Machine-readable error code.
    pub fn sql_state(&self) -> &SqlState {
        &self.sql_state
    }

    /// Primary diagnostic message from the driver.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Driver-supplied detail line, when present.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Whether the failure is a unique-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        self.sql_state == SqlState::UNIQUE_VIOLATION
    }
}

/// Any failure escaping a domain operation.
///
/// Adapters dispatch on the variant; nothing inspects the concrete type at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A domain rule rejected the request.
    #[error(transparent)]
    Business(#[from] BusinessError),
    /// The storage layer failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// Anything the domain does not model.
    #[error("unrecognised failure: {message}")]
    Unrecognized { message: String },
}

impl Error {
    /// Convenience constructor for [`Error::Business`].
    pub fn business(message: impl Into<String>) -> Self {
        Self::Business(BusinessError::new(message))
    }

    /// Convenience constructor for [`Error::Unrecognized`].
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self::Unrecognized {
            message: message.into(),
        }
    }
}
