//! Error normaliser for the HTTP adapter.
//!
//! Purpose: every [`Error`] escaping a handler passes through here exactly
//! once. Business failures and unique-constraint violations become a failed
//! [`ResultEnvelope`]; every other storage failure is logged and handed back
//! untouched so the response stays a loud 500 instead of a friendly message.
//!
//! The normaliser is installed as the [`ResponseError`] implementation of
//! [`Error`] and has no state.

use std::sync::LazyLock;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use regex::Regex;
use tracing::error;

use crate::domain::{Error, PersistenceError};
use crate::inbound::http::ResultEnvelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Suffix appended to the conflicting value in duplicate-entry messages.
pub const ALREADY_EXISTS: &str = " already exists";

/// Message used when a unique violation carries no parsable detail.
pub const GENERIC_ALREADY_EXISTS: &str = "record already exists";

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static UNIQUE_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((.*?)\)=\((.*?)\)").expect("unique violation detail pattern compiles")
});

/// Column/value pair parsed from a unique-violation detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedConflict {
    /// Constrained column (or index expression); kept out of client messages.
    pub column: String,
    /// Value that collided with an existing row.
    pub value: String,
}

/// Parse the first `(<column>)=(<value>)` group out of a detail line such as
/// `Key (username)=(zhangsan) already exists.`
///
/// # Examples
/// ```
/// use sky_backend::inbound::http::error::extract_conflict;
///
/// let conflict = extract_conflict("Key (username)=(zhangsan) already exists.")
///     .expect("detail matches");
/// assert_eq!(conflict.column, "username");
/// assert_eq!(conflict.value, "zhangsan");
/// assert!(extract_conflict("").is_none());
/// ```
pub fn extract_conflict(detail: &str) -> Option<ExtractedConflict> {
    let captures = UNIQUE_DETAIL.captures(detail)?;
    let column = captures.get(1)?.as_str().to_owned();
    let value = captures.get(2)?.as_str().to_owned();
    Some(ExtractedConflict { column, value })
}

/// Client-facing message for a unique violation.
///
/// Only the conflicting value is surfaced; the column name stays internal.
pub fn duplicate_entry_message(error: &PersistenceError) -> String {
    match error.detail().and_then(extract_conflict) {
        Some(conflict) => format!("{}{ALREADY_EXISTS}", conflict.value),
        None => GENERIC_ALREADY_EXISTS.to_owned(),
    }
}

/// Outcome of classifying an intercepted error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The error maps onto a failed envelope.
    Handled(ResultEnvelope<()>),
    /// The error is not ours to translate; the original value is returned.
    Reraise(Error),
}

/// Stateless classifier for errors escaping request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNormalizer;

impl ErrorNormalizer {
    /// Classify without side effects. The same input always yields the same
    /// outcome.
    pub fn classify(self, error: Error) -> Classification {
        match error {
            Error::Business(business) => {
                Classification::Handled(ResultEnvelope::error(business.message()))
            }
            Error::Persistence(persistence) if persistence.is_unique_violation() => {
                Classification::Handled(ResultEnvelope::error(duplicate_entry_message(
                    &persistence,
                )))
            }
            other => Classification::Reraise(other),
        }
    }

    /// Classify and write the diagnostic log line.
    pub fn normalize(self, error: Error) -> Classification {
        match &error {
            Error::Business(business) => {
                error!(reason = business.message(), "business rule rejected request");
            }
            Error::Persistence(persistence) if persistence.is_unique_violation() => {
                error!(
                    sql_state = %persistence.sql_state(),
                    detail = persistence.detail(),
                    "unique constraint violated"
                );
            }
            Error::Persistence(persistence) => {
                error!(
                    sql_state = %persistence.sql_state(),
                    db_message = persistence.message(),
                    detail = persistence.detail(),
                    error = ?persistence,
                    "unhandled persistence error"
                );
            }
            Error::Unrecognized { message } => {
                error!(reason = message.as_str(), "unrecognised error escaped handler");
            }
        }
        self.classify(error)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match ErrorNormalizer.classify(self.clone()) {
            Classification::Handled(_) => StatusCode::OK,
            Classification::Reraise(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match ErrorNormalizer.normalize(self.clone()) {
            Classification::Handled(envelope) => HttpResponse::Ok().json(envelope),
            Classification::Reraise(_) => HttpResponse::InternalServerError().finish(),
        }
    }
}

#[cfg(test)]
mod tests;
