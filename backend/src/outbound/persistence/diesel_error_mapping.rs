//! Translation of Diesel and pool failures into [`PersistenceError`].
//!
//! Diesel reports a [`DatabaseErrorKind`] rather than the raw SQLSTATE, so the
//! kind is mapped back onto its standard code. The driver's `DETAIL` line is
//! carried over untouched; the HTTP normaliser parses it for unique
//! violations.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::{PersistenceError, SqlState};

use super::pool::PoolError;

/// Standard SQLSTATE for a Diesel database error kind.
pub(crate) fn sql_state_for(kind: &DatabaseErrorKind) -> SqlState {
    match kind {
        DatabaseErrorKind::UniqueViolation => SqlState::UNIQUE_VIOLATION,
        DatabaseErrorKind::ForeignKeyViolation => SqlState::FOREIGN_KEY_VIOLATION,
        DatabaseErrorKind::NotNullViolation => SqlState::NOT_NULL_VIOLATION,
        DatabaseErrorKind::CheckViolation => SqlState::CHECK_VIOLATION,
        DatabaseErrorKind::SerializationFailure => SqlState::SERIALIZATION_FAILURE,
        DatabaseErrorKind::ReadOnlyTransaction => SqlState::READ_ONLY_TRANSACTION,
        DatabaseErrorKind::ClosedConnection => SqlState::CONNECTION_FAILURE,
        _ => SqlState::INTERNAL_ERROR,
    }
}

/// Map a Diesel error onto the domain persistence error.
pub(crate) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            let mapped = PersistenceError::new(sql_state_for(&kind), info.message());
            match info.details() {
                Some(detail) => mapped.with_detail(detail),
                None => mapped,
            }
        }
        DieselError::NotFound => PersistenceError::new(SqlState::NO_DATA, "record not found"),
        other => {
            debug!(
                error_type = %std::any::type_name_of_val(&other),
                "diesel operation failed"
            );
            PersistenceError::new(SqlState::INTERNAL_ERROR, other.to_string())
        }
    }
}

/// Map a pool failure onto the domain persistence error.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::new(SqlState::CONNECTION_REFUSED, message)
}
