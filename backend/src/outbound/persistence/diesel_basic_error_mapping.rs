//! Shared Diesel error mapping.
//!
//! Drawing store failures are reported to the caller verbatim, so these
//! helpers keep the driver's message rather than replacing it with a generic
//! label.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query or connection errors, preserving the
/// database message.
///
/// A closed connection counts as a connection failure; every other failure
/// is a query failure.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            query(info.message().to_owned())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            query(other.to_string())
        }
    }
}
