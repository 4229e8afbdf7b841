//! Port for drawing persistence.
//!
//! [`DrawingRepository`] is the store handle the upsert service depends on.
//! Adapters provide PostgreSQL-backed and in-memory implementations; tests
//! use the generated `MockDrawingRepository`.

use async_trait::async_trait;

use crate::domain::{Drawing, DrawingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by drawing repository adapters.
    pub enum DrawingRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "drawing store connection failed: {message}",
        /// A read or write failed once connected.
        Query { message: String } =>
            "drawing store query failed: {message}",
    }
}

impl DrawingRepositoryError {
    /// Underlying failure reason without the port prefix.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Connection { message } | Self::Query { message } => message.as_str(),
        }
    }
}

/// Store handle for drawing records.
///
/// # Upsert semantics
///
/// [`DrawingRepository::upsert`] inserts the record when its key is absent
/// and otherwise replaces `payload` and `updated_at` while leaving the stored
/// `created_at` untouched. Concurrent upserts on one key are resolved by the
/// store; the last committed write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DrawingRepository: Send + Sync {
    /// Fetch a drawing by identifier, returning `None` when absent.
    async fn find_by_id(&self, id: &DrawingId) -> Result<Option<Drawing>, DrawingRepositoryError>;

    /// Insert or update `drawing` and return the stored record.
    async fn upsert(&self, drawing: &Drawing) -> Result<Drawing, DrawingRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DrawingRepositoryError::connection("connection refused"), "connection refused")]
    #[case(DrawingRepositoryError::query("relation \"drawings\" does not exist"), "relation \"drawings\" does not exist")]
    fn reason_strips_port_prefix(#[case] error: DrawingRepositoryError, #[case] expected: &str) {
        assert_eq!(error.reason(), expected);
        assert!(error.to_string().ends_with(expected));
    }
}
