//! Domain-level error type.
//!
//! Errors are transport agnostic: they carry a stable [`ErrorCode`], the
//! message reported to the caller and the trace identifier active when the
//! error was raised. The HTTP adapter decides how to render them.

use serde::Serialize;

use super::TraceId;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request could not be decoded.
    InvalidRequest,
    /// The store could not be reached or the write failed.
    InternalError,
}

/// Error raised by domain services.
///
/// Store failures keep their underlying message so callers can diagnose
/// them; there is no redaction step.
///
/// # Examples
/// ```
/// use drawing_backend::domain::{Error, ErrorCode};
///
/// let err = Error::internal("Error saving drawing: disk full");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.message(), "Error saving drawing: disk full");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Replace the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message reported to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad json"), ErrorCode::InvalidRequest)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn display_is_the_message() {
        let error = Error::internal("Error saving drawing: relation missing");
        assert_eq!(error.to_string(), "Error saving drawing: relation missing");
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[rstest]
    fn without_scope_has_no_trace_id() {
        assert!(Error::internal("boom").trace_id().is_none());
    }
}
