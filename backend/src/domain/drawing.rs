//! Drawing records.
//!
//! A [`Drawing`] is the single canonical record shape used by every layer:
//! the HTTP adapter renders it, the service decides how it changes and the
//! persistence adapters map it to storage. The payload is an opaque JSON
//! value and is never inspected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a stored drawing.
///
/// Store-assigned identifiers are UUID v4 strings. Caller-supplied
/// identifiers are accepted verbatim as long as they are not blank, so
/// legacy document-store keys keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawingId(String);

/// Validation errors returned when constructing [`DrawingId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawingIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("drawing id must not be empty")]
    Empty,
}

impl DrawingId {
    /// Wrap a caller-supplied identifier.
    ///
    /// # Examples
    /// ```
    /// use drawing_backend::domain::DrawingId;
    ///
    /// let id = DrawingId::new("65f1c0ffee").expect("valid id");
    /// assert_eq!(id.as_str(), "65f1c0ffee");
    /// assert!(DrawingId::new("  ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, DrawingIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DrawingIdValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Allocate a fresh store-assigned identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DrawingId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A persisted drawing.
///
/// ## Invariants
/// - `created_at` never changes once the record exists.
/// - `updated_at` is never earlier than `created_at` and never moves
///   backwards across writes to the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Record key.
    pub id: DrawingId,
    /// Drawing content, stored verbatim.
    pub payload: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Drawing {
    /// Build a brand-new record stamped with `now` for both timestamps.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use drawing_backend::domain::{Drawing, DrawingId};
    /// use serde_json::json;
    ///
    /// let drawing = Drawing::create(DrawingId::generate(), json!({"lines": []}), Utc::now());
    /// assert_eq!(drawing.created_at, drawing.updated_at);
    /// ```
    #[must_use]
    pub fn create(id: DrawingId, payload: Value, now: DateTime<Utc>) -> Self {
        Self {
            id,
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the payload, keeping `created_at`.
    ///
    /// `updated_at` becomes `now` unless the stored value is later, in which
    /// case it is kept so the timestamp never moves backwards.
    #[must_use]
    pub fn revise(self, payload: Value, now: DateTime<Utc>) -> Self {
        let updated_at = now.max(self.updated_at);
        Self {
            id: self.id,
            payload,
            created_at: self.created_at,
            updated_at,
        }
    }
}
