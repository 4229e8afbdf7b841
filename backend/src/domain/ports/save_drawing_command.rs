//! Driving port for saving drawings.
//!
//! The HTTP adapter depends on [`SaveDrawingCommand`] rather than on the
//! concrete service so handler tests can substitute a mock.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Drawing, DrawingId, Error};

/// Input for a save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDrawingRequest {
    /// Caller-supplied key; `None` asks the store to assign one.
    pub id: Option<DrawingId>,
    /// Drawing content to store.
    pub payload: Value,
}

/// Whether a save produced a new record or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No record existed under the key; one was created.
    Created,
    /// An existing record was replaced in place.
    Updated,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDrawingResponse {
    /// Create-or-update decision taken for this request.
    pub outcome: SaveOutcome,
    /// Record as stored.
    pub drawing: Drawing,
}

/// Use-case port: create or update a drawing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveDrawingCommand: Send + Sync {
    /// Persist `request` and report whether it created or updated a record.
    async fn save(&self, request: SaveDrawingRequest) -> Result<SaveDrawingResponse, Error>;
}
