//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::SaveDrawingCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Save-or-update use-case behind both save routes.
    pub drawings: Arc<dyn SaveDrawingCommand>,
}

impl HttpState {
    /// Construct state from the save use-case.
    pub fn new(drawings: Arc<dyn SaveDrawingCommand>) -> Self {
        Self { drawings }
    }
}
