//! Domain types, services and ports.
//!
//! Public surface:
//! - [`Drawing`] / [`DrawingId`]: the canonical drawing record.
//! - [`DrawingUpsertService`]: save-or-update decision over a store handle.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request-scoped correlation identifier.
//! - [`ports`]: traits adapters implement or depend on.

mod drawing;
mod drawing_service;
pub mod error;
pub mod ports;
mod trace_id;

pub use self::drawing::{Drawing, DrawingId, DrawingIdValidationError};
pub use self::drawing_service::DrawingUpsertService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
