//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories) expose strongly typed errors so adapters map
//! their failures into predictable variants; driving ports (commands) return
//! the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod drawing_repository;
mod save_drawing_command;

#[cfg(test)]
pub use drawing_repository::MockDrawingRepository;
pub use drawing_repository::{DrawingRepository, DrawingRepositoryError};
#[cfg(test)]
pub use save_drawing_command::MockSaveDrawingCommand;
pub use save_drawing_command::{
    SaveDrawingCommand, SaveDrawingRequest, SaveDrawingResponse, SaveOutcome,
};
