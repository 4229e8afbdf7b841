//! HTTP inbound adapter exposing REST endpoints.

pub mod drawings;
pub mod error;
pub mod health;
pub mod root;
pub mod state;

pub use error::ApiResult;
