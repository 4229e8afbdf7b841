//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the drawing repository backed by PostgreSQL via Diesel with
//! async support through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain drawings.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Verbatim failures**: driver messages are carried through to the
//!   domain error so callers see the underlying reason.
//!
//! # Example
//!
//! ```ignore
//! use drawing_backend::outbound::persistence::{DbPool, DieselDrawingRepository, PoolConfig};
//!
//! let pool = DbPool::new_lazy(PoolConfig::new("postgres://localhost/drawings"));
//! let repo = DieselDrawingRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_drawing_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_drawing_repository::DieselDrawingRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
