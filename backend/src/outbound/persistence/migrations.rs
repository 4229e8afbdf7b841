//! Embedded schema migrations.
//!
//! Migrations from `backend/migrations` are compiled into the binary and run
//! at startup when a database is configured. Diesel's migration harness needs
//! a synchronous connection, so the work runs on the blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

/// Migrations bundled from the `migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("migration connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("migration failed: {0}")]
    Apply(String),
    /// The blocking task panicked or was cancelled.
    #[error("migration task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying a migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_blocking(&url)).await??;
    info!(applied, "database migrations applied");
    Ok(applied)
}

fn apply_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|versions| versions.len())
        .map_err(|err| MigrationError::Apply(err.to_string()))
}
