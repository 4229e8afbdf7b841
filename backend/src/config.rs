//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `DRAWINGS_*` environment variables and
//! configuration files. Unset values fall back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Database used when neither `DRAWINGS_DATABASE_URL` nor `DATABASE_URL` is set.
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/drawings";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Environment variable consulted when no prefixed database URL is set.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Configuration values for the HTTP server and its drawing store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DRAWINGS")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = String::from("0.0.0.0"))]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Keep drawings in process memory instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Address tuple accepted by `HttpServer::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Return the database URL, consulting `DATABASE_URL` when the prefixed
    /// setting is absent and falling back to a local server. Blank values
    /// count as absent.
    #[must_use]
    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                std::env::var(DATABASE_URL_ENV)
                    .ok()
                    .filter(|url| !url.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned())
    }

    /// Build the pool configuration, or `None` when the in-memory store was
    /// requested.
    ///
    /// Retries are disabled so a checkout against an unreachable server
    /// fails with the driver's reason.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        if self.in_memory {
            return None;
        }
        Some(
            PoolConfig::new(self.database_url())
                .with_max_size(
                    self.db_max_connections
                        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
                        .max(1),
                )
                .with_min_idle(None)
                .with_connection_timeout(Duration::from_secs(
                    self.db_connect_timeout_secs
                        .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
                ))
                .with_retry_connection(false),
        )
    }
}
