//! HTTP server configuration object and helpers.

use drawing_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, drawings are stored in PostgreSQL; otherwise they are
    /// kept in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
