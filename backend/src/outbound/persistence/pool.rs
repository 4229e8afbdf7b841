//! Async-safe connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. The pool is the only process-wide state
//! shared between save requests; it is built once at startup and cloned into
//! the repository.
//!
//! A lazily built pool opens no connections up front, so the server starts
//! even when PostgreSQL is down and each request reports the failure instead.

use std::sync::Arc;
use std::time::Duration;

use bb8::{ErrorSink, RunError};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, PoolError as ManagerError};
use tokio::sync::watch;
use tracing::debug;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and checkout behaviour.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use drawing_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://drawings@localhost/drawings")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "postgres://drawings@localhost/drawings");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
    retry_connection: bool,
}

impl PoolConfig {
    /// Create a new configuration with the given database URL.
    ///
    /// Uses sensible defaults:
    /// - `max_size`: 10 connections
    /// - `min_idle`: 2 connections
    /// - `connection_timeout`: 30 seconds
    /// - `retry_connection`: true
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
            retry_connection: true,
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Control whether failed connection attempts are retried until the
    /// checkout timeout elapses.
    ///
    /// With retries disabled a checkout fails with the driver's own error
    /// (e.g. "connection refused") instead of a generic timeout.
    pub fn with_retry_connection(mut self, retry: bool) -> Self {
        self.retry_connection = retry;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Records the most recent connection failure reported by bb8.
///
/// bb8 opens connections on background tasks and hands their failures to the
/// error sink rather than to the waiting caller, so checkouts watch this
/// channel to learn why a connection could not be made.
#[derive(Debug, Clone)]
struct ConnectErrorSink {
    latest: Arc<watch::Sender<Option<String>>>,
}

impl ErrorSink<ManagerError> for ConnectErrorSink {
    fn sink(&self, error: ManagerError) {
        let message = error.to_string();
        debug!(error = %message, "database connection attempt failed");
        self.latest.send_replace(Some(message));
    }

    fn boxed_clone(&self) -> Box<dyn ErrorSink<ManagerError>> {
        Box::new(self.clone())
    }
}

/// Cloneable handle to the PostgreSQL pool used by the drawing repository.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
    connect_errors: watch::Receiver<Option<String>>,
}

impl DbPool {
    fn builder(
        config: &PoolConfig,
    ) -> (
        bb8::Builder<AsyncDieselConnectionManager<AsyncPgConnection>>,
        watch::Receiver<Option<String>>,
    ) {
        let (sender, receiver) = watch::channel(None);
        let sink = ConnectErrorSink {
            latest: Arc::new(sender),
        };
        let builder = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .retry_connection(config.retry_connection)
            .error_sink(Box::new(sink));
        (builder, receiver)
    }

    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed (e.g.,
    /// invalid database URL or connection failure).
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let (builder, connect_errors) = Self::builder(&config);
        let inner = builder
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self {
            inner,
            connect_errors,
        })
    }

    /// Create a pool without opening any connection.
    ///
    /// Connection failures surface on the first [`DbPool::get`] instead of
    /// at construction.
    pub fn new_lazy(config: PoolConfig) -> Self {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let (builder, connect_errors) = Self::builder(&config);
        Self {
            inner: builder.build_unchecked(manager),
            connect_errors,
        }
    }

    /// Get a connection from the pool.
    ///
    /// A connection attempt that fails while the checkout is waiting ends the
    /// checkout at once with the driver's message.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained; the
    /// message is the underlying connection failure when one was observed.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        let mut failures = self.connect_errors.clone();
        failures.mark_unchanged();

        tokio::select! {
            result = self.inner.get() => result.map_err(|err| self.checkout_error(&err)),
            Ok(()) = failures.changed() => {
                let message = failures
                    .borrow()
                    .clone()
                    .unwrap_or_else(|| RunError::<ManagerError>::TimedOut.to_string());
                Err(PoolError::checkout(message))
            }
        }
    }

    fn checkout_error(&self, error: &RunError<ManagerError>) -> PoolError {
        match error {
            RunError::User(inner) => PoolError::checkout(inner.to_string()),
            RunError::TimedOut => {
                let latest = self.connect_errors.borrow().clone();
                PoolError::checkout(latest.unwrap_or_else(|| error.to_string()))
            }
        }
    }
}
