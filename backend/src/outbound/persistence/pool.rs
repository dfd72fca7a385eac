//! `bb8` pool of `diesel-async` PostgreSQL connections.
//!
//! Built once at startup and owned by [`super::DieselSqlReader`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Pool construction or checkout failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("catalog pool could not be built: {0}")]
    Build(String),
    /// No connection freed up before the checkout timeout.
    #[error("no catalog connection available: {0}")]
    Checkout(String),
}

impl PoolError {
    /// The driver's message, without the pool prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Build(message) | Self::Checkout(message) => message,
        }
    }
}

/// Connection pool settings.
///
/// # Examples
/// ```
/// use catalog_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://catalog@localhost/inventory").with_max_size(4);
/// assert_eq!(config.max_size, 4);
/// assert_eq!(config.min_idle, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_size: u32,
    /// Connections kept open while the service is quiet.
    pub min_idle: Option<u32>,
    pub checkout_timeout: Duration,
    /// Idle connections above `min_idle` are closed after this long.
    pub idle_timeout: Option<Duration>,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(1),
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Cap the pool; zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self.min_idle = self.min_idle.map(|idle| idle.min(self.max_size));
        self
    }
}

/// Shared handle to the pool. Clones share the same connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening `min_idle` connections up front.
    ///
    /// # Errors
    /// [`PoolError::Build`] when those connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            min_idle,
            checkout_timeout,
            idle_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        let inner = Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(checkout_timeout)
            .idle_timeout(idle_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build(err.to_string()))?;
        debug!(max_size, "catalog pool ready");

        Ok(Self { inner })
    }

    /// Borrow a connection for one statement.
    ///
    /// # Errors
    /// [`PoolError::Checkout`] when the checkout timeout elapses.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::Checkout(err.to_string()))
    }
}
