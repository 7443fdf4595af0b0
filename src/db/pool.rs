//! Connection pool
//!
//! A thin wrapper over `sqlx::MySqlPool`. One pool is created at startup and
//! shared by every request until the process exits. Connections are handed
//! out per statement and go back to the pool when the guard drops, which
//! covers every exit path including errors.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::MySql;
use tracing::debug;

use super::config::DatabaseConfig;
use super::DbResult;

/// Process-wide MySQL connection pool
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    inner: MySqlPool,
}

impl ConnectionPool {
    /// Create the pool. Connections are opened on first use.
    pub fn new(config: &DatabaseConfig) -> Self {
        let inner = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(config.connect_options());
        Self { inner }
    }

    /// Acquire a connection; it is released when dropped.
    pub async fn acquire(&self) -> DbResult<PoolConnection<MySql>> {
        let conn = self.inner.acquire().await?;
        debug!(size = self.inner.size(), idle = self.inner.num_idle(), "connection acquired");
        Ok(conn)
    }
}
