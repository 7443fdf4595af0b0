//! # Database Module
//!
//! Everything that talks to MySQL.
//!
//! - `config` - endpoint and credentials
//! - `pool` - the process-wide connection pool
//! - `executor` - statement execution against the pool
//! - `row` - result row to JSON conversion
//! - `bootstrap` - schema creation before serving
//! - `memory` - in-memory executor for tests

pub mod bootstrap;
pub mod config;
pub mod executor;
pub mod memory;
pub mod pool;
pub mod row;

pub use bootstrap::initialize_database;
pub use config::DatabaseConfig;
pub use executor::{ExecResult, MySqlExecutor, SqlExecutor};
pub use memory::{InMemoryExecutor, RecordedStatement};
pub use pool::ConnectionPool;

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database errors
///
/// Never rendered to HTTP clients; handlers log these and answer with a
/// generic message.
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver, connection or server error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Statement refused by the executor
    #[error("statement rejected: {0}")]
    Rejected(String),
}
