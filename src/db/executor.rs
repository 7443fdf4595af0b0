//! Statement execution
//!
//! `SqlExecutor` is the seam between the HTTP handlers and the database.
//! `MySqlExecutor` runs statements on the shared pool; each call acquires
//! its own connection and releases it before returning, on success and on
//! failure alike.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::pool::ConnectionPool;
use super::row::rows_to_json;
use super::DbResult;

const WARNING_COUNT: &str = "SELECT CAST(@@warning_count AS UNSIGNED)";

/// Outcome of a write statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecResult {
    /// Rows inserted or changed
    pub affected_rows: u64,
    /// Auto-increment id of the first inserted row (0 if none)
    pub insert_id: u64,
    /// Warnings the server raised for the statement
    pub warning_status: u64,
}

/// Executes statements that already passed the gate
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a statement with no parameters and return its rows as JSON objects
    async fn query(&self, sql: &str) -> DbResult<Vec<Value>>;

    /// Run a statement binding `params` to its placeholders in order
    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<ExecResult>;
}

/// Executor backed by the MySQL connection pool
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    pool: ConnectionPool,
}

impl MySqlExecutor {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SqlExecutor for MySqlExecutor {
    async fn query(&self, sql: &str) -> DbResult<Vec<Value>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
        debug!(rows = rows.len(), "query complete");
        rows_to_json(&rows)
    }

    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<ExecResult> {
        let mut conn = self.pool.acquire().await?;
        let mut statement = sqlx::query(sql);
        for param in params {
            statement = statement.bind(param.as_str());
        }
        let result = statement.execute(&mut *conn).await?;

        // Read on the same connection, before anything else clears the count.
        let warning_status: u64 = sqlx::query_scalar(WARNING_COUNT)
            .fetch_one(&mut *conn)
            .await?;
        debug!(affected = result.rows_affected(), warning_status, "execute complete");

        Ok(ExecResult {
            affected_rows: result.rows_affected(),
            insert_id: result.last_insert_id(),
            warning_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_result_field_names() {
        let result = ExecResult {
            affected_rows: 2,
            insert_id: 41,
            warning_status: 1,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["affectedRows"], 2);
        assert_eq!(json["insertId"], 41);
        assert_eq!(json["warningStatus"], 1);
    }
}
