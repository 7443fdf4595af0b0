//! Schema bootstrap
//!
//! Runs once before the server binds. Uses a dedicated connection outside
//! the pool, without a default database, so that the database itself can be
//! created. Any failure here must stop the process.

use sqlx::{Connection, Executor, MySqlConnection};
use tracing::info;

use crate::patient::CREATE_PATIENTS_TABLE;

use super::config::DatabaseConfig;
use super::{DbError, DbResult};

/// Statements run by [`initialize_database`], in order
pub fn bootstrap_statements(config: &DatabaseConfig) -> DbResult<Vec<String>> {
    if !config.has_valid_database_name() {
        return Err(DbError::Rejected(format!(
            "invalid database name '{}'",
            config.database
        )));
    }

    Ok(vec![
        format!("CREATE DATABASE IF NOT EXISTS `{}`", config.database),
        format!("USE `{}`", config.database),
        CREATE_PATIENTS_TABLE.to_string(),
    ])
}

/// Create the database and the patients table if absent
pub async fn initialize_database(config: &DatabaseConfig) -> DbResult<()> {
    let statements = bootstrap_statements(config)?;

    let mut conn = MySqlConnection::connect_with(&config.admin_connect_options()).await?;
    for statement in &statements {
        conn.execute(statement.as_str()).await?;
    }
    conn.close().await?;

    info!(
        server = %config.server_addr(),
        database = %config.database,
        "database and table initialized"
    );
    Ok(())
}
