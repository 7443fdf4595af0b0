//! Database configuration
//!
//! Endpoint, credentials and pool sizing for the single MySQL server.

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

/// MySQL connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 3306)
    #[serde(default = "default_port")]
    pub port: u16,

    /// User name (default: "root")
    #[serde(default = "default_user")]
    pub user: String,

    /// Password (default: empty)
    #[serde(default)]
    pub password: String,

    /// Database holding the patients table (default: "patientDB")
    #[serde(default = "default_database")]
    pub database: String,

    /// Upper bound on pooled connections (default: 10)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "patientDB".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Options for pooled connections, bound to the configured database
    pub fn connect_options(&self) -> MySqlConnectOptions {
        self.admin_connect_options().database(&self.database)
    }

    /// Options for the administrative connection, with no default database
    pub fn admin_connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// The database name is interpolated into bootstrap DDL, so it must be
    /// a plain unquoted identifier.
    pub fn has_valid_database_name(&self) -> bool {
        (1..=64).contains(&self.database.len())
            && self
                .database
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
