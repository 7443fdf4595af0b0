//! Gateway configuration loaded from environment variables.
//!
//! Every setting has a default; override at process startup.
//!
//! | Variable                     | Default                  | Description                          |
//! |------------------------------|--------------------------|--------------------------------------|
//! | `GATEWAY_DB_HOST`            | `127.0.0.1`              | MySQL host                           |
//! | `GATEWAY_DB_PORT`            | `3306`                   | MySQL port                           |
//! | `GATEWAY_DB_USER`            | `root`                   | MySQL user                           |
//! | `GATEWAY_DB_PASSWORD`        | (empty)                  | MySQL password                       |
//! | `GATEWAY_DB_NAME`            | `patientDB`              | Database holding `patients`          |
//! | `GATEWAY_DB_MAX_CONNECTIONS` | `10`                     | Pool size                            |
//! | `GATEWAY_HOST`               | `0.0.0.0`                | HTTP bind host                       |
//! | `PORT`                       | `3002`                   | HTTP listen port                     |
//! | `GATEWAY_ALLOWED_ORIGIN`     | `http://127.0.0.1:5500`  | The single CORS origin               |
//! | `GATEWAY_LOG_LEVEL`          | `info`                   | tracing filter (`RUST_LOG` wins)     |
//! | `GATEWAY_LOG_FORMAT`         | `text`                   | `text` or `json`                     |

use thiserror::Error;

use crate::db::DatabaseConfig;
use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid database name '{0}': use letters, digits, '_' or '$' (max 64)")]
    InvalidDatabaseName(String),

    #[error("invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("max connections must be > 0")]
    ZeroConnections,
}

/// Runtime configuration for the gateway process
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub database: DatabaseConfig,
    pub http: HttpServerConfig,
    pub log: LogConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables, applying defaults
    /// where a variable is absent or unparseable.
    pub fn from_env() -> Self {
        let db = DatabaseConfig::default();
        let http = HttpServerConfig::default();
        let log = LogConfig::default();

        Self {
            database: DatabaseConfig {
                host: env_str("GATEWAY_DB_HOST", &db.host),
                port: env_parse("GATEWAY_DB_PORT", db.port),
                user: env_str("GATEWAY_DB_USER", &db.user),
                password: env_str("GATEWAY_DB_PASSWORD", &db.password),
                database: env_str("GATEWAY_DB_NAME", &db.database),
                max_connections: env_parse("GATEWAY_DB_MAX_CONNECTIONS", db.max_connections),
            },
            http: HttpServerConfig {
                host: env_str("GATEWAY_HOST", &http.host),
                port: env_parse("PORT", http.port),
                allowed_origin: env_str("GATEWAY_ALLOWED_ORIGIN", &http.allowed_origin),
            },
            log: LogConfig {
                level: env_str("GATEWAY_LOG_LEVEL", &log.level),
                format: env_parse("GATEWAY_LOG_FORMAT", log.format),
            },
        }
    }

    /// Validate values the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.has_valid_database_name() {
            return Err(ConfigError::InvalidDatabaseName(
                self.database.database.clone(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }

        if axum::http::HeaderValue::from_str(&self.http.allowed_origin).is_err() {
            return Err(ConfigError::InvalidOrigin(self.http.allowed_origin.clone()));
        }

        Ok(())
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
