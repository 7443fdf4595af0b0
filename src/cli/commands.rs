//! CLI command implementations
//!
//! Boot order for `start`:
//! 1. Load and validate configuration
//! 2. Bootstrap the schema on an admin connection (fatal on failure)
//! 3. Create the shared pool
//! 4. Serve until Ctrl-C

use std::sync::Arc;

use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::db::{initialize_database, ConnectionPool, MySqlExecutor};
use crate::http_server::HttpServer;
use crate::observability::init_logging;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments, set up logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = GatewayConfig::from_env();
    init_logging(&config.log)?;
    run_command(cli.command, config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, mut config: GatewayConfig) -> CliResult<()> {
    if let Command::Start { port: Some(port) } = cmd {
        config.http.port = port;
    }
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Init => rt.block_on(init(&config)),
        Command::Start { .. } => rt.block_on(start(config)),
    }
}

/// Create the database and patients table, then return
pub async fn init(config: &GatewayConfig) -> CliResult<()> {
    initialize_database(&config.database).await.map_err(|e| {
        error!(error = %e, "error initializing database");
        CliError::from(e)
    })
}

/// Bootstrap the schema and serve HTTP until shutdown
pub async fn start(config: GatewayConfig) -> CliResult<()> {
    init(&config).await?;

    let pool = ConnectionPool::new(&config.database);
    info!(
        server = %config.database.server_addr(),
        max_connections = config.database.max_connections,
        "connection pool created"
    );

    let executor = Arc::new(MySqlExecutor::new(pool));
    let server = HttpServer::new(config.http, executor)
        .map_err(|e| CliError::config_error(format!("Invalid allowed origin: {}", e)))?;

    server
        .start()
        .await
        .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
}
