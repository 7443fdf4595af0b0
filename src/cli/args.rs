//! CLI argument definitions using clap
//!
//! Commands:
//! - patient-gateway init
//! - patient-gateway start [--port <port>]
//!
//! Everything else comes from the environment; see `config`.

use clap::{Parser, Subcommand};

/// Patient gateway - forwards gated SQL from HTTP to MySQL
#[derive(Parser, Debug)]
#[command(name = "patient-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the database and patients table if absent, then exit
    Init,

    /// Bootstrap the schema and start the HTTP server
    Start {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
