//! CLI module for the patient gateway
//!
//! Provides command-line interface for:
//! - init: Create the database and patients table, then exit
//! - start: Bootstrap the schema and serve HTTP until Ctrl-C

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start};
pub use errors::{CliError, CliErrorCode, CliResult};
