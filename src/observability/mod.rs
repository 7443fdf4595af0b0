//! Observability for the gateway
//!
//! Structured logging through `tracing`. The subscriber is installed once by
//! the CLI before anything else runs; library code only emits events.
//!
//! # Usage
//!
//! ```ignore
//! use patient_gateway::observability::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(rows = 42, "query complete");
//! ```

mod logger;

pub use logger::{build_filter, init_logging, LogConfig, LogFormat};

use thiserror::Error;

/// Observability error
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The log format name is not recognised
    #[error("unknown log format '{0}': expected 'text' or 'json'")]
    UnknownFormat(String),

    /// A global subscriber was already installed
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
