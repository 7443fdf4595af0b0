//! # Gateway Errors
//!
//! Error types for the HTTP surface. Each variant carries the detail needed
//! for the server log; the client only ever sees the fixed public message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::db::DbError;
use crate::query::{GateRejection, InsertError, StatementClass};

/// Result type for gateway handlers
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Message for every 400 response
pub const EXECUTION_FAILED: &str = "An error occurred while executing the query.";
/// Message for read statements refused by the gate
pub const READ_NOT_ALLOWED: &str = "Query not allowed. Only SELECT queries are permitted.";
/// Message for write statements refused by the gate
pub const WRITE_NOT_ALLOWED: &str =
    "Query not allowed. Only INSERT queries are permitted for POST requests.";
/// Message for unsupported methods under the API prefix
pub const METHOD_NOT_ALLOWED: &str =
    "This method is not allowed. Only 'GET' and 'POST' methods are allowed.";
/// Message for paths outside the API prefix
pub const NOT_FOUND: &str = "Not Found";

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Statement refused by the query gate
    #[error("query not allowed: {0}")]
    QueryNotAllowed(#[from] GateRejection),

    /// Request path could not be decoded into a statement
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// Request body is not a valid params document
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// Statement could not be built from the body
    #[error("invalid insert: {0}")]
    InvalidInsert(#[from] InsertError),

    /// Database failed to run the statement
    #[error("execution failed: {0}")]
    Execution(#[from] DbError),

    /// Method other than GET or POST under the API prefix
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Path outside the API prefix
    #[error("not found")]
    NotFound,
}

impl GatewayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::QueryNotAllowed(_) => StatusCode::FORBIDDEN,
            GatewayError::MalformedPath(_)
            | GatewayError::MalformedBody(_)
            | GatewayError::InvalidInsert(_)
            | GatewayError::Execution(_) => StatusCode::BAD_REQUEST,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Message sent to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::QueryNotAllowed(rejection) => match rejection.class {
                StatementClass::Read => READ_NOT_ALLOWED,
                StatementClass::Write => WRITE_NOT_ALLOWED,
            },
            GatewayError::MalformedPath(_)
            | GatewayError::MalformedBody(_)
            | GatewayError::InvalidInsert(_)
            | GatewayError::Execution(_) => EXECUTION_FAILED,
            GatewayError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            GatewayError::NotFound => NOT_FOUND,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match status {
            StatusCode::BAD_REQUEST => error!(error = %self, "request failed"),
            StatusCode::FORBIDDEN => warn!(error = %self, "statement rejected"),
            _ => {}
        }
        let body = Json(MessageResponse {
            message: self.public_message().to_string(),
        });
        (status, body).into_response()
    }
}
