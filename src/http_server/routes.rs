//! Gateway HTTP Routes
//!
//! Everything under `/lab5/api/`:
//!
//! - `GET /lab5/api/<url-encoded SELECT>` - run the statement, return its rows
//! - `POST /lab5/api/<anything>` - insert the `params` tuples as patients
//! - any other method - 405
//!
//! Any other path is a 404.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Uri,
    routing::{get, MethodRouter},
    Json, Router,
};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::db::{ExecResult, SqlExecutor};
use crate::patient::PatientParams;
use crate::query::{gate, InsertStatement, StatementClass};

use super::errors::{GatewayError, GatewayResult};

/// Path prefix of every gateway endpoint
pub const API_PREFIX: &str = "/lab5/api/";

/// Acknowledgement sent after a successful insert
pub const PATIENT_ADDED: &str = "Patient added successfully";

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct InsertPatientsRequest {
    pub params: Vec<PatientParams>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub message: &'static str,
    pub results: ExecResult,
}

// ==================
// Gateway Routes
// ==================

/// Create gateway routes
pub fn gateway_routes<E: SqlExecutor + 'static>(executor: Arc<E>) -> Router {
    Router::new()
        .route("/lab5/api/", api_methods())
        .route("/lab5/api/*statement", api_methods())
        .fallback(not_found)
        .with_state(executor)
}

fn api_methods<E: SqlExecutor + 'static>() -> MethodRouter<Arc<E>> {
    get(read_handler::<E>)
        .post(write_handler::<E>)
        .fallback(method_not_allowed)
}

/// Decode the statement carried in the path after the API prefix.
///
/// Every `%` must start a two-digit hex escape and the decoded bytes must be
/// UTF-8; anything else is a malformed path and never reaches the database.
pub fn statement_from_path(path: &str) -> GatewayResult<String> {
    let encoded = path.strip_prefix(API_PREFIX).unwrap_or_default();
    check_escapes(encoded)?;
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|sql| sql.into_owned())
        .map_err(|e| GatewayError::MalformedPath(e.to_string()))
}

fn check_escapes(encoded: &str) -> GatewayResult<()> {
    let bytes = encoded.as_bytes();
    for (i, _) in encoded.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(GatewayError::MalformedPath(format!(
                "invalid escape at byte {}",
                i
            )));
        }
    }
    Ok(())
}

/// Run a gated read statement
async fn read_handler<E: SqlExecutor>(
    State(executor): State<Arc<E>>,
    uri: Uri,
) -> GatewayResult<Json<ReadResponse>> {
    let sql = statement_from_path(uri.path())?;
    gate::check(&sql, StatementClass::Read)?;

    let results = executor.query(&sql).await?;
    Ok(Json(ReadResponse { results }))
}

/// Insert the posted patient tuples
async fn write_handler<E: SqlExecutor>(
    State(executor): State<Arc<E>>,
    body: Result<Bytes, BytesRejection>,
) -> GatewayResult<Json<WriteResponse>> {
    let body = body.map_err(|e| GatewayError::MalformedBody(e.body_text()))?;
    let request: InsertPatientsRequest =
        serde_json::from_slice(&body).map_err(|e| GatewayError::MalformedBody(e.to_string()))?;
    debug!(params = ?request.params, "received params");

    let statement = InsertStatement::patients(&request.params)?;
    gate::check(statement.sql(), StatementClass::Write)?;

    let results = executor.execute(statement.sql(), statement.params()).await?;
    Ok(Json(WriteResponse {
        message: PATIENT_ADDED,
        results,
    }))
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_from_path_decodes() {
        let sql = statement_from_path("/lab5/api/SELECT%20*%20FROM%20patients").unwrap();
        assert_eq!(sql, "SELECT * FROM patients");
    }

    #[test]
    fn test_statement_keeps_slashes_and_plus() {
        let sql = statement_from_path("/lab5/api/select%201/2+3").unwrap();
        assert_eq!(sql, "select 1/2+3");
    }

    #[test]
    fn test_statement_from_bare_prefix_is_empty() {
        assert_eq!(statement_from_path("/lab5/api/").unwrap(), "");
    }

    #[test]
    fn test_statement_invalid_utf8() {
        assert!(matches!(
            statement_from_path("/lab5/api/select%FF"),
            Err(GatewayError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_statement_rejects_bad_escapes() {
        for path in [
            "/lab5/api/select%20'A%'",
            "/lab5/api/select%ZZ",
            "/lab5/api/select%2",
            "/lab5/api/select%",
        ] {
            assert!(
                matches!(statement_from_path(path), Err(GatewayError::MalformedPath(_))),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_statement_accepts_encoded_percent() {
        let sql = statement_from_path("/lab5/api/select%20'A%25'").unwrap();
        assert_eq!(sql, "select 'A%'");
    }

    #[test]
    fn test_params_request_shape() {
        let request: InsertPatientsRequest =
            serde_json::from_str(r#"{"params":[["Alice","1990-01-01"]]}"#).unwrap();
        assert_eq!(request.params, vec![PatientParams::new("Alice", "1990-01-01")]);
        assert!(serde_json::from_str::<InsertPatientsRequest>(r#"{"params":"x"}"#).is_err());
        assert!(serde_json::from_str::<InsertPatientsRequest>(r#"{}"#).is_err());
    }
}
