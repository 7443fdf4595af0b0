//! Gateway Route Tests
//!
//! Drives the full router (CORS, routing, handlers) against the in-memory
//! executor:
//! - Read path forwards only gated SELECTs
//! - Write path builds one placeholder group per tuple
//! - Preflight, 404 and 405 never reach the executor
//! - CORS headers on every response

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use patient_gateway::db::InMemoryExecutor;
use patient_gateway::http_server::{HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const ORIGIN: &str = "http://127.0.0.1:5500";

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (Arc<InMemoryExecutor>, Router) {
    let executor = Arc::new(InMemoryExecutor::new());
    let server = HttpServer::new(HttpServerConfig::default(), executor.clone()).unwrap();
    (executor, server.router())
}

async fn send(router: &Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

async fn get(router: &Router, uri: &str) -> Response {
    send(router, Method::GET, uri, Body::empty()).await
}

async fn post(router: &Router, body: Value) -> Response {
    send(router, Method::POST, "/lab5/api/", Body::from(body.to_string())).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

fn assert_json(response: &Response) {
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}

// =============================================================================
// Read Path
// =============================================================================

#[tokio::test]
async fn test_select_returns_rows_under_results() {
    let (executor, router) = setup();
    post(&router, json!({"params": [["Alice", "1990-01-01"]]})).await;

    let response = get(&router, "/lab5/api/SELECT%20*%20FROM%20patients").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"results": [{"patientID": 1, "name": "Alice", "dateOfBirth": "1990-01-01"}]})
    );
    assert_eq!(executor.statements()[1].sql, "SELECT * FROM patients");
}

#[tokio::test]
async fn test_decoded_text_forwarded_verbatim() {
    let (executor, router) = setup();
    let response = get(&router, "/lab5/api/%20%20sElEcT%20*%20FROM%20patients%20").await;
    assert_eq!(response.status(), StatusCode::OK);

    let statements = executor.statements();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].sql, "  sElEcT * FROM patients ");
    assert!(statements[0].params.is_empty());
}

#[tokio::test]
async fn test_drop_table_forbidden_without_execution() {
    let (executor, router) = setup();
    let response = get(&router, "/lab5/api/DROP%20TABLE%20patients").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_cors(&response);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "Query not allowed. Only SELECT queries are permitted."
    );
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_non_select_statements_forbidden() {
    let (executor, router) = setup();
    for path in [
        "/lab5/api/",
        "/lab5/api/INSERT%20INTO%20patients%20VALUES%20(1)",
        "/lab5/api/update%20patients%20set%20name%3D'x'",
        "/lab5/api/%20%20delete%20from%20patients",
        "/lab5/api/(select%201)",
    ] {
        let response = get(&router, path).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", path);
    }
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_execution_error_is_generic_400() {
    let (executor, router) = setup();
    let response = get(&router, "/lab5/api/SELECT%20secret%20FROM%20doctors").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"message": "An error occurred while executing the query."})
    );
    assert_eq!(executor.statement_count(), 1);
}

#[tokio::test]
async fn test_invalid_utf8_path_is_400() {
    let (executor, router) = setup();
    let response = get(&router, "/lab5/api/select%20%FF").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_stray_percent_is_400_without_execution() {
    let (executor, router) = setup();
    for uri in [
        "/lab5/api/select%20'A%'",
        "/lab5/api/select%20*%20from%20patients%20where%20name%20like%20'A%'",
        "/lab5/api/select%ZZ",
    ] {
        let response = get(&router, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_cors(&response);
        assert_json(&response);
        let body = json_body(response).await;
        assert_eq!(body["message"], "An error occurred while executing the query.");
    }
    assert_eq!(executor.statement_count(), 0);
}

// =============================================================================
// Write Path
// =============================================================================

#[tokio::test]
async fn test_insert_two_patients() {
    let (executor, router) = setup();
    let response = post(
        &router,
        json!({"params": [["Alice", "1990-01-01"], ["Bob", "1985-05-05"]]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Patient added successfully");
    assert_eq!(body["results"]["affectedRows"], 2);
    assert_eq!(body["results"]["insertId"], 1);
    assert_eq!(body["results"]["warningStatus"], 0);

    let statements = executor.statements();
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].sql,
        "INSERT INTO patients (name, dateOfBirth) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(
        statements[0].params,
        vec!["Alice", "1990-01-01", "Bob", "1985-05-05"]
    );
}

#[tokio::test]
async fn test_post_on_any_subpath() {
    let (_executor, router) = setup();
    let body = json!({"params": [["Carol", "2000-02-29"]]});
    let response = send(
        &router,
        Method::POST,
        "/lab5/api/anything/here",
        Body::from(body.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_bodies_are_400() {
    let (executor, router) = setup();
    for body in [
        "not json",
        "{}",
        r#"{"params": "Alice"}"#,
        r#"{"params": [["Alice"]]}"#,
        r#"{"params": [["Alice", "1990-01-01", "extra"]]}"#,
        r#"{"params": [["Alice", 1990]]}"#,
        r#"{"params": []}"#,
    ] {
        let response = send(&router, Method::POST, "/lab5/api/", Body::from(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert_cors(&response);
        let json = json_body(response).await;
        assert_eq!(json["message"], "An error occurred while executing the query.");
    }
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_generic_400() {
    let (executor, router) = setup();
    let tuple = r#"["Alice","1990-01-01"]"#;
    let tuples = vec![tuple; 120_000].join(",");
    let body = format!(r#"{{"params": [{}]}}"#, tuples);
    assert!(body.len() > 2 * 1024 * 1024);

    let response = send(&router, Method::POST, "/lab5/api/", Body::from(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_json(&response);
    let json = json_body(response).await;
    assert_eq!(json["message"], "An error occurred while executing the query.");
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_database_rejection_is_400() {
    let (executor, router) = setup();
    let response = post(&router, json!({"params": [["Alice", "yesterday"]]})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(executor.statement_count(), 1);
    assert!(executor.patients().is_empty());
}

#[tokio::test]
async fn test_insert_then_select_round_trip() {
    let (_executor, router) = setup();
    post(&router, json!({"params": [["Alice", "1990-01-01"]]})).await;
    let response = post(&router, json!({"params": [["Bob", "1985-05-05"]]})).await;
    let id = json_body(response).await["results"]["insertId"]
        .as_u64()
        .unwrap();

    let uri = format!(
        "/lab5/api/SELECT%20*%20FROM%20patients%20WHERE%20patientID%20%3D%20{}",
        id
    );
    let body = json_body(get(&router, &uri).await).await;
    let rows = body["results"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patientID"], id);
    assert_eq!(rows[0]["name"], "Bob");
    assert_eq!(rows[0]["dateOfBirth"], "1985-05-05");
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_preflight_is_204_without_database() {
    let (executor, router) = setup();
    for uri in ["/lab5/api/SELECT%201", "/other", "/"] {
        let response = send(&router, Method::OPTIONS, uri, Body::empty()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_unknown_path_is_404_for_every_method() {
    let (executor, router) = setup();
    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        for uri in ["/other", "/lab5/api", "/lab5/SELECT%201"] {
            let response = send(&router, method.clone(), uri, Body::empty()).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} {}", method, uri);
            assert_cors(&response);
            assert_json(&response);
            assert_eq!(json_body(response).await, json!({"message": "Not Found"}));
        }
    }
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_other_methods_on_prefix_are_405() {
    let (executor, router) = setup();
    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(&router, method, "/lab5/api/SELECT%201", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await["message"],
            "This method is not allowed. Only 'GET' and 'POST' methods are allowed."
        );
    }
    assert_eq!(executor.statement_count(), 0);
}

#[tokio::test]
async fn test_configured_origin_is_used() {
    let executor = Arc::new(InMemoryExecutor::new());
    let config = HttpServerConfig {
        allowed_origin: "https://clinic.example".to_string(),
        ..Default::default()
    };
    let router = HttpServer::new(config, executor).unwrap().router();

    let response = get(&router, "/other").await;
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://clinic.example"
    );
}
