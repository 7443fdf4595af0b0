//! # Patient Gateway HTTP Server Module
//!
//! Axum server exposing the read and write paths under `/lab5/api/`.
//!
//! # Endpoints
//!
//! - `GET /lab5/api/<statement>` - gated SELECT, rows under `results`
//! - `POST /lab5/api/*` - insert `params` tuples into `patients`
//! - `OPTIONS *` - 204 preflight

pub mod config;
pub mod cors;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use cors::CorsPolicy;
pub use errors::{GatewayError, GatewayResult};
pub use routes::{gateway_routes, API_PREFIX};
pub use server::HttpServer;
