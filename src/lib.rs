//! patient-gateway - a thin HTTP gateway from gated SQL to MySQL
//!
//! Reads: `GET /lab5/api/<url-encoded SELECT>` returns the rows as JSON.
//! Writes: `POST /lab5/api/` with `{"params": [[name, dateOfBirth], ...]}`
//! inserts patients with a parameterized multi-row INSERT.
//!
//! The only guard on forwarded SQL is a leading-keyword check; see
//! [`query::gate`] for what that does and does not protect against.

pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod patient;
pub mod query;
