//! # Query Module
//!
//! Statement gating and statement construction.
//!
//! - `gate` - leading-keyword allow-list applied before anything reaches the pool
//! - `insert` - multi-row parameterized INSERT builder

pub mod gate;
pub mod insert;

pub use gate::{check, is_allowed, GateRejection, StatementClass};
pub use insert::{InsertError, InsertStatement};
