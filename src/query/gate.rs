//! Query gate
//!
//! Accepts a statement when, after trimming and lowercasing, it begins with
//! the keyword of the expected class: `select` for reads, `insert` for writes.
//!
//! # Weakness
//!
//! This is a prefix check and nothing more. Everything after the keyword is
//! forwarded verbatim, so it does not stop injection past the first token,
//! does not block stacked statements the driver may accept, and does not
//! validate table or column names. `selectfoo` passes. Callers must not
//! treat an accepted statement as safe.

use std::fmt;

use thiserror::Error;

/// Statement class expected by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementClass {
    /// Read path, `select` only
    Read,
    /// Write path, `insert` only
    Write,
}

impl StatementClass {
    /// Leading keyword, lowercase
    pub fn keyword(&self) -> &'static str {
        match self {
            StatementClass::Read => "select",
            StatementClass::Write => "insert",
        }
    }
}

impl fmt::Display for StatementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementClass::Read => write!(f, "read"),
            StatementClass::Write => write!(f, "write"),
        }
    }
}

/// A statement refused by the gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class} statement must begin with '{}'", .class.keyword())]
pub struct GateRejection {
    pub class: StatementClass,
}

/// Returns true when `sql` starts with the keyword for `class`.
pub fn is_allowed(sql: &str, class: StatementClass) -> bool {
    sql.trim().to_lowercase().starts_with(class.keyword())
}

/// Same as [`is_allowed`], as a `Result` for `?` at call sites.
pub fn check(sql: &str, class: StatementClass) -> Result<(), GateRejection> {
    if is_allowed(sql, class) {
        Ok(())
    } else {
        Err(GateRejection { class })
    }
}
