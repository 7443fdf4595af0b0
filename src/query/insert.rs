//! Multi-row INSERT construction
//!
//! Builds `INSERT INTO <table> (<cols>) VALUES (?, ?), (?, ?), ...` with one
//! placeholder group per row, and the flattened parameter list whose order
//! matches the placeholders left to right.

use thiserror::Error;

use crate::patient::{PatientParams, INSERT_COLUMNS, PATIENTS_TABLE};

/// Insert construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// No rows to insert
    #[error("insert requires at least one row")]
    Empty,

    /// A row does not have one value per column
    #[error("row {row} has {found} values, expected {expected}")]
    Arity {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A parameterized INSERT and its bound values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    sql: String,
    params: Vec<String>,
    rows: usize,
}

impl InsertStatement {
    /// Build an insert of `rows` into `table`.
    ///
    /// Every row must carry exactly `columns.len()` values.
    pub fn build<R, V>(table: &str, columns: &[&str], rows: &[R]) -> Result<Self, InsertError>
    where
        R: AsRef<[V]>,
        V: AsRef<str>,
    {
        if rows.is_empty() {
            return Err(InsertError::Empty);
        }

        let mut params = Vec::with_capacity(rows.len() * columns.len());
        for (index, row) in rows.iter().enumerate() {
            let values = row.as_ref();
            if values.len() != columns.len() {
                return Err(InsertError::Arity {
                    row: index,
                    found: values.len(),
                    expected: columns.len(),
                });
            }
            params.extend(values.iter().map(|v| v.as_ref().to_string()));
        }

        let group = format!("({})", vec!["?"; columns.len()].join(", "));
        let placeholders = vec![group.as_str(); rows.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            columns.join(", "),
            placeholders
        );

        Ok(Self {
            sql,
            params,
            rows: rows.len(),
        })
    }

    /// Insert of patient tuples into the patients table
    pub fn patients(rows: &[PatientParams]) -> Result<Self, InsertError> {
        let fields: Vec<[&str; 2]> = rows.iter().map(PatientParams::fields).collect();
        Self::build(PATIENTS_TABLE, &INSERT_COLUMNS, &fields)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Flattened parameters, in placeholder order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Number of placeholder groups
    pub fn row_count(&self) -> usize {
        self.rows
    }
}
