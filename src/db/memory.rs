//! In-memory executor
//!
//! Stands in for MySQL in tests. It records every statement it receives and
//! understands just enough SQL to keep a patients table: multi-row inserts
//! into `patients`, and `SELECT * FROM patients` with an optional
//! `WHERE patientID = <n>`. Anything else is rejected the way a server would
//! reject a bad statement.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::patient::Patient;

use super::executor::{ExecResult, SqlExecutor};
use super::{DbError, DbResult};

/// A statement seen by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Vec<String>,
}

#[derive(Debug, Default)]
struct Inner {
    patients: Vec<Patient>,
    next_id: u64,
    statements: Vec<RecordedStatement>,
}

/// Recording executor over an in-memory patients table
#[derive(Debug, Default)]
pub struct InMemoryExecutor {
    inner: RwLock<Inner>,
}

impl InMemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement received so far, in arrival order
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.read().statements.clone()
    }

    /// Number of statements received so far
    pub fn statement_count(&self) -> usize {
        self.read().statements.len()
    }

    /// Current table contents
    pub fn patients(&self) -> Vec<Patient> {
        self.read().patients.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Lowercased statement with runs of whitespace collapsed
fn normalize(sql: &str) -> String {
    sql.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl SqlExecutor for InMemoryExecutor {
    async fn query(&self, sql: &str) -> DbResult<Vec<Value>> {
        let mut inner = self.write();
        inner.statements.push(RecordedStatement {
            sql: sql.to_string(),
            params: Vec::new(),
        });

        let normalized = normalize(sql);
        let filter = match normalized.strip_prefix("select * from patients") {
            Some("") => None,
            Some(rest) => {
                let id = rest
                    .trim()
                    .strip_prefix("where patientid =")
                    .and_then(|id| id.trim().parse::<u64>().ok())
                    .ok_or_else(|| DbError::Rejected(format!("unsupported query: {}", sql)))?;
                Some(id)
            }
            None => return Err(DbError::Rejected(format!("unsupported query: {}", sql))),
        };

        inner
            .patients
            .iter()
            .filter(|p| filter.map_or(true, |id| p.patient_id == id))
            .map(|p| serde_json::to_value(p).map_err(|e| DbError::Rejected(e.to_string())))
            .collect()
    }

    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<ExecResult> {
        let mut inner = self.write();
        inner.statements.push(RecordedStatement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        if !normalize(sql).starts_with("insert into patients (name, dateofbirth) values") {
            return Err(DbError::Rejected(format!("unsupported statement: {}", sql)));
        }
        if params.is_empty() || params.len() % 2 != 0 {
            return Err(DbError::Rejected(format!(
                "expected name/date pairs, got {} parameters",
                params.len()
            )));
        }

        // Validate the whole batch first; a failed insert leaves no rows behind.
        let mut rows = Vec::with_capacity(params.len() / 2);
        for pair in params.chunks(2) {
            let date_of_birth = NaiveDate::parse_from_str(&pair[1], "%Y-%m-%d")
                .map_err(|_| DbError::Rejected(format!("incorrect date value: '{}'", pair[1])))?;
            rows.push((pair[0].clone(), date_of_birth));
        }

        let insert_id = inner.next_id + 1;
        for (name, date_of_birth) in rows {
            inner.next_id += 1;
            let patient_id = inner.next_id;
            inner.patients.push(Patient {
                patient_id,
                name,
                date_of_birth,
            });
        }

        Ok(ExecResult {
            affected_rows: (params.len() / 2) as u64,
            insert_id,
            warning_status: 0,
        })
    }
}
