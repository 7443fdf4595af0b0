//! Patient record
//!
//! The only entity the gateway knows about. Rows live entirely in MySQL;
//! these types exist for the duration of a single request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Table holding patient rows
pub const PATIENTS_TABLE: &str = "patients";

/// Columns written by the insert path, in placeholder order
pub const INSERT_COLUMNS: [&str; 2] = ["name", "dateOfBirth"];

/// DDL run by the bootstrap step
pub const CREATE_PATIENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS patients (
    patientID INTEGER AUTO_INCREMENT PRIMARY KEY,
    name TEXT NOT NULL,
    dateOfBirth DATE NOT NULL
) ENGINE=InnoDB";

/// A persisted patient row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "patientID")]
    pub patient_id: u64,
    pub name: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
}

/// One `[name, dateOfBirth]` tuple of a write request.
///
/// Deserializes from a JSON array of exactly two strings; any other arity
/// is a deserialization error rather than a coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientParams(pub String, pub String);

impl PatientParams {
    pub fn new(name: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
        Self(name.into(), date_of_birth.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn date_of_birth(&self) -> &str {
        &self.1
    }

    /// Fields in column order
    pub fn fields(&self) -> [&str; 2] {
        [&self.0, &self.1]
    }
}
