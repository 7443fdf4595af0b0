//! Row conversion
//!
//! Turns a MySQL result row into a JSON object keyed by column name, the
//! shape returned under `results` by the read path.
//!
//! | MySQL type                  | JSON                     |
//! |-----------------------------|--------------------------|
//! | NULL                        | `null`                   |
//! | BOOLEAN                     | bool                     |
//! | integer types, YEAR         | number                   |
//! | FLOAT, DOUBLE               | number                   |
//! | DECIMAL                     | string (exact digits)    |
//! | DATE                        | `"YYYY-MM-DD"`           |
//! | DATETIME, TIMESTAMP         | ISO 8601 string          |
//! | TIME                        | `"HH:MM:SS"`             |
//! | JSON                        | embedded value           |
//! | text, enum, set             | string                   |
//! | binary, blob, anything else | string (lossy UTF-8)     |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::DbResult;

/// Convert every row of a result set
pub fn rows_to_json(rows: &[MySqlRow]) -> DbResult<Vec<Value>> {
    rows.iter().map(row_to_json).collect()
}

/// Convert one row to a JSON object
pub fn row_to_json(row: &MySqlRow) -> DbResult<Value> {
    let mut object = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let value = column_value(row, index, column.type_info().name())?;
        object.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(object))
}

/// How a column's values are decoded, chosen from its MySQL type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Year,
    Float,
    Double,
    Date,
    DateTime,
    Timestamp,
    Time,
    Json,
    Text,
    /// DECIMAL, ENUM, SET, binary and anything unknown
    Lossy,
}

impl ColumnKind {
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => ColumnKind::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => ColumnKind::Unsigned,
            "YEAR" => ColumnKind::Year,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "DATE" => ColumnKind::Date,
            "DATETIME" => ColumnKind::DateTime,
            "TIMESTAMP" => ColumnKind::Timestamp,
            "TIME" => ColumnKind::Time,
            "JSON" => ColumnKind::Json,
            "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" => {
                ColumnKind::Text
            }
            _ => ColumnKind::Lossy,
        }
    }
}

fn column_value(row: &MySqlRow, index: usize, type_name: &str) -> DbResult<Value> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match ColumnKind::from_type_name(type_name) {
        ColumnKind::Bool => Value::Bool(row.try_get::<bool, _>(index)?),
        ColumnKind::Signed => Value::from(row.try_get::<i64, _>(index)?),
        ColumnKind::Unsigned => Value::from(row.try_get::<u64, _>(index)?),
        ColumnKind::Year => Value::from(row.try_get_unchecked::<u16, _>(index)?),
        ColumnKind::Float => Value::from(row.try_get::<f32, _>(index)? as f64),
        ColumnKind::Double => Value::from(row.try_get::<f64, _>(index)?),
        ColumnKind::Date => date_value(row.try_get::<NaiveDate, _>(index)?),
        ColumnKind::DateTime => datetime_value(row.try_get::<NaiveDateTime, _>(index)?),
        ColumnKind::Timestamp => timestamp_value(row.try_get::<DateTime<Utc>, _>(index)?),
        ColumnKind::Time => Value::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        ColumnKind::Json => row.try_get::<Value, _>(index)?,
        ColumnKind::Text => Value::String(row.try_get::<String, _>(index)?),
        // DECIMAL, ENUM and SET travel as text on the wire; BINARY and BLOB may hold anything.
        ColumnKind::Lossy => lossy_value(&row.try_get_unchecked::<Vec<u8>, _>(index)?),
    };

    Ok(value)
}

fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format("%Y-%m-%d").to_string())
}

fn datetime_value(datetime: NaiveDateTime) -> Value {
    Value::String(datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

fn timestamp_value(timestamp: DateTime<Utc>) -> Value {
    Value::String(timestamp.to_rfc3339())
}

fn lossy_value(bytes: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(bytes).into_owned())
}
