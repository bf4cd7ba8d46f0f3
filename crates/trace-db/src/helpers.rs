//! Row-to-entity parsing and value-binding helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic, including the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`)
//! and the per-`DataType` encoding of typed diff values.

use chrono::{DateTime, NaiveDate, Utc};
use libsql::Value;
use trace_core::enums::DataType;
use trace_core::values::DiffValue;

use crate::error::DatabaseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse an optional TEXT column holding a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a valid date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all trace-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Bind an optional integer, mapping `None` to SQL NULL.
#[must_use]
pub fn opt_integer(v: Option<i64>) -> Value {
    v.map_or(Value::Null, Value::Integer)
}

/// Bind an optional string, mapping `None` to SQL NULL.
#[must_use]
pub fn opt_text(v: Option<&str>) -> Value {
    v.map_or(Value::Null, |s| Value::Text(s.to_string()))
}

/// Convert a row count or position to a SQL integer, saturating at `i64::MAX`.
#[must_use]
pub fn sql_count(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Map `DataType` to the table holding its old/new value pairs.
///
/// Exhaustive: a new `DataType` variant needs a table here.
#[must_use]
pub const fn value_table(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Str => "change_values_str",
        DataType::Int => "change_values_int",
        DataType::Float => "change_values_float",
        DataType::Bool => "change_values_bool",
        DataType::Date => "change_values_date",
        DataType::DateTime => "change_values_date_time",
    }
}

/// Encode a typed value as the `(old_value, new_value)` pair stored in its table.
#[must_use]
pub fn value_columns(value: &DiffValue) -> (Value, Value) {
    fn pair<T>(old: Option<T>, new: Option<T>, f: impl Fn(T) -> Value) -> (Value, Value) {
        (old.map_or(Value::Null, &f), new.map_or(Value::Null, &f))
    }

    match value {
        DiffValue::Str { old, new } => pair(old.clone(), new.clone(), Value::Text),
        DiffValue::Int { old, new } => pair(*old, *new, Value::Integer),
        DiffValue::Float { old, new } => pair(*old, *new, Value::Real),
        DiffValue::Bool { old, new } => pair(*old, *new, |b| Value::Integer(i64::from(b))),
        DiffValue::Date { old, new } => pair(*old, *new, |d| {
            Value::Text(d.format(DATE_FORMAT).to_string())
        }),
        DiffValue::DateTime { old, new } => pair(*old, *new, |dt| Value::Text(dt.to_rfc3339())),
    }
}

/// Decode the `(old_value, new_value)` columns at `idx`, `idx + 1` for `data_type`.
///
/// # Errors
///
/// Returns `DatabaseError` if a column has the wrong storage class or cannot
/// be parsed.
pub fn decode_value(
    data_type: DataType,
    row: &libsql::Row,
    idx: i32,
) -> Result<DiffValue, DatabaseError> {
    let value = match data_type {
        DataType::Str => DiffValue::Str {
            old: row.get::<Option<String>>(idx)?,
            new: row.get::<Option<String>>(idx + 1)?,
        },
        DataType::Int => DiffValue::Int {
            old: row.get::<Option<i64>>(idx)?,
            new: row.get::<Option<i64>>(idx + 1)?,
        },
        DataType::Float => DiffValue::Float {
            old: row.get::<Option<f64>>(idx)?,
            new: row.get::<Option<f64>>(idx + 1)?,
        },
        DataType::Bool => DiffValue::Bool {
            old: row.get::<Option<i64>>(idx)?.map(|v| v != 0),
            new: row.get::<Option<i64>>(idx + 1)?.map(|v| v != 0),
        },
        DataType::Date => DiffValue::Date {
            old: parse_optional_date(row.get::<Option<String>>(idx)?.as_deref())?,
            new: parse_optional_date(row.get::<Option<String>>(idx + 1)?.as_deref())?,
        },
        DataType::DateTime => DiffValue::DateTime {
            old: parse_optional_datetime(row.get::<Option<String>>(idx)?.as_deref())?,
            new: parse_optional_datetime(row.get::<Option<String>>(idx + 1)?.as_deref())?,
        },
    };
    Ok(value)
}
