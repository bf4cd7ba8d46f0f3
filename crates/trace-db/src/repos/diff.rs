//! Diff repository: field-level change rows and their typed values.
//!
//! `changes.value_id` is a plain integer; the table it points into is picked
//! by `changes.data_type` through [`value_table`].

use libsql::Value;

use trace_core::entities::{Diff, DiffEntry, NewDiff};
use trace_core::enums::DataType;
use trace_core::values::DiffValue;

use crate::error::DatabaseError;
use crate::helpers::{decode_value, opt_integer, parse_enum, value_columns, value_table};

const SELECT_COLS: &str =
    "id, change_request_id, object_id, content_type, field_name, change_type, data_type, value_id";

fn row_to_diff_entry(row: &libsql::Row) -> Result<DiffEntry, DatabaseError> {
    Ok(DiffEntry {
        id: row.get::<i64>(0)?,
        change_request_id: row.get::<i64>(1)?,
        object_id: row.get::<Option<i64>>(2)?,
        content_type: parse_enum(&row.get::<String>(3)?)?,
        field_name: row.get::<String>(4)?,
        change_type: parse_enum(&row.get::<String>(5)?)?,
        data_type: parse_enum(&row.get::<String>(6)?)?,
        value_id: row.get::<i64>(7)?,
    })
}

/// Insert the old/new pair into the table for its data type; returns the value id.
async fn insert_value(conn: &libsql::Connection, value: &DiffValue) -> Result<i64, DatabaseError> {
    let (old, new) = value_columns(value);
    let sql = format!(
        "INSERT INTO {} (old_value, new_value) VALUES (?1, ?2)",
        value_table(value.data_type())
    );
    conn.execute(&sql, libsql::params_from_iter(vec![old, new]))
        .await?;
    Ok(conn.last_insert_rowid())
}

/// Load a value by id from the table `data_type` selects.
async fn load_value(
    conn: &libsql::Connection,
    data_type: DataType,
    value_id: i64,
) -> Result<DiffValue, DatabaseError> {
    let sql = format!(
        "SELECT old_value, new_value FROM {} WHERE id = ?1",
        value_table(data_type)
    );
    let mut rows = conn.query(&sql, [value_id]).await?;
    let row = rows.next().await?.ok_or_else(|| {
        DatabaseError::InvalidState(format!(
            "diff points at missing {data_type} value {value_id}"
        ))
    })?;
    decode_value(data_type, &row, 0)
}

/// Write one diff (value row first, then the change row) under `change_request_id`.
pub(crate) async fn insert_diff(
    conn: &libsql::Connection,
    change_request_id: i64,
    diff: &NewDiff,
) -> Result<Diff, DatabaseError> {
    let value_id = insert_value(conn, diff.value()).await?;

    conn.execute(
        "INSERT INTO changes (change_request_id, object_id, content_type, field_name, change_type, data_type, value_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params_from_iter(vec![
            Value::Integer(change_request_id),
            opt_integer(diff.object_id()),
            Value::Text(diff.content_type().as_str().to_string()),
            Value::Text(diff.field_name().to_string()),
            Value::Text(diff.change_type().as_str().to_string()),
            Value::Text(diff.data_type().as_str().to_string()),
            Value::Integer(value_id),
        ]),
    )
    .await?;

    Ok(Diff {
        entry: DiffEntry {
            id: conn.last_insert_rowid(),
            change_request_id,
            object_id: diff.object_id(),
            content_type: diff.content_type(),
            field_name: diff.field_name().to_string(),
            change_type: diff.change_type(),
            data_type: diff.data_type(),
            value_id,
        },
        value: diff.value().clone(),
    })
}

/// All diffs of one change request in insertion order, values decoded.
pub(crate) async fn list_diffs(
    conn: &libsql::Connection,
    change_request_id: i64,
) -> Result<Vec<Diff>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM changes WHERE change_request_id = ?1 ORDER BY id");
    let mut rows = conn.query(&sql, [change_request_id]).await?;

    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_diff_entry(&row)?);
    }

    let mut diffs = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = load_value(conn, entry.data_type, entry.value_id).await?;
        diffs.push(Diff { entry, value });
    }
    Ok(diffs)
}
