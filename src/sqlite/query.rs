use std::ops::ControlFlow;

use rusqlite::types::Value;

use crate::command::Command;
use crate::connection::RowVisitor;
use crate::error::SqlExtError;
use crate::results::Columns;
use crate::types::RowValues;

use super::params::prepare_bound;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlExtError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlExtError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run `command` and stream its rows into `visit`.
///
/// The statement is prepared here and finalized when this function returns, whether the
/// cursor was drained, stopped early, or failed.
pub(crate) fn read_rows(
    conn: &rusqlite::Connection,
    command: &Command,
    visit: &mut RowVisitor<'_>,
) -> Result<(), SqlExtError> {
    let mut stmt = prepare_bound(conn, command)?;
    let columns = Columns::new(
        stmt.column_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    );

    let mut rows = stmt.raw_query();
    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }

        if let ControlFlow::Break(()) = visit(&columns.row(row_values)) {
            break;
        }
    }

    Ok(())
}

pub(crate) fn execute(conn: &rusqlite::Connection, command: &Command) -> Result<usize, SqlExtError> {
    let mut stmt = prepare_bound(conn, command)?;
    Ok(stmt.raw_execute()?)
}
