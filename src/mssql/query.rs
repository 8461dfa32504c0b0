use std::ops::ControlFlow;

use chrono::NaiveDateTime;
use futures_util::TryStreamExt;

use super::client::MssqlConnection;
use super::params::bind_command;
use crate::command::Command;
use crate::connection::{DbConnection, RowVisitor};
use crate::error::SqlExtError;
use crate::results::Columns;
use crate::types::RowValues;

impl DbConnection for MssqlConnection {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        let query = bind_command(command);
        let client = &mut self.client;
        let exec_result = self.runtime.block_on(query.execute(client))?;
        let rows_affected: u64 = exec_result.rows_affected().iter().sum();

        usize::try_from(rows_affected).map_err(|e| {
            SqlExtError::ExecutionError(format!("Invalid rows affected count: {e}"))
        })
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        let query = bind_command(command);
        let Self { runtime, client } = self;

        runtime.block_on(async move {
            let stream = query.query(client).await?;
            let mut rows = stream.into_row_stream();
            let mut columns: Option<Columns> = None;

            // The stream is dropped on every exit; tiberius drains leftovers on the next
            // request.
            while let Some(row) = rows.try_next().await? {
                let layout = columns_for(&row, &mut columns);
                let mut row_values = Vec::with_capacity(layout.len());
                for i in 0..layout.len() {
                    row_values.push(extract_value(&row, i)?.unwrap_or(RowValues::Null));
                }

                if let ControlFlow::Break(()) = visit(&layout.row(row_values)) {
                    break;
                }
            }

            Ok::<(), SqlExtError>(())
        })
    }
}

/// Reuse the cached layout unless this row belongs to a result set with other columns.
fn columns_for<'c>(row: &tiberius::Row, cached: &'c mut Option<Columns>) -> &'c Columns {
    let same = cached.as_ref().is_some_and(|c| {
        c.len() == row.columns().len()
            && c.names()
                .iter()
                .zip(row.columns())
                .all(|(name, col)| name == col.name())
    });
    if !same {
        *cached = Some(Columns::new(
            row.columns().iter().map(|col| col.name().to_string()).collect(),
        ));
    }
    cached.get_or_insert_with(|| Columns::new(Vec::new()))
}

/// Extract a value from a row at a specific index
///
/// Tries the common column types in turn.
fn extract_value(
    row: &tiberius::Row,
    idx: usize,
) -> Result<Option<RowValues>, SqlExtError> {
    if let Ok(Some(val)) = row.try_get::<i32, _>(idx) {
        return Ok(Some(RowValues::Int(i64::from(val))));
    }

    if let Ok(Some(val)) = row.try_get::<i64, _>(idx) {
        return Ok(Some(RowValues::Int(val)));
    }

    if let Ok(Some(val)) = row.try_get::<i16, _>(idx) {
        return Ok(Some(RowValues::Int(i64::from(val))));
    }

    if let Ok(Some(val)) = row.try_get::<u8, _>(idx) {
        return Ok(Some(RowValues::Int(i64::from(val))));
    }

    if let Ok(Some(val)) = row.try_get::<f32, _>(idx) {
        return Ok(Some(RowValues::Float(f64::from(val))));
    }

    if let Ok(Some(val)) = row.try_get::<f64, _>(idx) {
        return Ok(Some(RowValues::Float(val)));
    }

    if let Ok(Some(val)) = row.try_get::<bool, _>(idx) {
        return Ok(Some(RowValues::Bool(val)));
    }

    if let Ok(Some(val)) = row.try_get::<NaiveDateTime, _>(idx) {
        return Ok(Some(RowValues::Timestamp(val)));
    }

    // Date-like text stays text; `RowValues::as_timestamp` parses it on request.
    if let Ok(Some(val)) = row.try_get::<&str, _>(idx) {
        return Ok(Some(RowValues::Text(val.to_string())));
    }

    if let Ok(Some(val)) = row.try_get::<&[u8], _>(idx) {
        return Ok(Some(RowValues::Blob(val.to_vec())));
    }

    Ok(None)
}
