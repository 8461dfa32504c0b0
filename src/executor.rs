//! Blocking one-shot helpers: each call builds exactly one [`Command`], runs it against
//! the caller's connection and drops it before returning.
//!
//! Query helpers take a row mapper `FnMut(&CustomDbRow) -> Result<T, E>`. `E` is any
//! error type that can absorb [`SqlExtError`]; a mapper's own error comes back to the
//! caller as-is.

mod ext;
mod read_loop;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::command::Command;
use crate::connection::DbConnection;
use crate::error::SqlExtError;
use crate::in_clause::InClause;
use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

pub use ext::ConnectionExt;

use read_loop::{read_each, read_first, read_list, read_map};

/// An empty parameter list, for the `*_with_params` helpers.
pub const NO_PARAMS: [(&str, RowValues); 0] = [];

fn command_with_params<I, K, V>(text: &str, params: I) -> Result<Command, SqlExtError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
{
    let mut command = Command::new(text);
    command.add_parameters(params)?;
    Ok(command)
}

fn run_non_query<C>(conn: &mut C, command: &Command) -> Result<usize, SqlExtError>
where
    C: DbConnection + ?Sized,
{
    tracing::debug!(
        sql = command.text(),
        params = command.parameters().len(),
        "executing command"
    );
    conn.execute_command(command)
}

/// Execute a non-query command and return the number of affected rows.
///
/// # Errors
/// Returns the driver's error if the command fails.
pub fn execute<C>(conn: &mut C, text: &str) -> Result<usize, SqlExtError>
where
    C: DbConnection + ?Sized,
{
    let command = Command::new(text);
    run_non_query(conn, &command)
}

/// Bind every `(name, value)` entry, then execute as a non-query command.
///
/// ```rust
/// # #[cfg(feature = "sqlite")]
/// # fn main() -> Result<(), sql_conn_ext::SqlExtError> {
/// use sql_conn_ext::executor;
/// use sql_conn_ext::prelude::*;
///
/// let mut conn = rusqlite::Connection::open_in_memory()?;
/// executor::execute(&mut conn, "CREATE TABLE t (id INTEGER, name TEXT)")?;
/// let inserted = executor::execute_with_params(
///     &mut conn,
///     "INSERT INTO t (id, name) VALUES (@id, @name)",
///     [("id", RowValues::from(1)), ("name", RowValues::from("alice"))],
/// )?;
/// assert_eq!(inserted, 1);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "sqlite"))]
/// # fn main() {}
/// ```
///
/// # Errors
/// Returns `SqlExtError::ParameterError` for an invalid or duplicate name, otherwise the
/// driver's error.
pub fn execute_with_params<C, I, K, V>(
    conn: &mut C,
    text: &str,
    params: I,
) -> Result<usize, SqlExtError>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
{
    let command = command_with_params(text, params)?;
    run_non_query(conn, &command)
}

/// Map every row, in cursor order.
///
/// # Errors
/// Returns the driver's error or the first error `mapper` produced.
pub fn query_all<C, T, E, F>(conn: &mut C, text: &str, mapper: F) -> Result<Vec<T>, E>
where
    C: DbConnection + ?Sized,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let command = Command::new(text);
    read_list(conn, &command, mapper)
}

/// Map the first row, if there is one.
///
/// Extra rows are not an error; the cursor is closed after the first row and `mapper`
/// never sees the rest.
///
/// # Errors
/// Returns the driver's error or the error `mapper` produced.
pub fn query_single<C, T, E, F>(conn: &mut C, text: &str, mapper: F) -> Result<Option<T>, E>
where
    C: DbConnection + ?Sized,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let command = Command::new(text);
    read_first(conn, &command, mapper)
}

/// [`query_all`] with bound parameters.
///
/// # Errors
/// Parameter binding errors, driver errors, or the first mapper error.
pub fn query_all_with_params<C, I, K, V, T, E, F>(
    conn: &mut C,
    text: &str,
    params: I,
    mapper: F,
) -> Result<Vec<T>, E>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let command = command_with_params(text, params)?;
    read_list(conn, &command, mapper)
}

/// [`query_single`] with bound parameters.
///
/// # Errors
/// Parameter binding errors, driver errors, or the mapper error.
pub fn query_single_with_params<C, I, K, V, T, E, F>(
    conn: &mut C,
    text: &str,
    params: I,
    mapper: F,
) -> Result<Option<T>, E>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let command = command_with_params(text, params)?;
    read_first(conn, &command, mapper)
}

/// Bind `params`, expand `in_clause` into the command text, then map every row.
///
/// An `in_clause` with no values produces `IN ()`, which most databases reject.
///
/// # Errors
/// Parameter binding or expansion errors, driver errors, or the first mapper error.
pub fn query_with_in_clause<C, I, K, V, T, E, F>(
    conn: &mut C,
    text: &str,
    params: I,
    in_clause: &InClause,
    mapper: F,
) -> Result<Vec<T>, E>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let mut command = command_with_params(text, params)?;
    in_clause.apply(&mut command)?;
    read_list(conn, &command, mapper)
}

/// Build a map from every row, keyed by `key_mapper`.
///
/// # Errors
/// Returns `SqlExtError::DuplicateKey` (converted into `E`) when two rows map to the same
/// key, otherwise driver or mapper errors.
pub fn query_to_map<C, K, V, E, FK, FV>(
    conn: &mut C,
    text: &str,
    key_mapper: FK,
    value_mapper: FV,
) -> Result<HashMap<K, V>, E>
where
    C: DbConnection + ?Sized,
    K: Eq + Hash + Debug,
    E: From<SqlExtError>,
    FK: FnMut(&CustomDbRow) -> Result<K, E>,
    FV: FnMut(&CustomDbRow) -> Result<V, E>,
{
    let command = Command::new(text);
    read_map(conn, &command, key_mapper, value_mapper)
}

/// [`query_to_map`] with bound parameters.
///
/// # Errors
/// As [`query_to_map`], plus parameter binding errors.
pub fn query_to_map_with_params<C, I, PK, PV, K, V, E, FK, FV>(
    conn: &mut C,
    text: &str,
    params: I,
    key_mapper: FK,
    value_mapper: FV,
) -> Result<HashMap<K, V>, E>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (PK, PV)>,
    PK: Into<String>,
    PV: Into<RowValues>,
    K: Eq + Hash + Debug,
    E: From<SqlExtError>,
    FK: FnMut(&CustomDbRow) -> Result<K, E>,
    FV: FnMut(&CustomDbRow) -> Result<V, E>,
{
    let command = command_with_params(text, params)?;
    read_map(conn, &command, key_mapper, value_mapper)
}

/// Materialize every row without a mapper.
///
/// # Errors
/// Parameter binding errors or the driver's error.
pub fn query_result_set<C, I, K, V>(
    conn: &mut C,
    text: &str,
    params: I,
) -> Result<ResultSet, SqlExtError>
where
    C: DbConnection + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RowValues>,
{
    let command = command_with_params(text, params)?;
    let mut result_set = ResultSet::with_capacity(10);
    read_each(conn, &command, |row| -> Result<_, SqlExtError> {
        result_set.add_row(row.clone());
        Ok(std::ops::ControlFlow::Continue(()))
    })?;
    Ok(result_set)
}
