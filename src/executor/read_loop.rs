use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::ControlFlow;

use crate::command::Command;
use crate::connection::DbConnection;
use crate::error::SqlExtError;
use crate::results::CustomDbRow;

/// Drive the connection's cursor, handing each row to `on_row`.
///
/// A mapper error stops the cursor; it is stashed and returned after the backend has
/// released its statement, so the caller sees the mapper's own error value.
pub(crate) fn read_each<C, E, F>(conn: &mut C, command: &Command, mut on_row: F) -> Result<(), E>
where
    C: DbConnection + ?Sized,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<ControlFlow<()>, E>,
{
    tracing::debug!(
        sql = command.text(),
        params = command.parameters().len(),
        "running query"
    );

    let mut failure: Option<E> = None;
    let mut seen = 0usize;
    conn.read_rows(command, &mut |row: &CustomDbRow| {
        seen += 1;
        tracing::trace!(row = seen, "visiting row");
        match on_row(row) {
            Ok(flow) => flow,
            Err(err) => {
                failure = Some(err);
                ControlFlow::Break(())
            }
        }
    })?;

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub(crate) fn read_list<C, T, E, F>(
    conn: &mut C,
    command: &Command,
    mut mapper: F,
) -> Result<Vec<T>, E>
where
    C: DbConnection + ?Sized,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let mut list = Vec::new();
    read_each(conn, command, |row| -> Result<ControlFlow<()>, E> {
        list.push(mapper(row)?);
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(list)
}

pub(crate) fn read_first<C, T, E, F>(
    conn: &mut C,
    command: &Command,
    mut mapper: F,
) -> Result<Option<T>, E>
where
    C: DbConnection + ?Sized,
    E: From<SqlExtError>,
    F: FnMut(&CustomDbRow) -> Result<T, E>,
{
    let mut first = None;
    read_each(conn, command, |row| -> Result<ControlFlow<()>, E> {
        first = Some(mapper(row)?);
        Ok(ControlFlow::Break(()))
    })?;
    Ok(first)
}

pub(crate) fn read_map<C, K, V, E, FK, FV>(
    conn: &mut C,
    command: &Command,
    mut key_mapper: FK,
    mut value_mapper: FV,
) -> Result<HashMap<K, V>, E>
where
    C: DbConnection + ?Sized,
    K: Eq + Hash + Debug,
    E: From<SqlExtError>,
    FK: FnMut(&CustomDbRow) -> Result<K, E>,
    FV: FnMut(&CustomDbRow) -> Result<V, E>,
{
    let mut map = HashMap::new();
    read_each(conn, command, |row| -> Result<ControlFlow<()>, E> {
        let key = key_mapper(row)?;
        let value = value_mapper(row)?;
        match map.entry(key) {
            Entry::Occupied(existing) => {
                Err(SqlExtError::DuplicateKey(format!("{:?}", existing.key())).into())
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(ControlFlow::Continue(()))
            }
        }
    })?;
    Ok(map)
}
