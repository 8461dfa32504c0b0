use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::connection::DbConnection;
use crate::error::SqlExtError;
use crate::in_clause::InClause;
use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

/// Method-call form of the [`crate::executor`] helpers, available on every
/// [`DbConnection`].
///
/// The non-query methods are named `execute_non_query*` so they do not shadow a
/// driver's inherent `execute`.
pub trait ConnectionExt: DbConnection {
    /// See [`crate::executor::execute`].
    ///
    /// # Errors
    /// Returns the driver's error if the command fails.
    fn execute_non_query(&mut self, text: &str) -> Result<usize, SqlExtError> {
        super::execute(self, text)
    }

    /// See [`crate::executor::execute_with_params`].
    ///
    /// # Errors
    /// Parameter binding errors or the driver's error.
    fn execute_non_query_with_params<I, K, V>(
        &mut self,
        text: &str,
        params: I,
    ) -> Result<usize, SqlExtError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        super::execute_with_params(self, text, params)
    }

    /// See [`crate::executor::query_all`].
    ///
    /// # Errors
    /// Driver errors or the first mapper error.
    fn query_all<T, E, F>(&mut self, text: &str, mapper: F) -> Result<Vec<T>, E>
    where
        E: From<SqlExtError>,
        F: FnMut(&CustomDbRow) -> Result<T, E>,
    {
        super::query_all(self, text, mapper)
    }

    /// See [`crate::executor::query_single`].
    ///
    /// # Errors
    /// Driver errors or the mapper error.
    fn query_single<T, E, F>(&mut self, text: &str, mapper: F) -> Result<Option<T>, E>
    where
        E: From<SqlExtError>,
        F: FnMut(&CustomDbRow) -> Result<T, E>,
    {
        super::query_single(self, text, mapper)
    }

    /// See [`crate::executor::query_all_with_params`].
    ///
    /// # Errors
    /// Parameter binding errors, driver errors, or the first mapper error.
    fn query_all_with_params<I, K, V, T, E, F>(
        &mut self,
        text: &str,
        params: I,
        mapper: F,
    ) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
        E: From<SqlExtError>,
        F: FnMut(&CustomDbRow) -> Result<T, E>,
    {
        super::query_all_with_params(self, text, params, mapper)
    }

    /// See [`crate::executor::query_single_with_params`].
    ///
    /// # Errors
    /// Parameter binding errors, driver errors, or the mapper error.
    fn query_single_with_params<I, K, V, T, E, F>(
        &mut self,
        text: &str,
        params: I,
        mapper: F,
    ) -> Result<Option<T>, E>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
        E: From<SqlExtError>,
        F: FnMut(&CustomDbRow) -> Result<T, E>,
    {
        super::query_single_with_params(self, text, params, mapper)
    }

    /// See [`crate::executor::query_with_in_clause`].
    ///
    /// # Errors
    /// Binding or expansion errors, driver errors, or the first mapper error.
    fn query_with_in_clause<I, K, V, T, E, F>(
        &mut self,
        text: &str,
        params: I,
        in_clause: &InClause,
        mapper: F,
    ) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
        E: From<SqlExtError>,
        F: FnMut(&CustomDbRow) -> Result<T, E>,
    {
        super::query_with_in_clause(self, text, params, in_clause, mapper)
    }

    /// See [`crate::executor::query_to_map`].
    ///
    /// # Errors
    /// Duplicate keys, driver errors, or mapper errors.
    fn query_to_map<K, V, E, FK, FV>(
        &mut self,
        text: &str,
        key_mapper: FK,
        value_mapper: FV,
    ) -> Result<HashMap<K, V>, E>
    where
        K: Eq + Hash + Debug,
        E: From<SqlExtError>,
        FK: FnMut(&CustomDbRow) -> Result<K, E>,
        FV: FnMut(&CustomDbRow) -> Result<V, E>,
    {
        super::query_to_map(self, text, key_mapper, value_mapper)
    }

    /// See [`crate::executor::query_to_map_with_params`].
    ///
    /// # Errors
    /// Binding errors, duplicate keys, driver errors, or mapper errors.
    fn query_to_map_with_params<I, PK, PV, K, V, E, FK, FV>(
        &mut self,
        text: &str,
        params: I,
        key_mapper: FK,
        value_mapper: FV,
    ) -> Result<HashMap<K, V>, E>
    where
        I: IntoIterator<Item = (PK, PV)>,
        PK: Into<String>,
        PV: Into<RowValues>,
        K: Eq + Hash + Debug,
        E: From<SqlExtError>,
        FK: FnMut(&CustomDbRow) -> Result<K, E>,
        FV: FnMut(&CustomDbRow) -> Result<V, E>,
    {
        super::query_to_map_with_params(self, text, params, key_mapper, value_mapper)
    }

    /// See [`crate::executor::query_result_set`].
    ///
    /// # Errors
    /// Parameter binding errors or the driver's error.
    fn query_result_set<I, K, V>(&mut self, text: &str, params: I) -> Result<ResultSet, SqlExtError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        super::query_result_set(self, text, params)
    }
}

impl<C: DbConnection + ?Sized> ConnectionExt for C {}
