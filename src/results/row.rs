use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::SqlExtError;
use crate::types::RowValues;

/// Column metadata for one cursor, shared by every row it yields.
///
/// Backends build this once per cursor so the name lookup map is not rebuilt per row.
#[derive(Debug, Clone)]
pub struct Columns {
    names: Arc<Vec<String>>,
    index: Arc<HashMap<String, usize>>,
}

impl Columns {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect::<HashMap<_, _>>();
        Self {
            names: Arc::new(names),
            index: Arc::new(index),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &Arc<Vec<String>> {
        &self.names
    }

    /// Wrap one row of values in this column layout.
    #[must_use]
    pub fn row(&self, values: Vec<RowValues>) -> CustomDbRow {
        CustomDbRow {
            column_names: Arc::clone(&self.names),
            rows: values,
            column_index_cache: Arc::clone(&self.index),
        }
    }
}

/// A row from a database query result
///
/// This struct represents a single row from a database query result,
/// with access to both the column names and the values.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows of a cursor)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub rows: Vec<RowValues>,
    #[doc(hidden)]
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    /// Create a new database row
    ///
    /// # Arguments
    ///
    /// * `column_names` - The column names
    /// * `rows` - The values for this row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let cache = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );

        Self {
            column_names,
            rows,
            column_index_cache: cache,
        }
    }

    /// Get the index of a column by name
    ///
    /// Exact matches hit the cache; otherwise falls back to a case-insensitive scan, since
    /// SQL Server reports column names in whatever case the query used.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }

        self.column_names
            .iter()
            .position(|col| col.eq_ignore_ascii_case(column_name))
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Read a column as a concrete Rust type.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use sql_conn_ext::prelude::*;
    ///
    /// let row = CustomDbRow::new(
    ///     Arc::new(vec!["id".into(), "name".into()]),
    ///     vec![RowValues::Int(7), RowValues::Text("alice".into())],
    /// );
    /// let id: i64 = row.try_get("id")?;
    /// let name: String = row.try_get("name")?;
    /// assert_eq!((id, name.as_str()), (7, "alice"));
    /// # Ok::<(), SqlExtError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `SqlExtError::ColumnNotFound` if no column has that name, or
    /// `SqlExtError::ConversionError` if the stored value has an incompatible type.
    pub fn try_get<T: FromRowValue>(&self, column_name: &str) -> Result<T, SqlExtError> {
        let value = self
            .get(column_name)
            .ok_or_else(|| SqlExtError::ColumnNotFound(column_name.to_string()))?;
        T::from_row_value(value).ok_or_else(|| SqlExtError::ConversionError {
            column: column_name.to_string(),
            expected: T::EXPECTED,
            found: value.kind().to_string(),
        })
    }

    /// Positional variant of [`CustomDbRow::try_get`].
    ///
    /// # Errors
    /// Same as [`CustomDbRow::try_get`], keyed by index.
    pub fn try_get_by_index<T: FromRowValue>(&self, index: usize) -> Result<T, SqlExtError> {
        let value = self
            .get_by_index(index)
            .ok_or_else(|| SqlExtError::ColumnNotFound(format!("#{index}")))?;
        T::from_row_value(value).ok_or_else(|| SqlExtError::ConversionError {
            column: format!("#{index}"),
            expected: T::EXPECTED,
            found: value.kind().to_string(),
        })
    }
}

/// Conversion from a borrowed [`RowValues`] into an owned Rust value.
///
/// `None` means the value has the wrong shape; NULL only converts into `Option<T>`.
pub trait FromRowValue: Sized {
    const EXPECTED: &'static str;

    fn from_row_value(value: &RowValues) -> Option<Self>;
}

impl FromRowValue for i64 {
    const EXPECTED: &'static str = "Int";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_int().copied()
    }
}

impl FromRowValue for i32 {
    const EXPECTED: &'static str = "Int (32-bit)";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_int().and_then(|v| i32::try_from(*v).ok())
    }
}

impl FromRowValue for f64 {
    const EXPECTED: &'static str = "Float";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_float()
    }
}

impl FromRowValue for bool {
    const EXPECTED: &'static str = "Bool";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_bool().copied()
    }
}

impl FromRowValue for String {
    const EXPECTED: &'static str = "Text";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl FromRowValue for NaiveDateTime {
    const EXPECTED: &'static str = "Timestamp";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_timestamp()
    }
}

impl FromRowValue for Vec<u8> {
    const EXPECTED: &'static str = "Blob";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_blob().map(<[u8]>::to_vec)
    }
}

impl FromRowValue for JsonValue {
    const EXPECTED: &'static str = "JSON";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        value.as_json()
    }
}

impl FromRowValue for RowValues {
    const EXPECTED: &'static str = "any";

    fn from_row_value(value: &RowValues) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromRowValue> FromRowValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_row_value(value: &RowValues) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_row_value(value).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CustomDbRow {
        Columns::new(vec!["Id".into(), "label".into(), "note".into()]).row(vec![
            RowValues::Int(3),
            RowValues::Text("three".into()),
            RowValues::Null,
        ])
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let row = sample();
        assert_eq!(row.get_column_index("Id"), Some(0));
        assert_eq!(row.get_column_index("ID"), Some(0));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn try_get_reports_missing_and_mismatched_columns() {
        let row = sample();
        assert_eq!(row.try_get::<i64>("id").unwrap(), 3);
        assert!(matches!(
            row.try_get::<i64>("nope"),
            Err(SqlExtError::ColumnNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            row.try_get::<i64>("label"),
            Err(SqlExtError::ConversionError { expected: "Int", .. })
        ));
    }

    #[test]
    fn nulls_only_convert_into_options() {
        let row = sample();
        assert_eq!(row.try_get::<Option<String>>("note").unwrap(), None);
        assert!(row.try_get::<String>("note").is_err());
        assert_eq!(
            row.try_get::<Option<String>>("label").unwrap().as_deref(),
            Some("three")
        );
    }

    #[test]
    fn date_like_text_reads_as_string_or_timestamp() {
        let row = Columns::new(vec!["note".into()])
            .row(vec![RowValues::Text("2024-01-01 10:00:00".into())]);
        assert_eq!(row.try_get::<String>("note").unwrap(), "2024-01-01 10:00:00");
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        assert_eq!(row.try_get::<NaiveDateTime>("note").unwrap(), expected);
    }

    #[test]
    fn rows_from_one_layout_share_metadata() {
        let columns = Columns::new(vec!["a".into()]);
        let first = columns.row(vec![RowValues::Int(1)]);
        let second = columns.row(vec![RowValues::Int(2)]);
        assert!(Arc::ptr_eq(&first.column_names, &second.column_names));
        assert_eq!(second.try_get_by_index::<i64>(0).unwrap(), 2);
    }
}
