use rusqlite::types::Value;

use crate::command::Command;
use crate::error::SqlExtError;
use crate::types::RowValues;

/// Convert a single `RowValues` to a rusqlite `Value`.
///
/// Booleans become 0/1, timestamps and JSON are stored as text.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Prepare `command` and bind each of its parameters by name.
///
/// `SQLite` understands `@name`, `:name` and `$name` natively, so names are bound as-is.
///
/// # Errors
/// Returns `SqlExtError::SqliteError` if preparing fails or a parameter name does not
/// appear in the statement (`InvalidParameterName`).
pub fn prepare_bound<'conn>(
    conn: &'conn rusqlite::Connection,
    command: &Command,
) -> Result<rusqlite::Statement<'conn>, SqlExtError> {
    let mut stmt = conn.prepare(command.text())?;
    for param in command.parameters() {
        let idx = stmt
            .parameter_index(&param.name)?
            .ok_or_else(|| rusqlite::Error::InvalidParameterName(param.name.clone()))?;
        stmt.raw_bind_parameter(idx, row_value_to_sqlite_value(&param.value))?;
    }
    Ok(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn converts_bools_and_timestamps() {
        assert_eq!(
            row_value_to_sqlite_value(&RowValues::Bool(true)),
            Value::Integer(1)
        );
        let dt = NaiveDate::from_ymd_opt(2023, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        assert_eq!(
            row_value_to_sqlite_value(&RowValues::Timestamp(dt)),
            Value::Text("2023-01-02 03:04:05".into())
        );
    }

    #[test]
    fn unknown_parameter_names_are_rejected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let mut cmd = Command::new("SELECT @a");
        cmd.add_parameter("b", 1).unwrap();
        let err = prepare_bound(&conn, &cmd).unwrap_err();
        assert!(matches!(
            err,
            SqlExtError::SqliteError(rusqlite::Error::InvalidParameterName(ref name)) if name == "@b"
        ));
    }
}
