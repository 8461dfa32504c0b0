use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "mssql")]
use tiberius;

/// Errors surfaced by the helpers in this crate.
///
/// Driver failures are wrapped transparently so the original client error (and its
/// `Display`) reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum SqlExtError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mssql")]
    #[error(transparent)]
    MssqlError(#[from] tiberius::error::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Cannot read column {column} as {expected}: found {found}")]
    ConversionError {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A key mapper produced the same key for two rows.
    #[error("An item with the same key has already been added: {0}")]
    DuplicateKey(String),
}
