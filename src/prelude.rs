//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::command::{Command, Parameter};
pub use crate::connection::DbConnection;
pub use crate::error::SqlExtError;
pub use crate::executor::{ConnectionExt, NO_PARAMS};
pub use crate::in_clause::{InClause, expand_in_clause};
pub use crate::results::{CustomDbRow, FromRowValue, ResultSet};
pub use crate::types::RowValues;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteOptions;

#[cfg(feature = "mssql")]
pub use crate::mssql::{MssqlConnection, MssqlOptions};
