//! Blocking helpers over relational database clients.
//!
//! - [`in_clause`]: expand a `{root}` token into one bound `@rootN` parameter per value.
//! - [`executor`]: run non-query commands and map result rows into `Vec<T>`, `Option<T>`,
//!   or `HashMap<K, V>`, one command per call.
//! - [`connection::DbConnection`]: the seam backends implement. `rusqlite` connections
//!   (feature `sqlite`, on by default) and SQL Server through tiberius (feature `mssql`)
//!   are provided.
//!
//! ```rust
//! # #[cfg(feature = "sqlite")]
//! # fn main() -> Result<(), sql_conn_ext::SqlExtError> {
//! use sql_conn_ext::prelude::*;
//!
//! let mut conn = rusqlite::Connection::open_in_memory()?;
//! conn.execute_batch(
//!     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
//!      INSERT INTO users VALUES (5, 'ann'), (7, 'bo'), (8, 'cy'), (9, 'di');",
//! )?;
//!
//! let names = conn.query_with_in_clause(
//!     "SELECT name FROM users WHERE id IN ({id}) ORDER BY id",
//!     NO_PARAMS,
//!     &InClause::new("id", [5, 7, 9]),
//!     |row| -> Result<String, SqlExtError> { row.try_get("name") },
//! )?;
//! assert_eq!(names, ["ann", "bo", "di"]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```

pub mod command;
pub mod connection;
pub mod error;
pub mod executor;
pub mod in_clause;
pub mod prelude;
pub mod results;
pub mod translation;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mssql")]
pub mod mssql;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use command::{Command, Parameter};
pub use connection::DbConnection;
pub use error::SqlExtError;
pub use executor::ConnectionExt;
pub use in_clause::{InClause, expand_in_clause};
pub use results::{CustomDbRow, FromRowValue, ResultSet};
pub use types::RowValues;
