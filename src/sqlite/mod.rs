// SQLite module - implements the helpers over a caller-owned rusqlite connection
//
// This module is split into several sub-modules for better organization:
// - config: Options for opening a connection
// - params: Conversion from `RowValues` to SQLite values and statement binding
// - query: Row extraction and cursor iteration
// - connection: `DbConnection` for `rusqlite::Connection` and `rusqlite::Transaction`

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

// Re-export the public API
pub use config::SqliteOptions;
pub use params::{prepare_bound, row_value_to_sqlite_value};
pub use query::sqlite_extract_value_sync;
