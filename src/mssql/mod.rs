// MSSQL module - implements the helpers over a tiberius client
//
// tiberius is async; `MssqlConnection` owns a current-thread runtime and blocks on each
// round trip so the connection fits the synchronous `DbConnection` seam.
//
// - config: Connection options
// - client: Client creation and the blocking `MssqlConnection` wrapper
// - params: Binding `RowValues` onto a tiberius query
// - query: Value extraction and row streaming

pub mod client;
pub mod config;
pub mod params;
pub mod query;

// Re-export the public API
pub use client::{MssqlConnection, create_mssql_client};
pub use config::{MssqlClient, MssqlOptions};
pub use params::bind_command;
