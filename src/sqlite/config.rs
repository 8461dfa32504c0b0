use std::time::Duration;

use serde::Deserialize;

use crate::error::SqlExtError;

/// Options for opening a `SQLite` connection.
///
/// The helpers never open connections themselves; this is a convenience for callers that
/// do not already manage one. Deserializable so it can sit in an application config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteOptions {
    pub db_path: String,
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
    #[serde(default)]
    pub wal: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: None,
            wal: false,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    /// Open a connection and apply the configured pragmas.
    ///
    /// # Errors
    /// Returns `SqlExtError::ConfigError` for an empty path, otherwise the driver's error.
    pub fn open(&self) -> Result<rusqlite::Connection, SqlExtError> {
        if self.db_path.is_empty() {
            return Err(SqlExtError::ConfigError("SQLite db_path is empty".into()));
        }

        let conn = rusqlite::Connection::open(&self.db_path)?;
        if let Some(ms) = self.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))?;
        }
        if self.wal {
            apply_wal_pragmas(&conn)?;
        }
        tracing::debug!(path = %self.db_path, wal = self.wal, "opened sqlite connection");
        Ok(conn)
    }
}

/// Apply WAL pragmas to an open connection.
///
/// # Errors
/// Returns `SqlExtError` if the PRAGMA statement cannot be executed.
pub fn apply_wal_pragmas(conn: &rusqlite::Connection) -> Result<(), SqlExtError> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    Ok(())
}
