//! Helper utilities for testing code built on the helpers.
//!
//! [`MockConnection`] replays scripted responses and counts every command and cursor it
//! opens and releases, so tests can assert that nothing leaks on any exit path.

use std::cell::Cell;
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::command::Command;
use crate::connection::{DbConnection, RowVisitor};
use crate::error::SqlExtError;
use crate::results::Columns;
use crate::types::RowValues;

/// One scripted reply, consumed by the next call on the connection.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Rows for a query; if `fail_after` is set the cursor errors after yielding that many.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<RowValues>>,
        fail_after: Option<(usize, String)>,
    },
    /// Affected-row count for a non-query command.
    Affected(usize),
    /// The driver rejects the command outright.
    Fail(String),
}

/// Snapshot of resource accounting on a [`MockConnection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    pub commands_opened: usize,
    pub commands_closed: usize,
    pub cursors_opened: usize,
    pub cursors_closed: usize,
    pub rows_yielded: usize,
}

impl ResourceStats {
    /// Every opened command and cursor has been closed again.
    #[must_use]
    pub fn all_released(&self) -> bool {
        self.commands_opened == self.commands_closed && self.cursors_opened == self.cursors_closed
    }
}

#[derive(Debug, Default)]
struct Counters {
    commands_opened: Cell<usize>,
    commands_closed: Cell<usize>,
    cursors_opened: Cell<usize>,
    cursors_closed: Cell<usize>,
    rows_yielded: Cell<usize>,
}

enum Handle {
    Command,
    Cursor,
}

/// Counts a release when dropped, however the call unwinds.
struct Tracked {
    counters: Rc<Counters>,
    handle: Handle,
}

impl Tracked {
    fn open(counters: &Rc<Counters>, handle: Handle) -> Self {
        let cell = match handle {
            Handle::Command => &counters.commands_opened,
            Handle::Cursor => &counters.cursors_opened,
        };
        cell.set(cell.get() + 1);
        Self {
            counters: Rc::clone(counters),
            handle,
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let cell = match self.handle {
            Handle::Command => &self.counters.commands_closed,
            Handle::Cursor => &self.counters.cursors_closed,
        };
        cell.set(cell.get() + 1);
    }
}

/// An in-memory [`DbConnection`] driven by a queue of [`MockResponse`]s.
#[derive(Debug, Default)]
pub struct MockConnection {
    script: VecDeque<MockResponse>,
    received: Vec<Command>,
    counters: Rc<Counters>,
}

impl MockConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result set.
    #[must_use]
    pub fn with_rows(mut self, columns: &[&str], rows: Vec<Vec<RowValues>>) -> Self {
        self.script.push_back(MockResponse::Rows {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
            fail_after: None,
        });
        self
    }

    /// Queue a result set whose cursor fails after `yielded` rows.
    #[must_use]
    pub fn with_rows_then_failure(
        mut self,
        columns: &[&str],
        rows: Vec<Vec<RowValues>>,
        yielded: usize,
        message: &str,
    ) -> Self {
        self.script.push_back(MockResponse::Rows {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
            fail_after: Some((yielded, message.to_string())),
        });
        self
    }

    #[must_use]
    pub fn with_affected(mut self, count: usize) -> Self {
        self.script.push_back(MockResponse::Affected(count));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, message: &str) -> Self {
        self.script.push_back(MockResponse::Fail(message.to_string()));
        self
    }

    /// Commands received so far, as the executor built them.
    #[must_use]
    pub fn received(&self) -> &[Command] {
        &self.received
    }

    #[must_use]
    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            commands_opened: self.counters.commands_opened.get(),
            commands_closed: self.counters.commands_closed.get(),
            cursors_opened: self.counters.cursors_opened.get(),
            cursors_closed: self.counters.cursors_closed.get(),
            rows_yielded: self.counters.rows_yielded.get(),
        }
    }

    fn next_response(&mut self, command: &Command) -> Result<MockResponse, SqlExtError> {
        self.received.push(command.clone());
        match self.script.pop_front() {
            Some(MockResponse::Fail(message)) => Err(SqlExtError::ExecutionError(message)),
            Some(response) => Ok(response),
            None => Err(SqlExtError::ExecutionError(
                "mock connection has no scripted response left".into(),
            )),
        }
    }
}

impl DbConnection for MockConnection {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        let _command = Tracked::open(&self.counters, Handle::Command);
        match self.next_response(command)? {
            MockResponse::Affected(count) => Ok(count),
            other => Err(SqlExtError::ExecutionError(format!(
                "expected an affected-row count, script has {other:?}"
            ))),
        }
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        let _command = Tracked::open(&self.counters, Handle::Command);
        let MockResponse::Rows {
            columns,
            rows,
            fail_after,
        } = self.next_response(command)?
        else {
            return Err(SqlExtError::ExecutionError(
                "expected a result set in the script".into(),
            ));
        };

        let _cursor = Tracked::open(&self.counters, Handle::Cursor);
        let layout = Columns::new(columns);
        for (i, values) in rows.into_iter().enumerate() {
            if let Some((limit, message)) = &fail_after {
                if i == *limit {
                    return Err(SqlExtError::ExecutionError(message.clone()));
                }
            }
            let yielded = &self.counters.rows_yielded;
            yielded.set(yielded.get() + 1);
            if let ControlFlow::Break(()) = visit(&layout.row(values)) {
                return Ok(());
            }
        }
        // A failure point past the last row fires once the rows run out.
        if let Some((_, message)) = fail_after {
            return Err(SqlExtError::ExecutionError(message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CustomDbRow;

    #[test]
    fn guards_balance_on_error() {
        let mut conn = MockConnection::new().with_failure("boom");
        let cmd = Command::new("SELECT 1");
        assert!(conn.read_rows(&cmd, &mut |_: &CustomDbRow| ControlFlow::Continue(())).is_err());
        let stats = conn.stats();
        assert_eq!(stats.commands_opened, 1);
        assert_eq!(stats.cursors_opened, 0);
        assert!(stats.all_released());
    }
}
