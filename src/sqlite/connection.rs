use crate::command::Command;
use crate::connection::{DbConnection, RowVisitor};
use crate::error::SqlExtError;

use super::query;

impl DbConnection for rusqlite::Connection {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        query::execute(self, command)
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        query::read_rows(self, command, visit)
    }
}

// Lets the helpers run inside a transaction the caller opened and will commit.
impl DbConnection for rusqlite::Transaction<'_> {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        query::execute(self, command)
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        query::read_rows(self, command, visit)
    }
}
