//! The seam between the helpers and a concrete database client.

use std::ops::ControlFlow;

use crate::command::Command;
use crate::error::SqlExtError;
use crate::results::CustomDbRow;

/// Callback invoked once per row; returning `Break` closes the cursor early.
pub type RowVisitor<'v> = dyn FnMut(&CustomDbRow) -> ControlFlow<()> + 'v;

/// A live, caller-owned database connection.
///
/// Opening, pooling and closing connections happens outside this crate. Implementors
/// create the driver-side statement and cursor inside each call and must release them
/// before returning, on success and on error alike.
pub trait DbConnection {
    /// Run a non-query command and report the affected-row count.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError>;

    /// Run a query and feed its rows, in cursor order, to `visit` until it returns
    /// `Break` or the cursor is exhausted.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError>;
}

impl<C: DbConnection + ?Sized> DbConnection for &mut C {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        (**self).execute_command(command)
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        (**self).read_rows(command, visit)
    }
}

impl<C: DbConnection + ?Sized> DbConnection for Box<C> {
    fn execute_command(&mut self, command: &Command) -> Result<usize, SqlExtError> {
        (**self).execute_command(command)
    }

    fn read_rows(
        &mut self,
        command: &Command,
        visit: &mut RowVisitor<'_>,
    ) -> Result<(), SqlExtError> {
        (**self).read_rows(command, visit)
    }
}
