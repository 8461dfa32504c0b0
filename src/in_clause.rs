//! Expansion of `{root}` placeholder tokens into one bound parameter per value.
//!
//! A list cannot be bound as a single parameter, so each value gets its own
//! `@root1, @root2, ...` parameter and the token in the command text is replaced by the
//! joined names:
//!
//! ```rust
//! use sql_conn_ext::prelude::*;
//!
//! let mut cmd = Command::new("SELECT name FROM users WHERE id IN ({id})");
//! let bound = expand_in_clause(&mut cmd, "id", [5, 7, 9])?;
//! assert_eq!(bound.len(), 3);
//! assert_eq!(cmd.text(), "SELECT name FROM users WHERE id IN (@id1, @id2, @id3)");
//! # Ok::<(), SqlExtError>(())
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::command::{Command, PARAM_PREFIX, Parameter};
use crate::error::SqlExtError;
use crate::types::RowValues;

pub const DEFAULT_START: usize = 1;
pub const DEFAULT_SEPARATOR: &str = ", ";

static ROOT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid root-name regex"));

/// A placeholder root and the values to expand into it.
#[derive(Debug, Clone, PartialEq)]
pub struct InClause {
    root: String,
    values: Vec<RowValues>,
    start: usize,
    separator: String,
}

impl InClause {
    pub fn new<I, V>(root: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RowValues>,
    {
        Self {
            root: root.into(),
            values: values.into_iter().map(Into::into).collect(),
            start: DEFAULT_START,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// First counter value used in generated names.
    #[must_use]
    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    /// The literal token this clause replaces, e.g. `{id}`.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{{{}}}", self.root)
    }

    /// Bind one parameter per value on `command` and substitute the token.
    ///
    /// Returns the bound parameters in value order. An empty value list binds nothing and
    /// replaces the token with an empty string, leaving e.g. `IN ()`; callers are expected
    /// to skip the query instead.
    ///
    /// # Errors
    /// Returns `SqlExtError::ParameterError` if the root is not an identifier, the counter
    /// overflows, or a generated name collides with a parameter already bound on the
    /// command. On error the command is left unchanged.
    pub fn apply(&self, command: &mut Command) -> Result<Vec<Parameter>, SqlExtError> {
        if !ROOT_NAME.is_match(&self.root) {
            return Err(SqlExtError::ParameterError(format!(
                "IN clause root {:?} is not a valid identifier",
                self.root
            )));
        }

        // Names are generated and checked up front so a failure leaves `command` untouched.
        let mut names = Vec::with_capacity(self.values.len());
        for offset in 0..self.values.len() {
            let counter = self.start.checked_add(offset).ok_or_else(|| {
                SqlExtError::ParameterError(format!(
                    "IN clause counter overflows starting at {}",
                    self.start
                ))
            })?;
            let name = format!("{PARAM_PREFIX}{}{counter}", self.root);
            if command.parameter(&name).is_some() {
                return Err(SqlExtError::ParameterError(format!(
                    "parameter {name} is already bound"
                )));
            }
            names.push(name);
        }

        let mut bound = Vec::with_capacity(names.len());
        for (name, value) in names.into_iter().zip(&self.values) {
            bound.push(command.add_parameter(name, value.clone())?.clone());
        }

        if bound.is_empty() {
            tracing::warn!(
                root = %self.root,
                "expanding IN clause with no values; command text will contain an empty list"
            );
        }

        let token = self.token();
        if command.text().contains(&token) {
            let joined = bound
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(&self.separator);
            let text = command.text().replace(&token, &joined);
            command.set_text(text);
        } else {
            tracing::debug!(token = %token, "IN clause token not present in command text");
        }

        Ok(bound)
    }
}

/// Expand `{root}` in `command` with the default start index and separator.
///
/// # Errors
/// See [`InClause::apply`].
pub fn expand_in_clause<I, V>(
    command: &mut Command,
    root: &str,
    values: I,
) -> Result<Vec<Parameter>, SqlExtError>
where
    I: IntoIterator<Item = V>,
    V: Into<RowValues>,
{
    InClause::new(root, values).apply(command)
}
