//! Command text plus its bound, uniquely named parameters.

use crate::error::SqlExtError;
use crate::types::RowValues;

/// Sigil prepended to parameter names that arrive without one.
pub const PARAM_PREFIX: char = '@';

/// A name/value pair bound to a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: RowValues,
}

impl Parameter {
    /// Name without its leading sigil.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        strip_sigil(&self.name)
    }
}

/// One unit of work: command text and the parameters bound to it.
///
/// The text is a template and may still contain `{root}` tokens until an IN clause is
/// expanded into it. Parameter names are unique within a command.
#[derive(Debug, Clone, Default)]
pub struct Command {
    text: String,
    params: Vec<Parameter>,
}

impl Command {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Bound parameters, in bind order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Look up a bound parameter; the sigil is optional.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        let bare = strip_sigil(name);
        self.params.iter().find(|p| p.bare_name() == bare)
    }

    /// Bind `value` under `name`, prefixing `@` when the name carries no sigil.
    ///
    /// # Errors
    /// Returns `SqlExtError::ParameterError` if the name is empty or already bound.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<RowValues>,
    ) -> Result<&Parameter, SqlExtError> {
        let name = normalize_param_name(name.into())?;
        if self.parameter(&name).is_some() {
            return Err(SqlExtError::ParameterError(format!(
                "parameter {name} is already bound"
            )));
        }
        let idx = self.params.len();
        self.params.push(Parameter {
            name,
            value: value.into(),
        });
        Ok(&self.params[idx])
    }

    /// Bind every entry of a name/value mapping.
    ///
    /// # Errors
    /// Fails on the first entry [`Command::add_parameter`] rejects.
    pub fn add_parameters<I, K, V>(&mut self, params: I) -> Result<(), SqlExtError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        for (name, value) in params {
            self.add_parameter(name, value)?;
        }
        Ok(())
    }
}

fn normalize_param_name(name: String) -> Result<String, SqlExtError> {
    if strip_sigil(&name).is_empty() {
        return Err(SqlExtError::ParameterError(
            "parameter name must not be empty".into(),
        ));
    }
    if name.starts_with(['@', ':', '$']) {
        Ok(name)
    } else {
        Ok(format!("{PARAM_PREFIX}{name}"))
    }
}

fn strip_sigil(name: &str) -> &str {
    name.strip_prefix(['@', ':', '$']).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_without_sigil_get_at_prefix() {
        let mut cmd = Command::new("SELECT 1");
        assert_eq!(cmd.add_parameter("id", 1).unwrap().name, "@id");
        assert_eq!(cmd.add_parameter(":name", "x").unwrap().name, ":name");
        assert_eq!(cmd.parameter("@id").map(|p| &p.value), Some(&RowValues::Int(1)));
    }

    #[test]
    fn duplicate_names_are_rejected_regardless_of_sigil() {
        let mut cmd = Command::new("SELECT 1");
        cmd.add_parameter("@id", 1).unwrap();
        let err = cmd.add_parameter("id", 2).unwrap_err();
        assert!(matches!(err, SqlExtError::ParameterError(_)));
        assert_eq!(cmd.parameters().len(), 1);
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut cmd = Command::new("SELECT 1");
        assert!(cmd.add_parameter("@", 1).is_err());
        assert!(cmd.add_parameter("", 1).is_err());
    }
}
