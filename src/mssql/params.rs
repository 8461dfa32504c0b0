use tiberius::Query;

use crate::command::{Command, PARAM_PREFIX};
use crate::translation::named_to_positional;
use crate::types::RowValues;

/// Build a tiberius query from `command`.
///
/// tiberius only binds positional `@P1..@Pn` parameters, so named references in the
/// text are rewritten to the position of the matching parameter before binding.
/// T-SQL only has `@` variables, so a parameter bound as `:id` or `$id` matches `@id`.
#[must_use]
pub fn bind_command(command: &Command) -> Query<'static> {
    let mut query = Query::new(positional_sql(command));
    for param in command.parameters() {
        bind_value(&mut query, &param.value);
    }
    query
}

pub(crate) fn positional_sql(command: &Command) -> String {
    let names: Vec<String> = command
        .parameters()
        .iter()
        .map(|p| format!("{PARAM_PREFIX}{}", p.bare_name()))
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    named_to_positional(command.text(), &names).into_owned()
}

fn bind_value(query: &mut Query<'static>, value: &RowValues) {
    match value {
        RowValues::Int(i) => query.bind(*i),
        RowValues::Float(f) => query.bind(*f),
        RowValues::Text(s) => query.bind(s.clone()),
        RowValues::Bool(b) => query.bind(*b),
        RowValues::Timestamp(dt) => query.bind(*dt),
        RowValues::Null => query.bind(Option::<String>::None),
        RowValues::JSON(jsval) => query.bind(jsval.to_string()),
        RowValues::Blob(bytes) => query.bind(bytes.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_sigil_binds_to_the_at_reference() {
        let mut cmd = Command::new("SELECT * FROM t WHERE a = @a AND b = @b AND c = @c");
        cmd.add_parameter(":b", 2).unwrap();
        cmd.add_parameter("$c", 3).unwrap();
        cmd.add_parameter("a", 1).unwrap();
        assert_eq!(
            positional_sql(&cmd),
            "SELECT * FROM t WHERE a = @P3 AND b = @P1 AND c = @P2"
        );
    }
}
