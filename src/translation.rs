use std::borrow::Cow;

/// Rewrite named `@name` references into positional `@P1..@Pn` placeholders.
///
/// `names` are the bound parameter names in bind order (with their `@`); a reference to
/// `names[i]` becomes `@P{i + 1}`. Matching is ASCII case-insensitive, as SQL Server
/// identifiers are under the default collation. References inside string literals,
/// quoted or bracketed identifiers, and comments are left alone, as are `@@` system
/// variables and `@variables` that are not bound.
///
/// Returns a borrowed `Cow` when nothing was rewritten.
#[must_use]
pub fn named_to_positional<'a>(sql: &'a str, names: &[&str]) -> Cow<'a, str> {
    if names.is_empty() {
        return Cow::Borrowed(sql);
    }

    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut state = State::Normal;
    let mut idx = 0;
    let bytes = sql.as_bytes();

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'[' => state = State::Bracketed,
                b'-' if bytes.get(idx + 1) == Some(&b'-') => {
                    state = State::LineComment;
                    idx += 1;
                }
                b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                b'@' if bytes.get(idx + 1) == Some(&b'@') => {
                    idx = scan_ident(bytes, idx + 2) - 1;
                }
                b'@' => {
                    let end = scan_ident(bytes, idx + 1);
                    let token = &sql[idx..end];
                    if let Some(pos) = names.iter().position(|n| n.eq_ignore_ascii_case(token)) {
                        let buf = out.get_or_insert_with(|| String::with_capacity(sql.len() + 8));
                        buf.push_str(&sql[copied..idx]);
                        buf.push_str("@P");
                        buf.push_str(&(pos + 1).to_string());
                        copied = end;
                    }
                    idx = end.max(idx + 1) - 1;
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    if bytes.get(idx + 1) == Some(&b']') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if b == b'/' && bytes.get(idx + 1) == Some(&b'*') {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    if depth == 1 {
                        state = State::Normal;
                    } else {
                        state = State::BlockComment(depth - 1);
                    }
                    idx += 1;
                }
            }
        }

        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

#[derive(Clone, Copy)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Bracketed,
    LineComment,
    BlockComment(u32),
}

/// End (exclusive) of the identifier starting at `start`.
fn scan_ident(bytes: &[u8], start: usize) -> usize {
    let mut idx = start;
    while idx < bytes.len()
        && (bytes[idx].is_ascii_alphanumeric() || matches!(bytes[idx], b'_' | b'$' | b'#'))
    {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_bound_names_in_bind_order() {
        let sql = "select * from t where a = @name and b in (@id1, @id2)";
        let res = named_to_positional(sql, &["@id1", "@id2", "@name"]);
        assert_eq!(res, "select * from t where a = @P3 and b in (@P1, @P2)");
    }

    #[test]
    fn repeated_references_share_a_position() {
        let res = named_to_positional("select @x, @X, @x", &["@x"]);
        assert_eq!(res, "select @P1, @P1, @P1");
    }

    #[test]
    fn prefix_names_do_not_match_longer_identifiers() {
        let res = named_to_positional("values (@id1, @id10)", &["@id1"]);
        assert_eq!(res, "values (@P1, @id10)");
    }

    #[test]
    fn skips_literals_identifiers_and_comments() {
        let sql = "select '@a', N'it''s @a', [@a], \"@a\", @a -- @a\n/* @a /* @a */ */ from t";
        let res = named_to_positional(sql, &["@a"]);
        assert_eq!(
            res,
            "select '@a', N'it''s @a', [@a], \"@a\", @P1 -- @a\n/* @a /* @a */ */ from t"
        );
    }

    #[test]
    fn leaves_system_and_unbound_variables() {
        let sql = "declare @local int = @a; select @@ROWCOUNT, @local";
        let res = named_to_positional(sql, &["@a"]);
        assert_eq!(res, "declare @local int = @P1; select @@ROWCOUNT, @local");
    }

    #[test]
    fn preserves_non_ascii_text() {
        let res = named_to_positional("select 'café', @a as ünï", &["@a"]);
        assert_eq!(res, "select 'café', @P1 as ünï");
    }

    #[test]
    fn borrows_when_nothing_changes() {
        let sql = "select 1";
        assert!(matches!(named_to_positional(sql, &["@a"]), Cow::Borrowed(_)));
        assert!(matches!(named_to_positional(sql, &[]), Cow::Borrowed(_)));
    }
}
