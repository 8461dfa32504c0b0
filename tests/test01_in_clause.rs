use sql_conn_ext::prelude::*;

#[test]
fn expands_documented_example() {
    let mut cmd = Command::new("SELECT name FROM users WHERE id IN ({id})");
    let bound = expand_in_clause(&mut cmd, "id", [5, 7, 9]).unwrap();

    let pairs: Vec<(&str, &RowValues)> = bound.iter().map(|p| (p.name.as_str(), &p.value)).collect();
    assert_eq!(
        pairs,
        [
            ("@id1", &RowValues::Int(5)),
            ("@id2", &RowValues::Int(7)),
            ("@id3", &RowValues::Int(9)),
        ]
    );
    assert_eq!(
        cmd.text(),
        "SELECT name FROM users WHERE id IN (@id1, @id2, @id3)"
    );
}

#[test]
fn names_follow_start_offset_for_any_length() {
    for len in 1..=12usize {
        for start in [0usize, 1, 7] {
            let values: Vec<i64> = (0..len as i64).collect();
            let mut cmd = Command::new("x IN ({v}) AND y IN ({v})");
            let bound = InClause::new("v", values)
                .start(start)
                .apply(&mut cmd)
                .unwrap();

            assert_eq!(bound.len(), len);
            let expected: Vec<String> = (0..len).map(|i| format!("@v{}", start + i)).collect();
            let names: Vec<String> = bound.iter().map(|p| p.name.clone()).collect();
            assert_eq!(names, expected);

            let joined = expected.join(", ");
            assert_eq!(cmd.text(), format!("x IN ({joined}) AND y IN ({joined})"));
        }
    }
}

#[test]
fn mixed_value_kinds_keep_their_types() {
    let mut cmd = Command::new("IN ({k})");
    let bound = InClause::new(
        "k",
        [
            RowValues::from("a"),
            RowValues::from(2.5),
            RowValues::from(true),
            RowValues::Null,
        ],
    )
    .apply(&mut cmd)
    .unwrap();
    assert_eq!(bound[0].value, RowValues::Text("a".into()));
    assert_eq!(bound[1].value, RowValues::Float(2.5));
    assert_eq!(bound[2].value, RowValues::Bool(true));
    assert!(bound[3].value.is_null());
}

#[test]
fn existing_parameters_and_other_text_survive() {
    let mut cmd = Command::new("SELECT '{id}' AS raw, {other} FROM t WHERE a = @a AND id IN ({id})");
    cmd.add_parameter("a", 1).unwrap();
    expand_in_clause(&mut cmd, "id", ["x", "y"]).unwrap();

    // Substitution is textual, so a quoted token is replaced too.
    assert_eq!(
        cmd.text(),
        "SELECT '@id1, @id2' AS raw, {other} FROM t WHERE a = @a AND id IN (@id1, @id2)"
    );
    let names: Vec<&str> = cmd.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["@a", "@id1", "@id2"]);
}

#[test]
fn empty_list_produces_empty_parentheses() {
    let mut cmd = Command::new("DELETE FROM t WHERE id IN ({id})");
    let bound = InClause::new("id", Vec::<i64>::new()).apply(&mut cmd).unwrap();
    assert!(bound.is_empty());
    assert_eq!(cmd.text(), "DELETE FROM t WHERE id IN ()");
}
