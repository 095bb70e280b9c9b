use freesia::{Diagnostic, DiagnosticKind, Expression, Value, parse_value};

fn path(text: &str) -> Expression {
    Expression::new(text.split('.').map(str::to_string).collect()).expect("valid path")
}

fn expect_err(source: &str, kind: DiagnosticKind) -> Diagnostic {
    let diag = parse_value(source).expect_err("parse should fail");
    assert_eq!(diag.kind, kind, "{diag}");
    diag
}

#[test]
fn parses_scalars() {
    assert_eq!(parse_value("42").expect("int"), Value::int(42));
    assert_eq!(parse_value("-7").expect("int"), Value::int(-7));
    assert_eq!(parse_value("1_000").expect("int"), Value::int(1000));
    assert_eq!(parse_value("2.5").expect("float"), Value::float(2.5));
    assert_eq!(parse_value("-2.5e2").expect("float"), Value::float(-250.0));
    assert_eq!(parse_value("true").expect("bool"), Value::bool(true));
    assert_eq!(parse_value("false").expect("bool"), Value::bool(false));
    assert_eq!(parse_value("none").expect("unit"), Value::unit());
}

#[test]
fn reports_value_type_names() {
    assert_eq!(parse_value("42").expect("int").type_name(), "Int");
    assert_eq!(parse_value("{}").expect("object").type_name(), "Object");
    assert_eq!(parse_value("[1]").expect("array").type_name(), "Array");
}

#[test]
fn parses_string_escapes() {
    assert_eq!(
        parse_value(r#""line\nbreak \"quoted\" \\ tab\t""#).expect("string"),
        Value::string("line\nbreak \"quoted\" \\ tab\t")
    );
}

#[test]
fn parses_arrays() {
    assert_eq!(
        parse_value(r#"[1, "two", [true]]"#).expect("array"),
        Value::array(vec![
            Value::int(1),
            Value::string("two"),
            Value::array(vec![Value::bool(true)]),
        ])
    );
}

#[test]
fn parses_objects_with_bare_and_quoted_keys() {
    let value = parse_value(r#"{ bare: 1, "quoted key": 2 }"#).expect("object");
    assert_eq!(path("bare").get_value(&value), Some(Value::int(1)));
    let object = value.as_object().expect("object");
    assert!(object.borrow().has_field("quoted key"));
}

#[test]
fn preserves_field_order_in_display() {
    let value = parse_value(r#"{ z: 1, a: 2, m: 3 }"#).expect("object");
    assert_eq!(value.to_string(), "{z: 1, a: 2, m: 3}");
}

#[test]
fn allows_trailing_commas_and_comments() {
    let value = parse_value(
        r#"
        // heading comment
        {
            first: 1, // trailing comment
            second: [2, 3,],
        }
        "#,
    )
    .expect("object");
    assert_eq!(path("first").get_value(&value), Some(Value::int(1)));
    assert_eq!(
        path("second").get_value(&value),
        Some(Value::array(vec![Value::int(2), Value::int(3)]))
    );
}

#[test]
fn parent_key_wires_the_scope_chain() {
    let value = parse_value(
        r#"
        {
            local: "here",
            parent: { inherited: "above" },
        }
        "#,
    )
    .expect("object");
    assert_eq!(path("local").get_value(&value), Some(Value::string("here")));
    assert_eq!(
        path("inherited").get_value(&value),
        Some(Value::string("above"))
    );
    // The parent link is a relation, not a data field.
    let object = value.as_object().expect("object");
    assert!(!object.borrow().has_field("parent"));
}

#[test]
fn rejects_non_object_parent_link() {
    expect_err(r#"{ parent: 3 }"#, DiagnosticKind::Parser);
}

#[test]
fn rejects_unterminated_string() {
    expect_err(r#"{ key: "open"#, DiagnosticKind::Lexer);
}

#[test]
fn rejects_missing_colon() {
    expect_err(r#"{ key "value" }"#, DiagnosticKind::Parser);
}

#[test]
fn rejects_trailing_input() {
    expect_err(r#"{ key: 1 } extra"#, DiagnosticKind::Parser);
}

#[test]
fn rejects_stray_token() {
    let diag = expect_err(":", DiagnosticKind::Parser);
    assert!(diag.message.contains("expected value"), "{}", diag.message);
}

#[test]
fn deep_equality_covers_parent_chains() {
    let source = r#"{ a: { parent: { b: 1 } } }"#;
    assert_eq!(
        parse_value(source).expect("object"),
        parse_value(source).expect("object")
    );
    assert_ne!(
        parse_value(source).expect("object"),
        parse_value(r#"{ a: { parent: { b: 2 } } }"#).expect("object")
    );
}
