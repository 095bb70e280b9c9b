use freesia::{Object, Value, parse_value, replace_values};

fn context(source: &str) -> Value {
    parse_value(source).expect("context parses")
}

#[test]
fn replaces_single_placeholder() {
    let context = context(r#"{ name: "X" }"#);
    assert_eq!(replace_values(&context, "Hi #{name}!"), "Hi X!");
}

#[test]
fn passes_plain_text_through() {
    let context = Value::object(Object::new());
    assert_eq!(
        replace_values(&context, "no placeholders here"),
        "no placeholders here"
    );
}

#[test]
fn preserves_lone_hash_sign() {
    let context = Value::object(Object::new());
    assert_eq!(replace_values(&context, "lone # sign"), "lone # sign");
}

#[test]
fn preserves_hash_before_non_brace() {
    let context = Value::object(Object::new());
    assert_eq!(replace_values(&context, "#a"), "#a");
}

#[test]
fn doubled_hash_keeps_first_and_opens_placeholder() {
    let context = context("{ a: 1 }");
    assert_eq!(replace_values(&context, "##{a}"), "#1");
}

#[test]
fn drops_unterminated_placeholder() {
    let context = Value::object(Object::new());
    assert_eq!(replace_values(&context, "#{unterminated"), "");
    assert_eq!(replace_values(&context, "text #{dangling"), "text ");
}

#[test]
fn drops_trailing_hash() {
    let context = Value::object(Object::new());
    assert_eq!(replace_values(&context, "price in #"), "price in ");
}

#[test]
fn absent_value_renders_as_empty_string() {
    let context = Value::object(Object::new());
    assert_eq!(replace_values(&context, "Hi #{missing}!"), "Hi !");
}

#[test]
fn replaces_multiple_placeholders() {
    let context = context(r#"{ a: "one", b: "two" }"#);
    assert_eq!(replace_values(&context, "#{a} and #{b}"), "one and two");
}

#[test]
fn resolves_through_parent_chain() {
    let context = context(
        r#"
        {
            item: {
                label: "wrench",
                parent: { owner: "workshop" },
            },
        }
        "#,
    );
    assert_eq!(
        replace_values(&context, "#{item.label} belongs to #{item.owner}"),
        "wrench belongs to workshop"
    );
}

#[test]
fn stringifies_non_string_values() {
    let context = context(r#"{ n: 3, ok: true, xs: [1, 2] }"#);
    assert_eq!(
        replace_values(&context, "#{n} #{ok} #{xs}"),
        "3 true [1, 2]"
    );
}

#[test]
fn closing_brace_outside_placeholder_is_literal() {
    let context = context("{ x: 1 }");
    assert_eq!(replace_values(&context, "a}b#{x}c"), "a}b1c");
}

#[test]
fn placeholder_at_text_boundaries() {
    let context = context(r#"{ x: "edge" }"#);
    assert_eq!(replace_values(&context, "#{x} middle #{x}"), "edge middle edge");
}
