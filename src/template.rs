//! Single-pass template substitution: finds `#{...}` placeholders in arbitrary
//! text and splices in the values they resolve to.

use crate::{expression::parse, value::Value};

/// Replaces every `#{path.to.value}` placeholder in `template` with its value
/// resolved against `context`; all other text passes through unchanged.
///
/// A `#` not followed by `{` is literal text. Buffered text still pending when
/// the input ends (a dangling `#` or an unterminated placeholder) is dropped
/// from the output. Placeholders that resolve to no value contribute the empty
/// string.
pub fn replace_values(context: &Value, template: &str) -> String {
    let mut result = String::new();
    let mut expression = String::new();
    for ch in template.chars() {
        if expression.is_empty() {
            if ch == '#' {
                expression.push(ch);
            } else {
                result.push(ch);
            }
        } else if expression == "#" {
            if ch == '#' {
                result.push('#');
            } else if ch == '{' {
                expression.push(ch);
            } else {
                result.push('#');
                result.push(ch);
                expression.clear();
            }
        } else {
            expression.push(ch);
            if ch == '}' {
                if let Ok(parsed) = parse(&expression) {
                    if let Some(value) = parsed.get_value(context) {
                        result.push_str(&value.to_string());
                    }
                }
                expression.clear();
            }
        }
    }
    result
}
