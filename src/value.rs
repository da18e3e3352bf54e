//! Helpers for inspecting the values rules are run against.
//!
//! Values are untyped [`serde_json::Value`]s. The helpers here give them the
//! loose semantics form validation expects: truthiness, emptiness, and a text
//! view of scalars.

use serde_json::Value;
use std::borrow::Cow;

/// Whether a value counts as "true" in a boolean context.
///
/// `null`, `false`, zero and the empty string are falsy. Everything else,
/// including empty arrays and objects, is truthy.
///
/// # Examples
///
/// ```
/// use rulebook::value::is_truthy;
/// use serde_json::json;
///
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("")));
/// assert!(is_truthy(&json!("0")));
/// assert!(is_truthy(&json!([])));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether a value carries nothing worth validating.
///
/// `null`, blank strings and empty arrays are empty. `false` and `0` are not.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Text view of a scalar value.
///
/// Strings are borrowed, numbers and booleans are formatted. Arrays, objects
/// and `null` have no text form.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Numeric view of a value, accepting numbers and numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Apply `check` to every element of an array, or to the value itself.
///
/// Elements without a text form fail the check.
pub(crate) fn every_text<F>(value: &Value, check: F) -> bool
where
    F: Fn(&str) -> bool,
{
    match value {
        Value::Array(items) => items
            .iter()
            .all(|item| as_text(item).is_some_and(|text| check(&text))),
        other => as_text(other).is_some_and(|text| check(&text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_boolean_rules() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn emptiness_ignores_false_and_zero() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("   ")));
        assert!(is_empty(&json!([])));

        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!([null])));
    }

    #[test]
    fn text_view_of_scalars() {
        assert_eq!(as_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(as_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(as_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(as_text(&json!([1])), None);
        assert_eq!(as_text(&Value::Null), None);
    }

    #[test]
    fn numeric_view_parses_strings() {
        assert_eq!(as_number(&json!(3)), Some(3.0));
        assert_eq!(as_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!("inf")), None);
        assert_eq!(as_number(&json!(null)), None);
    }

    #[test]
    fn every_text_checks_each_element() {
        let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        assert!(every_text(&json!(["1", 2, "3"]), digits));
        assert!(!every_text(&json!(["1", "x"]), digits));
        assert!(!every_text(&json!([{}]), digits));
        assert!(every_text(&json!("123"), digits));
    }
}
