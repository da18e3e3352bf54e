//! Text rules

use crate::value::{as_text, every_text};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("hardcoded email pattern is valid")
});

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        other => as_text(other).map(|text| text.chars().count()),
    }
}

fn length_arg(args: &[String]) -> Option<usize> {
    args.first().and_then(|arg| arg.parse().ok())
}

/// Passes when the text (or array) has at least `args[0]` characters (items).
///
/// # Example
///
/// ```rust
/// use rulebook::rules::min;
/// use serde_json::json;
///
/// let three = vec!["3".to_string()];
/// assert!(min(&json!("abc"), &three));
/// assert!(!min(&json!("ab"), &three));
/// ```
pub fn min(value: &Value, args: &[String]) -> bool {
    match (length(value), length_arg(args)) {
        (Some(len), Some(min)) => len >= min,
        _ => false,
    }
}

/// Passes when the text (or array) has at most `args[0]` characters (items).
pub fn max(value: &Value, args: &[String]) -> bool {
    match (length(value), length_arg(args)) {
        (Some(len), Some(max)) => len <= max,
        _ => false,
    }
}

/// Passes when the text is made of ASCII digits only.
pub fn numeric(value: &Value, _args: &[String]) -> bool {
    every_text(value, |text| {
        !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
    })
}

/// Passes when the text is made of letters only.
pub fn alpha(value: &Value, _args: &[String]) -> bool {
    every_text(value, |text| {
        !text.is_empty() && text.chars().all(char::is_alphabetic)
    })
}

/// Passes when the text is made of letters and digits only.
pub fn alpha_num(value: &Value, _args: &[String]) -> bool {
    every_text(value, |text| {
        !text.is_empty() && text.chars().all(char::is_alphanumeric)
    })
}

/// Passes when the text looks like an email address.
///
/// A local part, one `@`, and a domain of at least two dot-separated labels.
pub fn email(value: &Value, _args: &[String]) -> bool {
    every_text(value, |text| EMAIL_RE.is_match(text))
}
