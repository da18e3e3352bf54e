//! Membership rules

use crate::value::every_text;
use serde_json::Value;

/// Passes when the text equals one of the arguments.
///
/// Arrays pass when every element is allowed.
///
/// # Example
///
/// ```rust
/// use rulebook::rules::one_of;
/// use serde_json::json;
///
/// let sizes = vec!["s".to_string(), "m".to_string(), "l".to_string()];
/// assert!(one_of(&json!("m"), &sizes));
/// assert!(one_of(&json!(["s", "l"]), &sizes));
/// assert!(!one_of(&json!("xl"), &sizes));
/// ```
pub fn one_of(value: &Value, args: &[String]) -> bool {
    every_text(value, |text| args.iter().any(|arg| arg == text))
}

/// Passes when the text equals none of the arguments.
pub fn not_one_of(value: &Value, args: &[String]) -> bool {
    every_text(value, |text| args.iter().all(|arg| arg != text))
}

/// Passes when the text equals `args[0]`.
pub fn is(value: &Value, args: &[String]) -> bool {
    match args.first() {
        Some(expected) => every_text(value, |text| text == expected),
        None => false,
    }
}
