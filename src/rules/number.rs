//! Numeric rules

use crate::value::as_number;
use serde_json::Value;

/// Passes when the value is a number (or numeric text) in `args[0]..=args[1]`.
///
/// # Example
///
/// ```rust
/// use rulebook::rules::between;
/// use serde_json::json;
///
/// let range = vec!["1".to_string(), "10".to_string()];
/// assert!(between(&json!(10), &range));
/// assert!(between(&json!("2.5"), &range));
/// assert!(!between(&json!(11), &range));
/// ```
pub fn between(value: &Value, args: &[String]) -> bool {
    let bound = |i: usize| args.get(i).and_then(|arg| arg.trim().parse::<f64>().ok());

    match (as_number(value), bound(0), bound(1)) {
        (Some(n), Some(lo), Some(hi)) => lo <= n && n <= hi,
        _ => false,
    }
}
