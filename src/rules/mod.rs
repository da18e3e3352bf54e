//! Builtin rules
//!
//! These rules are preinstalled by [`Registry::with_builtins`] and in the
//! process-wide registry. Each one is a plain function of `(value, args)` and
//! can also be registered under another name with
//! [`Rule::from_fn`](crate::Rule::from_fn).
//!
//! | rule         | arguments | passes when                                   |
//! |--------------|-----------|-----------------------------------------------|
//! | `required`   |           | the value is not empty                        |
//! | `min`        | `n`       | the text is at least `n` characters long      |
//! | `max`        | `n`       | the text is at most `n` characters long       |
//! | `between`    | `lo,hi`   | the number lies in `lo..=hi`                  |
//! | `numeric`    |           | the text is made of ASCII digits              |
//! | `alpha`      |           | the text is made of letters                   |
//! | `alpha_num`  |           | the text is made of letters and digits        |
//! | `email`      |           | the text looks like an email address          |
//! | `one_of`     | `a,b,..`  | the text equals one of the arguments          |
//! | `not_one_of` | `a,b,..`  | the text equals none of the arguments         |
//! | `is`         | `x`       | the text equals `x`                           |
//!
//! Malformed arguments (`min:abc`) make the rule fail rather than error.
//!
//! [`Registry::with_builtins`]: crate::Registry::with_builtins

mod collection;
mod number;
mod string;

pub use collection::{is, not_one_of, one_of};
pub use number::between;
pub use string::{alpha, alpha_num, email, max, min, numeric};

use crate::rule::{sync_validate, ValidateFn};
use crate::value;
use serde_json::Value;

/// Name of the rule that marks a field as mandatory.
pub const REQUIRED: &str = "required";

/// Passes when the value is not empty.
///
/// `false` counts as empty here, so `required` can demand a ticked checkbox.
///
/// # Example
///
/// ```rust
/// use rulebook::rules::required;
/// use serde_json::json;
///
/// assert!(required(&json!("x"), &[]));
/// assert!(required(&json!(0), &[]));
/// assert!(!required(&json!("  "), &[]));
/// assert!(!required(&json!(false), &[]));
/// ```
pub fn required(value: &Value, _args: &[String]) -> bool {
    !value::is_empty(value) && *value != Value::Bool(false)
}

pub(crate) struct Builtin {
    pub(crate) name: &'static str,
    pub(crate) validate: ValidateFn,
    pub(crate) message: &'static str,
}

fn builtin(
    name: &'static str,
    check: fn(&Value, &[String]) -> bool,
    message: &'static str,
) -> Builtin {
    Builtin {
        name,
        validate: sync_validate(check),
        message,
    }
}

/// Builtin rules with their `en` messages.
pub(crate) fn builtins() -> Vec<Builtin> {
    vec![
        builtin(REQUIRED, required, "The {field} field is required."),
        builtin(
            "min",
            min,
            "The {field} field must be at least {0} characters.",
        ),
        builtin(
            "max",
            max,
            "The {field} field may not be greater than {0} characters.",
        ),
        builtin(
            "between",
            between,
            "The {field} field must be between {0} and {1}.",
        ),
        builtin(
            "numeric",
            numeric,
            "The {field} field may only contain numeric characters.",
        ),
        builtin(
            "alpha",
            alpha,
            "The {field} field may only contain alphabetic characters.",
        ),
        builtin(
            "alpha_num",
            alpha_num,
            "The {field} field may only contain alpha-numeric characters.",
        ),
        builtin("email", email, "The {field} field must be a valid email."),
        builtin("one_of", one_of, "The {field} field must be a valid value."),
        builtin(
            "not_one_of",
            not_one_of,
            "The {field} field must be a valid value.",
        ),
        builtin("is", is, "The {field} value is not valid."),
    ]
}
