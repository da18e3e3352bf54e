//! The result a rule produces for one value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of running a rule against a value.
///
/// A rule may answer with a plain `bool` (see the `From<bool>` impl) or with an
/// `Outcome` carrying extra `data`. The data is opaque to the registry and is
/// handed to the rule's message generator as its third argument, so a rule can
/// explain *why* a value was rejected.
///
/// # Examples
///
/// ```
/// use rulebook::Outcome;
/// use serde_json::json;
///
/// let plain: Outcome = false.into();
/// assert!(!plain.valid);
/// assert_eq!(plain.data, None);
///
/// let detailed = Outcome::fail().with_data(json!({ "message": "Not this value" }));
/// assert_eq!(
///     serde_json::to_value(&detailed).unwrap(),
///     json!({ "valid": false, "data": { "message": "Not this value" } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the value satisfied the rule.
    pub valid: bool,
    /// Payload forwarded to the message generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Outcome {
    /// A passing outcome without data.
    pub fn pass() -> Self {
        Outcome {
            valid: true,
            data: None,
        }
    }

    /// A failing outcome without data.
    pub fn fail() -> Self {
        Outcome {
            valid: false,
            data: None,
        }
    }

    /// Attach a data payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        Outcome { valid, data: None }
    }
}
