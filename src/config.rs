//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Per-validator settings.
///
/// Built with `with_*` methods or loaded from JSON. Missing keys take their
/// default values.
///
/// # Examples
///
/// ```
/// use rulebook::ValidatorConfig;
///
/// let config = ValidatorConfig::default()
///     .with_locale("fr")
///     .with_fast_exit(false);
/// assert_eq!(config.locale.as_deref(), Some("fr"));
///
/// let loaded = ValidatorConfig::from_json(r#"{ "fast_exit": false }"#).unwrap();
/// assert!(!loaded.fast_exit);
/// assert!(loaded.skip_empty_optional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Locale for messages. `None` follows the registry's active locale.
    pub locale: Option<String>,
    /// Stop at the first failing rule of a field.
    pub fast_exit: bool,
    /// Skip the rules of a field without `required` when its value is empty.
    pub skip_empty_optional: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            locale: None,
            fast_exit: true,
            skip_empty_optional: true,
        }
    }
}

impl ValidatorConfig {
    /// Pin the message locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set whether validation stops at the first failing rule.
    pub fn with_fast_exit(mut self, fast_exit: bool) -> Self {
        self.fast_exit = fast_exit;
        self
    }

    /// Set whether empty optional fields are skipped.
    pub fn with_skip_empty_optional(mut self, skip: bool) -> Self {
        self.skip_empty_optional = skip;
        self
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
