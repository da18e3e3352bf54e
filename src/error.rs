//! Errors raised by rule registration and validation.
//!
//! Rule *failures* are not errors: a rule that rejects a value produces an
//! [`Outcome`](crate::Outcome) with `valid == false`, which the validator turns
//! into a [`FieldError`](crate::FieldError). `RuleError` covers misuse of the
//! registry and validator themselves.

use thiserror::Error;

/// Error returned by registry and validator operations.
///
/// # Examples
///
/// ```
/// use rulebook::{ObjectRule, Registry, RuleError};
///
/// let registry = Registry::new();
/// let err = registry.extend("broken", ObjectRule::new()).unwrap_err();
///
/// assert_eq!(err, RuleError::MalformedRule { name: "broken".to_string() });
/// assert_eq!(
///     err.to_string(),
///     "extension error: the rule 'broken' must be a function or have a 'validate' method"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule is neither a function nor an object exposing `validate`.
    #[error("extension error: the rule '{name}' must be a function or have a 'validate' method")]
    MalformedRule {
        /// Name the rule was registered under.
        name: String,
    },

    /// A rule with the same name is already registered.
    #[error("extension error: a rule named '{name}' is already registered")]
    DuplicateRule {
        /// The conflicting name.
        name: String,
    },

    /// The name cannot be used in a rule expression.
    #[error("extension error: '{name}' is not a valid rule name")]
    InvalidRuleName {
        /// The rejected name.
        name: String,
    },

    /// No rule is registered under this name.
    #[error("no rule named '{name}' exists")]
    UnknownRule {
        /// The missing rule name.
        name: String,
    },

    /// No field with this name is attached to the validator.
    #[error("no field named '{name}' is attached")]
    UnknownField {
        /// The missing field name.
        name: String,
    },

    /// A rule expression could not be parsed.
    #[error("invalid rule expression '{expression}': {reason}")]
    InvalidExpression {
        /// The expression as given.
        expression: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl RuleError {
    /// True for the errors raised while registering a rule.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            RuleError::MalformedRule { .. }
                | RuleError::DuplicateRule { .. }
                | RuleError::InvalidRuleName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_rule_message_names_the_rule() {
        let err = RuleError::DuplicateRule {
            name: "truthy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "extension error: a rule named 'truthy' is already registered"
        );
    }

    #[test]
    fn registration_errors_are_classified() {
        assert!(RuleError::MalformedRule { name: "a".into() }.is_registration_error());
        assert!(RuleError::DuplicateRule { name: "a".into() }.is_registration_error());
        assert!(RuleError::InvalidRuleName { name: "a|b".into() }.is_registration_error());
        assert!(!RuleError::UnknownRule { name: "a".into() }.is_registration_error());
        assert!(!RuleError::UnknownField { name: "a".into() }.is_registration_error());
    }

    #[test]
    fn invalid_expression_includes_reason() {
        let err = RuleError::InvalidExpression {
            expression: "a||b".to_string(),
            reason: "empty rule segment".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid rule expression 'a||b': empty rule segment"
        );
    }
}
