//! Testing utilities for code that registers and runs rules
//!
//! The assertion macros cover the two result shapes this crate produces:
//! [`Validation`](crate::Validation) values from
//! [`Validator::field_result`](crate::Validator::field_result), and the
//! [`ErrorBag`](crate::ErrorBag) of a [`Validator`](crate::Validator).
//! [`isolated_validator`] gives each test its own registry so rule names
//! cannot collide across tests running in parallel.
//!
//! # Examples
//!
//! ```rust
//! use rulebook::{assert_failure, assert_field_error, assert_success, FieldSpec, Validation};
//! use rulebook::testing::isolated_validator;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let success = Validation::<_, Vec<String>>::success(42);
//! assert_success!(success);
//!
//! let mut validator = isolated_validator();
//! validator.attach(FieldSpec::new("name", "required")).unwrap();
//! validator.validate("name", &json!(null)).await.unwrap();
//! assert_field_error!(validator.errors(), "name", "The name field is required.");
//! # });
//! ```

use crate::registry::Registry;
use crate::validator::Validator;
use std::sync::Arc;

/// A validator on a fresh registry with the builtin rules.
///
/// Rules registered through it stay out of the process-wide registry.
pub fn isolated_validator() -> Validator {
    Validator::with_registry(Arc::new(Registry::with_builtins()))
}

/// Assert that a validation succeeds.
///
/// This macro will panic if the validation is a `Failure`.
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// This macro will panic if the validation is a `Success`.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with specific errors.
///
/// # Example
///
/// ```rust
/// use rulebook::{Validation, assert_validation_errors};
///
/// let val = Validation::<i32, _>::failure(vec!["error1", "error2"]);
/// assert_validation_errors!(val, vec!["error1", "error2"]);
/// ```
#[macro_export]
macro_rules! assert_validation_errors {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

/// Assert that an error bag holds `message` as the first error of `field`.
#[macro_export]
macro_rules! assert_field_error {
    ($bag:expr, $field:expr, $message:expr) => {
        match $bag.first($field) {
            Some(actual) => assert_eq!(actual, $message),
            None => panic!(
                "Expected an error for field {:?}, got none (bag: {:?})",
                $field, $bag
            ),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error_bag::{ErrorBag, FieldError};
    use crate::rule::Rule;
    use crate::Validation;
    use serde_json::Value;

    #[test]
    fn assert_success_macro() {
        let val = Validation::<_, Vec<String>>::success(42);
        assert_success!(val);
    }

    #[test]
    fn assert_failure_macro() {
        let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
        assert_failure!(val);
    }

    #[test]
    #[should_panic(expected = "Expected Success, got Failure")]
    fn assert_success_panics_on_failure() {
        let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
        assert_success!(val);
    }

    #[test]
    #[should_panic(expected = "Expected Failure with errors")]
    fn assert_validation_errors_panics_on_success() {
        let val = Validation::<_, Vec<String>>::success(42);
        assert_validation_errors!(val, vec!["error".to_string()]);
    }

    #[test]
    fn assert_field_error_macro() {
        let mut bag = ErrorBag::new();
        bag.add(FieldError::new("a", "required", "a required"));
        assert_field_error!(bag, "a", "a required");
    }

    #[test]
    #[should_panic(expected = "Expected an error for field")]
    fn assert_field_error_panics_without_error() {
        let bag = ErrorBag::new();
        assert_field_error!(bag, "a", "a required");
    }

    #[test]
    fn isolated_validators_do_not_share_rules() {
        let first = super::isolated_validator();
        let second = super::isolated_validator();

        first
            .extend("only_here", Rule::from_fn(|_: &Value, _: &[String]| true))
            .unwrap();
        assert!(first.registry().contains("only_here"));
        assert!(!second.registry().contains("only_here"));
        assert!(!crate::registry::global().contains("only_here"));
    }
}
