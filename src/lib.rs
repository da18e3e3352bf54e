//! # Rulebook
//!
//! Custom validation rules with a shared registry.
//!
//! A rule is either a **function** of `(value, args)` returning a boolean (or a
//! richer [`Outcome`]), or an **object** built with [`ObjectRule`] that carries a
//! `validate` capability and an optional `get_message` generator. Rules are
//! registered by name with [`extend`] and attached to fields with
//! [`Validator::attach`].
//!
//! ## Quick Example
//!
//! ```rust
//! use rulebook::{FieldSpec, ObjectRule, Registry, Validator};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let registry = Arc::new(Registry::with_builtins());
//! let mut validator = Validator::with_registry(Arc::clone(&registry));
//!
//! validator
//!     .extend(
//!         "truthy",
//!         ObjectRule::new()
//!             .get_message(|field, _, _| format!("The {} value is not truthy.", field))
//!             .validate(|value: &Value, _: &[String]| rulebook::value::is_truthy(value)),
//!     )
//!     .unwrap();
//!
//! validator.attach(FieldSpec::new("agree", "truthy")).unwrap();
//!
//! let valid = validator.validate("agree", &json!(0)).await.unwrap();
//! assert!(!valid);
//! assert_eq!(
//!     validator.errors().first("agree"),
//!     Some("The agree value is not truthy.")
//! );
//! # });
//! ```
//!
//! Registration through [`extend`] (or [`Validator::extend`] on a validator
//! built with [`Validator::new`]) targets the process-wide registry returned by
//! [`registry::global`], so every validator sees the new rule.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod error_bag;
pub mod expression;
pub mod outcome;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod semigroup;
pub mod testing;
pub mod validation;
pub mod validator;
pub mod value;

// Re-exports
pub use config::ValidatorConfig;
pub use dictionary::{Dictionary, Locale, Message};
pub use error::RuleError;
pub use error_bag::{ErrorBag, FieldError};
pub use expression::RuleCall;
pub use outcome::Outcome;
pub use registry::{extend, localize, Registry};
pub use rule::{ObjectRule, Rule};
pub use semigroup::Semigroup;
pub use validation::Validation;
pub use validator::{FieldSpec, Validator, Verification};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ValidatorConfig;
    pub use crate::dictionary::{Locale, Message};
    pub use crate::error::RuleError;
    pub use crate::error_bag::{ErrorBag, FieldError};
    pub use crate::outcome::Outcome;
    pub use crate::registry::{extend, localize, Registry};
    pub use crate::rule::{ObjectRule, Rule};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::validator::{FieldSpec, Validator, Verification};
}
