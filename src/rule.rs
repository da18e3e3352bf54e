//! Rule definitions: the function form and the object form.
//!
//! Both forms are normalised into a [`ValidateFn`] when registered. A
//! validate function always returns a boxed future, so synchronous and
//! asynchronous rules are run the same way.

use crate::error::RuleError;
use crate::outcome::Outcome;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Normalised validate capability of a rule.
pub type ValidateFn = Arc<dyn Fn(&Value, &[String]) -> BoxFuture<'static, Outcome> + Send + Sync>;

/// Message generator: `(field, args, data) -> message`.
pub type MessageFn = Arc<dyn Fn(&str, &[String], Option<&Value>) -> String + Send + Sync>;

/// A custom validation rule, ready to be registered.
///
/// # Examples
///
/// ```
/// use rulebook::{Outcome, Registry, Rule};
/// use serde_json::{json, Value};
///
/// let registry = Registry::new();
///
/// // Function form returning a bool
/// registry
///     .extend("even", Rule::from_fn(|value: &Value, _: &[String]| {
///         value.as_i64().is_some_and(|n| n % 2 == 0)
///     }))
///     .unwrap();
///
/// // Function form resolving asynchronously
/// registry
///     .extend("remote", Rule::from_async(|value: Value, _| async move {
///         Outcome::from(value != json!("taken"))
///     }))
///     .unwrap();
///
/// assert!(registry.contains("even"));
/// assert!(registry.contains("remote"));
/// ```
pub enum Rule {
    /// A bare callable.
    Function(ValidateFn),
    /// An object with `validate` and an optional `get_message`.
    Object(ObjectRule),
}

impl Rule {
    /// Build a function rule from a synchronous callable.
    ///
    /// The callable may return `bool` or [`Outcome`].
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &[String]) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        Rule::Function(sync_validate(f))
    }

    /// Build a function rule from a callable returning a future.
    ///
    /// The value and arguments are passed owned so the future can outlive the
    /// call, for example while waiting on a remote service.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Value, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Into<Outcome>,
    {
        Rule::Function(async_validate(f))
    }

    /// Split the rule into its validate capability and message generator.
    ///
    /// Fails with [`RuleError::MalformedRule`] when an object rule has no
    /// `validate`.
    pub(crate) fn into_parts(
        self,
        name: &str,
    ) -> Result<(ValidateFn, Option<MessageFn>), RuleError> {
        match self {
            Rule::Function(validate) => Ok((validate, None)),
            Rule::Object(ObjectRule {
                validate: Some(validate),
                get_message,
            }) => Ok((validate, get_message)),
            Rule::Object(ObjectRule { validate: None, .. }) => Err(RuleError::MalformedRule {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Function(_) => f.write_str("Rule::Function(..)"),
            Rule::Object(object) => f.debug_tuple("Rule::Object").field(object).finish(),
        }
    }
}

impl From<ObjectRule> for Rule {
    fn from(object: ObjectRule) -> Self {
        Rule::Object(object)
    }
}

/// Object form of a rule, assembled member by member.
///
/// Because members are optional, an `ObjectRule` can be built without a
/// `validate` capability. Registering such a rule fails with
/// [`RuleError::MalformedRule`].
///
/// # Examples
///
/// ```
/// use rulebook::{ObjectRule, Registry};
/// use serde_json::Value;
///
/// let registry = Registry::new();
/// let truthy = ObjectRule::new()
///     .get_message(|field, _, _| format!("The {} value is not truthy.", field))
///     .validate(|value: &Value, _: &[String]| rulebook::value::is_truthy(value));
///
/// registry.extend("truthy", truthy).unwrap();
/// assert_eq!(
///     registry.message("truthy", "agree", &[], None),
///     "The agree value is not truthy."
/// );
/// ```
#[derive(Clone, Default)]
pub struct ObjectRule {
    validate: Option<ValidateFn>,
    get_message: Option<MessageFn>,
}

impl ObjectRule {
    /// An object rule with no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a synchronous `validate` member.
    pub fn validate<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &[String]) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        self.validate = Some(sync_validate(f));
        self
    }

    /// Set an asynchronous `validate` member.
    pub fn validate_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Into<Outcome>,
    {
        self.validate = Some(async_validate(f));
        self
    }

    /// Set the `get_message` member.
    ///
    /// The generator receives the field's display name, the rule arguments and
    /// the `data` of the failing [`Outcome`].
    pub fn get_message<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &[String], Option<&Value>) -> String + Send + Sync + 'static,
    {
        self.get_message = Some(Arc::new(f));
        self
    }

    /// Whether the object exposes a `validate` member.
    pub fn has_validate(&self) -> bool {
        self.validate.is_some()
    }

    /// Whether the object exposes a `get_message` member.
    pub fn has_message(&self) -> bool {
        self.get_message.is_some()
    }
}

impl fmt::Debug for ObjectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRule")
            .field("validate", &self.has_validate())
            .field("get_message", &self.has_message())
            .finish()
    }
}

pub(crate) fn sync_validate<F, R>(f: F) -> ValidateFn
where
    F: Fn(&Value, &[String]) -> R + Send + Sync + 'static,
    R: Into<Outcome>,
{
    Arc::new(move |value: &Value, args: &[String]| {
        future::ready::<Outcome>(f(value, args).into()).boxed()
    })
}

fn async_validate<F, Fut>(f: F) -> ValidateFn
where
    F: Fn(Value, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Into<Outcome>,
{
    Arc::new(move |value: &Value, args: &[String]| {
        let pending = f(value.clone(), args.to_vec());
        async move {
            let outcome: Outcome = pending.await.into();
            outcome
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn function_rule_wraps_bool() {
        let rule = Rule::from_fn(|value: &Value, _: &[String]| value.is_string());
        let (validate, message) = rule.into_parts("is_string").unwrap();

        let no_args: &[String] = &[];
        assert!(message.is_none());
        assert_eq!(validate(&json!("a"), no_args).await, Outcome::pass());
        assert_eq!(validate(&json!(1), no_args).await, Outcome::fail());
    }

    #[tokio::test]
    async fn async_rule_receives_owned_arguments() {
        let rule = Rule::from_async(|value: Value, args: Vec<String>| async move {
            value.as_str() == args.first().map(String::as_str)
        });
        let (validate, _) = rule.into_parts("same").unwrap();

        let args = vec!["x".to_string()];
        assert!(validate(&json!("x"), args.as_slice()).await.valid);
        assert!(!validate(&json!("y"), args.as_slice()).await.valid);
    }

    #[test]
    fn object_without_validate_is_malformed() {
        let rule: Rule = ObjectRule::new()
            .get_message(|field, _, _| format!("{} is wrong", field))
            .into();

        let err = rule.into_parts("wrong").err().unwrap();
        assert_eq!(
            err,
            RuleError::MalformedRule {
                name: "wrong".to_string()
            }
        );
    }

    #[test]
    fn object_parts_keep_message() {
        let rule: Rule = ObjectRule::new()
            .validate(|_: &Value, _: &[String]| true)
            .get_message(|field, args, _| format!("{}:{}", field, args.join(",")))
            .into();

        let (_, message) = rule.into_parts("ok").unwrap();
        let message = message.unwrap();
        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(message("name", args.as_slice(), None), "name:a,b");
    }

    #[test]
    fn debug_reports_members() {
        let object = ObjectRule::new().validate(|_: &Value, _: &[String]| true);
        assert_eq!(
            format!("{:?}", object),
            "ObjectRule { validate: true, get_message: false }"
        );
    }
}
