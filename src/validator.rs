//! Validator instances: fields, attached rules, collected errors.
//!
//! A [`Validator`] associates field names with rule expressions and runs them.
//! Rules are looked up by name in the validator's [`Registry`] at validation
//! time, so rules may be registered after a field is attached.
//!
//! # Examples
//!
//! ```
//! use rulebook::{FieldSpec, Registry, Validator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let mut validator = Validator::with_registry(Arc::new(Registry::with_builtins()));
//! validator.attach(FieldSpec::new("name", "required|alpha")).unwrap();
//! validator.attach(FieldSpec::new("age", "required|between:18,99")).unwrap();
//!
//! let values = json!({ "name": "Ada", "age": 12 });
//! let valid = validator.validate_all(values.as_object().unwrap()).await.unwrap();
//!
//! assert!(!valid);
//! assert!(!validator.errors().has("name"));
//! assert_eq!(
//!     validator.errors().first("age"),
//!     Some("The age field must be between 18 and 99.")
//! );
//! # });
//! ```

use crate::config::ValidatorConfig;
use crate::dictionary::Locale;
use crate::error::RuleError;
use crate::error_bag::{ErrorBag, FieldError};
use crate::expression::{self, RuleCall};
use crate::registry::{self, Registry};
use crate::rule::Rule;
use crate::rules::REQUIRED;
use crate::validation::Validation;
use crate::value;
use futures::future;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Instrument;

/// Field name used by [`Validator::verify`].
pub const VERIFY_FIELD: &str = "{field}";

static NULL: Value = Value::Null;

/// A field name and its rule expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Rule expression, e.g. `"required|min:3"`.
    pub rules: String,
}

impl FieldSpec {
    /// Create a field spec.
    pub fn new(name: impl Into<String>, rules: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            rules: rules.into(),
        }
    }
}

/// Result of [`Validator::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Whether every rule passed.
    pub valid: bool,
    /// Messages of the failing rules.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
struct AttachedField {
    name: String,
    rules: Vec<RuleCall>,
}

/// Runs attached rules against field values and collects the failures.
#[derive(Debug)]
pub struct Validator {
    registry: Arc<Registry>,
    config: ValidatorConfig,
    fields: Vec<AttachedField>,
    errors: ErrorBag,
}

impl Validator {
    /// A validator on the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(registry::global())
    }

    /// A validator on an explicit registry.
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Validator {
            registry,
            config: ValidatorConfig::default(),
            fields: Vec::new(),
            errors: ErrorBag::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The registry rules are looked up in.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Register a rule.
    ///
    /// Same semantics as [`Registry::extend`]. The rule lands in this
    /// validator's registry, which for `Validator::new` is the process-wide
    /// one, so every other validator sees it too.
    pub fn extend(&self, name: &str, rule: impl Into<Rule>) -> Result<(), RuleError> {
        self.registry.extend(name, rule)
    }

    /// Merge messages into a locale of the registry.
    pub fn localize(&self, code: &str, locale: Locale) {
        self.registry.localize(code, locale)
    }

    /// Pin the message locale of this validator.
    pub fn set_locale(&mut self, code: impl Into<String>) {
        self.config.locale = Some(code.into());
    }

    /// Attach rules to a field, replacing any rules it already had.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidExpression`] when the rule expression is malformed.
    pub fn attach(&mut self, spec: FieldSpec) -> Result<(), RuleError> {
        let rules = expression::parse(&spec.rules)?;
        tracing::debug!(field = %spec.name, rules = %spec.rules, "attached field");

        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(field) => field.rules = rules,
            None => self.fields.push(AttachedField {
                name: spec.name,
                rules,
            }),
        }
        Ok(())
    }

    /// Detach a field and drop its errors. Returns whether it was attached.
    pub fn detach(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.name != name);
        self.errors.remove(name);
        self.fields.len() != before
    }

    /// Names of the attached fields, in attachment order.
    pub fn fields(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Errors from the latest validations.
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    /// Drop every collected error.
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    /// Validate one field, replacing its previous errors.
    ///
    /// Returns whether the value passed every rule. The field's previous
    /// errors are dropped before its rules run, so they are gone even when a
    /// rule cannot run.
    ///
    /// # Errors
    ///
    /// [`RuleError::UnknownField`] when the field is not attached,
    /// [`RuleError::UnknownRule`] when one of its rules is not registered.
    pub async fn validate(&mut self, field: &str, value: &Value) -> Result<bool, RuleError> {
        self.field(field)?;
        self.errors.remove(field);

        let errors = {
            let attached = self.field(field)?;
            self.check(&attached.name, &attached.rules, value).await?
        };

        let valid = errors.is_empty();
        self.errors.extend(errors);
        Ok(valid)
    }

    /// Validate every attached field concurrently.
    ///
    /// Fields missing from `values` are validated as `null`. The error bag is
    /// replaced as a whole. If any field fails with a [`RuleError`] the bag is
    /// left untouched and the first such error is returned.
    pub async fn validate_all(&mut self, values: &Map<String, Value>) -> Result<bool, RuleError> {
        let results = {
            let checks = self.fields.iter().map(|attached| {
                let value = values.get(&attached.name).unwrap_or(&NULL);
                self.check(&attached.name, &attached.rules, value)
            });
            future::join_all(checks).await
        };

        let mut bag = ErrorBag::new();
        for result in results {
            bag.extend(result?);
        }

        self.errors = bag;
        Ok(self.errors.is_empty())
    }

    /// Validate one field without touching the error bag.
    ///
    /// Returns the value on success and the field's errors on failure, ready
    /// to be combined with other results through [`Validation::and`] or
    /// [`Validation::all_vec`].
    pub async fn field_result(
        &self,
        field: &str,
        value: Value,
    ) -> Result<Validation<Value, Vec<FieldError>>, RuleError> {
        let attached = self.field(field)?;
        let errors = self.check(&attached.name, &attached.rules, &value).await?;

        Ok(if errors.is_empty() {
            Validation::success(value)
        } else {
            Validation::failure(errors)
        })
    }

    /// Run a rule expression against a value without attaching a field.
    ///
    /// Messages are rendered with the field name [`VERIFY_FIELD`] so callers
    /// can substitute their own label.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidExpression`] or [`RuleError::UnknownRule`].
    pub async fn verify(&self, value: &Value, rules: &str) -> Result<Verification, RuleError> {
        let calls = expression::parse(rules)?;
        let errors = self.check(VERIFY_FIELD, &calls, value).await?;

        Ok(Verification {
            valid: errors.is_empty(),
            errors: errors.into_iter().map(|e| e.message).collect(),
        })
    }

    fn field(&self, name: &str) -> Result<&AttachedField, RuleError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| RuleError::UnknownField {
                name: name.to_string(),
            })
    }

    async fn check(
        &self,
        field: &str,
        rules: &[RuleCall],
        value: &Value,
    ) -> Result<Vec<FieldError>, RuleError> {
        let span = tracing::debug_span!("validate_field", field = %field);
        check_field(&self.registry, &self.config, field, rules, value)
            .instrument(span)
            .await
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

async fn check_field(
    registry: &Registry,
    config: &ValidatorConfig,
    field: &str,
    rules: &[RuleCall],
    value: &Value,
) -> Result<Vec<FieldError>, RuleError> {
    let required = rules.iter().any(|call| call.name == REQUIRED);
    if config.skip_empty_optional && !required && value::is_empty(value) {
        tracing::trace!("skipped empty optional field");
        return Ok(Vec::new());
    }

    let locale = match &config.locale {
        Some(locale) => locale.clone(),
        None => registry.locale(),
    };

    let mut errors = Vec::new();
    for call in rules {
        let outcome = registry.validate_rule(&call.name, value, &call.args).await?;
        if outcome.valid {
            continue;
        }

        tracing::debug!(rule = %call.name, "rule failed");
        let message = registry.message_in(
            &locale,
            &call.name,
            field,
            &call.args,
            outcome.data.as_ref(),
        );
        errors.push(FieldError::new(field, call.name.as_str(), message));

        if config.fast_exit {
            break;
        }
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use crate::rule::ObjectRule;
    use serde_json::json;

    fn validator() -> Validator {
        Validator::with_registry(Arc::new(Registry::with_builtins()))
    }

    #[test]
    fn attach_replaces_rules() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required")).unwrap();
        v.attach(FieldSpec::new("name", "alpha")).unwrap();
        assert_eq!(v.fields(), vec!["name"]);
    }

    #[test]
    fn attach_rejects_bad_expression() {
        let mut v = validator();
        let err = v.attach(FieldSpec::new("name", "required||alpha")).unwrap_err();
        assert!(matches!(err, RuleError::InvalidExpression { .. }));
        assert!(v.fields().is_empty());
    }

    #[tokio::test]
    async fn unknown_field_is_an_error() {
        let mut v = validator();
        let err = v.validate("ghost", &json!(1)).await.unwrap_err();
        assert_eq!(
            err,
            RuleError::UnknownField {
                name: "ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unknown_rule_surfaces_at_validation_time() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required|later")).unwrap();

        let err = v.validate("name", &json!("x")).await.unwrap_err();
        assert_eq!(
            err,
            RuleError::UnknownRule {
                name: "later".to_string()
            }
        );

        v.extend("later", Rule::from_fn(|_: &Value, _: &[String]| true))
            .unwrap();
        assert!(v.validate("name", &json!("x")).await.unwrap());
    }

    #[tokio::test]
    async fn fast_exit_stops_at_first_failure() {
        let mut v = validator();
        v.attach(FieldSpec::new("code", "numeric|min:4")).unwrap();

        assert!(!v.validate("code", &json!("ab")).await.unwrap());
        assert_eq!(v.errors().count(), 1);
        assert_eq!(v.errors().iter().next().map(|e| e.rule.as_str()), Some("numeric"));
    }

    #[tokio::test]
    async fn collect_all_runs_every_rule() {
        let mut v = validator().with_config(ValidatorConfig::default().with_fast_exit(false));
        v.attach(FieldSpec::new("code", "numeric|min:4")).unwrap();

        assert!(!v.validate("code", &json!("ab")).await.unwrap());
        assert_eq!(
            v.errors().collect("code"),
            vec![
                "The code field may only contain numeric characters.",
                "The code field must be at least 4 characters.",
            ]
        );
    }

    #[tokio::test]
    async fn revalidation_replaces_field_errors() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required")).unwrap();

        assert!(!v.validate("name", &json!("")).await.unwrap());
        assert!(v.errors().has("name"));

        assert!(v.validate("name", &json!("Ada")).await.unwrap());
        assert!(!v.errors().has("name"));
    }

    #[tokio::test]
    async fn rule_error_still_clears_field_errors() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required|later")).unwrap();
        v.attach(FieldSpec::new("other", "required")).unwrap();

        assert!(!v.validate("name", &json!(null)).await.unwrap());
        assert!(!v.validate("other", &json!(null)).await.unwrap());
        assert_eq!(v.errors().count(), 2);

        v.attach(FieldSpec::new("name", "later")).unwrap();
        let err = v.validate("name", &json!("x")).await.unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule { .. }));
        assert_eq!(v.errors().first("name"), None);
        assert!(v.errors().has("other"));
    }

    #[tokio::test]
    async fn empty_optional_fields_are_skipped() {
        let mut v = validator();
        v.attach(FieldSpec::new("nickname", "alpha|min:3")).unwrap();
        assert!(v.validate("nickname", &json!("")).await.unwrap());

        let mut strict =
            validator().with_config(ValidatorConfig::default().with_skip_empty_optional(false));
        strict.attach(FieldSpec::new("nickname", "alpha")).unwrap();
        assert!(!strict.validate("nickname", &json!("")).await.unwrap());
    }

    #[tokio::test]
    async fn validate_all_treats_missing_values_as_null() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required")).unwrap();
        v.attach(FieldSpec::new("bio", "max:10")).unwrap();

        let values = Map::new();
        assert!(!v.validate_all(&values).await.unwrap());
        assert_eq!(v.errors().count(), 1);
        assert_eq!(v.errors().first("name"), Some("The name field is required."));
    }

    #[tokio::test]
    async fn validate_all_leaves_errors_on_rule_error() {
        let mut v = validator();
        v.attach(FieldSpec::new("name", "required")).unwrap();
        v.validate("name", &Value::Null).await.unwrap();
        assert_eq!(v.errors().count(), 1);

        v.attach(FieldSpec::new("other", "missing_rule")).unwrap();
        let values = json!({ "name": "Ada", "other": "x" });
        let err = v.validate_all(values.as_object().unwrap()).await.unwrap_err();

        assert!(matches!(err, RuleError::UnknownRule { .. }));
        assert_eq!(v.errors().count(), 1);
    }

    #[tokio::test]
    async fn pinned_locale_overrides_registry_locale() {
        let mut v = validator();
        v.localize(
            "fr",
            Locale::new().message("required", "Le champ {field} est obligatoire."),
        );
        v.set_locale("fr");
        v.attach(FieldSpec::new("nom", "required")).unwrap();

        v.validate("nom", &Value::Null).await.unwrap();
        assert_eq!(v.errors().first("nom"), Some("Le champ nom est obligatoire."));
        assert_eq!(v.registry().locale(), "en");
    }

    #[tokio::test]
    async fn verify_renders_with_placeholder_field() {
        let v = validator();
        let result = v.verify(&json!("abc"), "numeric").await.unwrap();
        assert_eq!(
            result,
            Verification {
                valid: false,
                errors: vec!["The {field} field may only contain numeric characters.".to_string()],
            }
        );

        let ok = v.verify(&json!("123"), "required|numeric").await.unwrap();
        assert!(ok.valid);
        assert!(ok.errors.is_empty());
    }

    #[tokio::test]
    async fn field_results_accumulate() {
        let mut v = validator();
        v.attach(FieldSpec::new("a", "required")).unwrap();
        v.attach(FieldSpec::new("b", "numeric")).unwrap();

        let a = v.field_result("a", Value::Null).await.unwrap();
        let b = v.field_result("b", json!("x")).await.unwrap();

        match a.and(b) {
            Validation::Failure(errors) => {
                let rules: Vec<_> = errors.iter().map(|e| e.rule.as_str()).collect();
                assert_eq!(rules, vec!["required", "numeric"]);
            }
            Validation::Success(_) => panic!("both fields should fail"),
        }
        assert!(v.errors().is_empty());
    }

    #[tokio::test]
    async fn outcome_data_reaches_message() {
        let mut v = validator();
        v.extend(
            "reason",
            ObjectRule::new()
                .validate(|_: &Value, _: &[String]| {
                    Outcome::fail().with_data(json!({ "why": "blocked" }))
                })
                .get_message(|field, _, data| {
                    let why = data
                        .and_then(|d| d.get("why"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    format!("{} rejected: {}", field, why)
                }),
        )
        .unwrap();
        v.attach(FieldSpec::new("user", "reason")).unwrap();

        assert!(!v.validate("user", &json!("bob")).await.unwrap());
        assert_eq!(v.errors().first("user"), Some("user rejected: blocked"));
    }

    #[test]
    fn detach_drops_field_and_errors() {
        let mut v = validator();
        v.attach(FieldSpec::new("a", "required")).unwrap();
        assert!(v.detach("a"));
        assert!(!v.detach("a"));
        assert!(v.fields().is_empty());
    }
}
