//! The shared rule registry
//!
//! A [`Registry`] maps rule names to their validate capability and owns the
//! [`Dictionary`] their messages are rendered from. Registering a rule whose
//! object form carries `get_message` merges that generator into the
//! dictionary under the registry's active locale.
//!
//! One registry is shared by the whole process: [`global`] returns it, and
//! the free functions [`extend`] and [`localize`] operate on it. A
//! [`Validator`](crate::Validator) created with `Validator::new` points at the
//! same registry, so a rule added through any validator is visible to all of
//! them.
//!
//! # Examples
//!
//! ```
//! use rulebook::{ObjectRule, Registry, Rule, RuleError};
//! use serde_json::Value;
//!
//! let registry = Registry::new();
//!
//! // A bare function needs no message generator.
//! registry
//!     .extend(
//!         "positive",
//!         Rule::from_fn(|value: &Value, _: &[String]| value.as_f64().is_some_and(|n| n > 0.0)),
//!     )
//!     .unwrap();
//!
//! // An object without `validate` is rejected.
//! let err = registry
//!     .extend("broken", ObjectRule::new().get_message(|_, _, _| String::new()))
//!     .unwrap_err();
//! assert!(matches!(err, RuleError::MalformedRule { .. }));
//!
//! // So is a second rule under a taken name.
//! let err = registry
//!     .extend("positive", Rule::from_fn(|_: &Value, _: &[String]| true))
//!     .unwrap_err();
//! assert!(matches!(err, RuleError::DuplicateRule { .. }));
//! ```

use crate::dictionary::{Dictionary, Locale, Message, FALLBACK_LOCALE};
use crate::error::RuleError;
use crate::outcome::Outcome;
use crate::rule::{Rule, ValidateFn};
use crate::rules;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::with_builtins()));

/// The process-wide registry, with the builtin rules installed.
pub fn global() -> Arc<Registry> {
    Arc::clone(&GLOBAL)
}

/// Register a rule in the process-wide registry.
///
/// # Errors
///
/// [`RuleError::InvalidRuleName`], [`RuleError::MalformedRule`] or
/// [`RuleError::DuplicateRule`]; see [`Registry::extend`].
pub fn extend(name: &str, rule: impl Into<Rule>) -> Result<(), RuleError> {
    GLOBAL.extend(name, rule)
}

/// Merge messages into a locale of the process-wide registry.
pub fn localize(code: &str, locale: Locale) {
    GLOBAL.localize(code, locale)
}

/// Named rules plus the dictionary their messages come from.
pub struct Registry {
    rules: RwLock<HashMap<String, ValidateFn>>,
    dictionary: RwLock<Dictionary>,
    locale: RwLock<String>,
}

impl Registry {
    /// An empty registry with the `en` locale active.
    pub fn new() -> Self {
        Registry {
            rules: RwLock::new(HashMap::new()),
            dictionary: RwLock::new(Dictionary::new()),
            locale: RwLock::new(FALLBACK_LOCALE.to_string()),
        }
    }

    /// A registry with the builtin rules and their `en` messages.
    ///
    /// See [`rules`](crate::rules) for the list.
    pub fn with_builtins() -> Self {
        let registry = Registry::new();
        {
            let mut rules = write(&registry.rules);
            let mut dictionary = write(&registry.dictionary);
            for builtin in rules::builtins() {
                rules.insert(builtin.name.to_string(), builtin.validate);
                dictionary.set_message(FALLBACK_LOCALE, builtin.name, builtin.message);
            }
        }
        registry
    }

    /// Register a rule under `name`.
    ///
    /// The rule is a [`Rule`] or an [`ObjectRule`](crate::ObjectRule). A
    /// `get_message` member is merged into the dictionary under the active
    /// locale.
    ///
    /// A rejected registration leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidRuleName`] when `name` is empty, has surrounding
    ///   whitespace or contains `|`, `:` or `,`
    /// - [`RuleError::MalformedRule`] when an object rule lacks `validate`
    /// - [`RuleError::DuplicateRule`] when `name` is already registered
    pub fn extend(&self, name: &str, rule: impl Into<Rule>) -> Result<(), RuleError> {
        let result = self.try_extend(name, rule.into());
        match &result {
            Ok(()) => tracing::debug!(rule = %name, "registered validation rule"),
            Err(err) => tracing::warn!(rule = %name, error = %err, "rejected validation rule"),
        }
        result
    }

    fn try_extend(&self, name: &str, rule: Rule) -> Result<(), RuleError> {
        check_name(name)?;
        let (validate, message) = rule.into_parts(name)?;
        let locale = self.locale();

        {
            let mut rules = write(&self.rules);
            if rules.contains_key(name) {
                return Err(RuleError::DuplicateRule {
                    name: name.to_string(),
                });
            }
            rules.insert(name.to_string(), validate);
        }

        if let Some(generate) = message {
            write(&self.dictionary).set_message(locale, name, Message::Generator(generate));
        }
        Ok(())
    }

    /// Remove a rule and its messages. Returns whether it was registered.
    pub fn remove(&self, name: &str) -> bool {
        let removed = write(&self.rules).remove(name).is_some();
        if removed {
            write(&self.dictionary).remove_messages(name);
            tracing::debug!(rule = %name, "removed validation rule");
        }
        removed
    }

    /// Whether a rule is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        read(&self.rules).contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.rules).keys().cloned().collect();
        names.sort();
        names
    }

    /// Merge messages and attributes into a locale.
    pub fn localize(&self, code: &str, locale: Locale) {
        write(&self.dictionary).merge(code, locale);
        tracing::debug!(locale = %code, "merged locale messages");
    }

    /// Switch the active locale.
    pub fn set_locale(&self, code: impl Into<String>) {
        let code = code.into();
        tracing::debug!(locale = %code, "switched active locale");
        *write(&self.locale) = code;
    }

    /// The active locale.
    pub fn locale(&self) -> String {
        read(&self.locale).clone()
    }

    /// Run `f` with read access to the dictionary.
    ///
    /// The dictionary lock is held only for the duration of `f`, which must
    /// not register rules or merge locales on this registry.
    pub fn with_dictionary<R>(&self, f: impl FnOnce(&Dictionary) -> R) -> R {
        f(&read(&self.dictionary))
    }

    /// Run the rule `name` against a value.
    ///
    /// The registry lock is released before the rule's future is awaited, so
    /// slow asynchronous rules do not block registration.
    ///
    /// # Errors
    ///
    /// [`RuleError::UnknownRule`] when no rule is registered under `name`.
    pub async fn validate_rule(
        &self,
        name: &str,
        value: &Value,
        args: &[String],
    ) -> Result<Outcome, RuleError> {
        let validate = {
            let rules = read(&self.rules);
            rules.get(name).cloned()
        }
        .ok_or_else(|| RuleError::UnknownRule {
            name: name.to_string(),
        })?;

        Ok(validate(value, args).await)
    }

    /// Render the message for a failing rule in the active locale.
    pub fn message(
        &self,
        rule: &str,
        field: &str,
        args: &[String],
        data: Option<&Value>,
    ) -> String {
        let locale = self.locale();
        self.message_in(&locale, rule, field, args, data)
    }

    /// Render the message for a failing rule in a given locale.
    pub fn message_in(
        &self,
        locale: &str,
        rule: &str,
        field: &str,
        args: &[String],
        data: Option<&Value>,
    ) -> String {
        read(&self.dictionary).resolve(locale, rule, field, args, data)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .field("locale", &self.locale())
            .finish()
    }
}

fn check_name(name: &str) -> Result<(), RuleError> {
    let usable = !name.is_empty()
        && name.trim() == name
        && !name.contains(|c: char| matches!(c, '|' | ':' | ','));

    if usable {
        Ok(())
    } else {
        Err(RuleError::InvalidRuleName {
            name: name.to_string(),
        })
    }
}

// Every write is a single map operation, so a poisoned lock still holds
// consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
