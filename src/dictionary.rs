//! Locale dictionary for rule messages.
//!
//! The dictionary maps a locale code to a [`Locale`]: rule messages, field
//! display names ("attributes") and a locale-wide default message. Message
//! generators supplied with a rule's `get_message` member end up here.
//!
//! # Resolution order
//!
//! For a failing rule `r` on field `f` in locale `l`:
//!
//! 1. the message for `r` in `l`, else the default message of `l`
//! 2. the same two lookups in the fallback locale (`en`)
//! 3. [`DEFAULT_MESSAGE`]
//!
//! `{field}` renders as the attribute display name for `f` when one is set
//! (again `l` first, then the fallback), otherwise as `f` itself.
//!
//! # Examples
//!
//! ```
//! use rulebook::{Dictionary, Locale};
//!
//! let mut dictionary = Dictionary::new();
//! dictionary.merge(
//!     "en",
//!     Locale::new()
//!         .message("required", "The {field} field is required.")
//!         .attribute("email_address", "email"),
//! );
//!
//! assert_eq!(
//!     dictionary.resolve("en", "required", "email_address", &[], None),
//!     "The email field is required."
//! );
//! assert_eq!(
//!     dictionary.resolve("fr", "unknown", "name", &[], None),
//!     "The name value is not valid."
//! );
//! ```

use crate::rule::MessageFn;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// `{field}` and positional `{0}`, `{1}`, ... placeholders.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));

/// Locale consulted when the requested one has no entry.
pub const FALLBACK_LOCALE: &str = "en";

/// Message used when no locale provides one.
pub const DEFAULT_MESSAGE: &str = "The {field} value is not valid.";

/// A message: a template or a generator function.
///
/// Templates substitute `{field}` with the field's display name and `{0}`,
/// `{1}`, ... with the rule arguments. Unknown placeholders are left as-is.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub enum Message {
    /// A template string.
    Template(String),
    /// A generator called with `(field, args, data)`.
    Generator(MessageFn),
}

impl Message {
    /// Build a generator message.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&str, &[String], Option<&Value>) -> String + Send + Sync + 'static,
    {
        Message::Generator(Arc::new(f))
    }

    /// Render the message for a field.
    pub fn render(&self, field: &str, args: &[String], data: Option<&Value>) -> String {
        match self {
            Message::Template(template) => render_template(template, field, args),
            Message::Generator(generate) => generate(field, args, data),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Message::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Message::Template(template)
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Message::Template(template.to_string())
    }
}

/// Messages and display names for one locale.
///
/// Deserializes from JSON of the form
/// `{ "messages": { rule: template }, "attributes": { field: name }, "default": template }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Rule name to message.
    pub messages: HashMap<String, Message>,
    /// Field name to display name.
    pub attributes: HashMap<String, String>,
    /// Message for rules without their own entry.
    pub default: Option<Message>,
}

impl Locale {
    /// An empty locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule message.
    pub fn message(mut self, rule: impl Into<String>, message: impl Into<Message>) -> Self {
        self.messages.insert(rule.into(), message.into());
        self
    }

    /// Add a field display name.
    pub fn attribute(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.attributes.insert(field.into(), name.into());
        self
    }

    /// Set the locale-wide default message.
    pub fn default_message(mut self, message: impl Into<Message>) -> Self {
        self.default = Some(message.into());
        self
    }

    fn merge(&mut self, other: Locale) {
        self.messages.extend(other.messages);
        self.attributes.extend(other.attributes);
        if other.default.is_some() {
            self.default = other.default;
        }
    }
}

/// All locales known to a registry.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    locales: HashMap<String, Locale>,
}

impl Dictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `locale` into the entry for `code`, overwriting per key.
    pub fn merge(&mut self, code: impl Into<String>, locale: Locale) {
        self.locales.entry(code.into()).or_default().merge(locale);
    }

    /// Set a single rule message.
    pub fn set_message(
        &mut self,
        code: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<Message>,
    ) {
        self.locales
            .entry(code.into())
            .or_default()
            .messages
            .insert(rule.into(), message.into());
    }

    /// Set a single field display name.
    pub fn set_attribute(
        &mut self,
        code: impl Into<String>,
        field: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.locales
            .entry(code.into())
            .or_default()
            .attributes
            .insert(field.into(), name.into());
    }

    /// Whether the locale has any entry.
    pub fn has_locale(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// Whether the locale has its own message for the rule.
    pub fn has_message(&self, code: &str, rule: &str) -> bool {
        self.locales
            .get(code)
            .is_some_and(|locale| locale.messages.contains_key(rule))
    }

    /// Remove every rule message registered under `rule`.
    pub fn remove_messages(&mut self, rule: &str) {
        for locale in self.locales.values_mut() {
            locale.messages.remove(rule);
        }
    }

    /// Display name for a field, falling back to the field name.
    pub fn attribute<'a>(&'a self, code: &str, field: &'a str) -> &'a str {
        self.lookup(code, |locale| locale.attributes.get(field))
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// Render the message for a failing rule.
    pub fn resolve(
        &self,
        code: &str,
        rule: &str,
        field: &str,
        args: &[String],
        data: Option<&Value>,
    ) -> String {
        let display = self.attribute(code, field);

        match self.lookup(code, |locale| {
            locale.messages.get(rule).or(locale.default.as_ref())
        }) {
            Some(message) => message.render(display, args, data),
            None => render_template(DEFAULT_MESSAGE, display, args),
        }
    }

    fn lookup<'a, T, F>(&'a self, code: &str, get: F) -> Option<&'a T>
    where
        F: Fn(&'a Locale) -> Option<&'a T>,
    {
        self.locales
            .get(code)
            .and_then(&get)
            .or_else(|| self.locales.get(FALLBACK_LOCALE).and_then(&get))
    }
}

fn render_template(template: &str, field: &str, args: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            if key == "field" {
                return field.to_string();
            }
            match key.parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => arg.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
