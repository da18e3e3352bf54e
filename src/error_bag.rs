//! Collected validation failures.

use crate::Semigroup;
use serde::{Deserialize, Serialize};

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the rule was attached to.
    pub field: String,
    /// Name of the failing rule.
    pub rule: String,
    /// Rendered message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FieldError {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of [`FieldError`]s.
///
/// Errors keep the order they were added in, so `first` returns the message
/// of the first rule that failed for a field.
///
/// # Examples
///
/// ```
/// use rulebook::{ErrorBag, FieldError};
///
/// let mut bag = ErrorBag::new();
/// bag.add(FieldError::new("name", "required", "The name field is required."));
/// bag.add(FieldError::new("age", "numeric", "The age field may only contain numeric characters."));
///
/// assert!(bag.has("name"));
/// assert_eq!(bag.first("name"), Some("The name field is required."));
/// assert_eq!(bag.count(), 2);
///
/// bag.remove("name");
/// assert!(!bag.has("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBag {
    items: Vec<FieldError>,
}

impl ErrorBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error.
    pub fn add(&mut self, error: FieldError) {
        self.items.push(error);
    }

    /// Whether the bag holds any error.
    pub fn any(&self) -> bool {
        !self.items.is_empty()
    }

    /// Whether the bag holds no error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of errors.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether a field has errors.
    pub fn has(&self, field: &str) -> bool {
        self.items.iter().any(|e| e.field == field)
    }

    /// First message for a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Message of a specific rule on a field.
    pub fn first_by_rule(&self, field: &str, rule: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|e| e.field == field && e.rule == rule)
            .map(|e| e.message.as_str())
    }

    /// Every message for a field.
    pub fn collect(&self, field: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Every message in the bag.
    pub fn all(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.message.as_str()).collect()
    }

    /// Drop the errors of one field.
    pub fn remove(&mut self, field: &str) {
        self.items.retain(|e| e.field != field);
    }

    /// Drop every error.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.items.iter()
    }
}

impl Extend<FieldError> for ErrorBag {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorBag {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        ErrorBag {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorBag {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorBag {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Semigroup for ErrorBag {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.items.extend(other.items);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag() -> ErrorBag {
        [
            FieldError::new("name", "required", "name required"),
            FieldError::new("name", "min", "name too short"),
            FieldError::new("age", "numeric", "age numeric"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn queries_by_field_and_rule() {
        let bag = bag();
        assert_eq!(bag.first("name"), Some("name required"));
        assert_eq!(bag.first_by_rule("name", "min"), Some("name too short"));
        assert_eq!(bag.collect("name"), vec!["name required", "name too short"]);
        assert_eq!(bag.first("email"), None);
    }

    #[test]
    fn remove_only_touches_one_field() {
        let mut bag = bag();
        bag.remove("name");
        assert_eq!(bag.all(), vec!["age numeric"]);
    }

    #[test]
    fn combine_preserves_order() {
        let left: ErrorBag = [FieldError::new("a", "r", "1")].into_iter().collect();
        let right: ErrorBag = [FieldError::new("b", "r", "2")].into_iter().collect();
        assert_eq!(left.combine(right).all(), vec!["1", "2"]);
    }

    #[test]
    fn serializes_as_a_list() {
        let bag: ErrorBag = [FieldError::new("a", "required", "a required")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&bag).unwrap(),
            serde_json::json!([{ "field": "a", "rule": "required", "message": "a required" }])
        );
    }
}
