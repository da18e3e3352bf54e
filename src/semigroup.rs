//! Semigroup trait for associative operations
//!
//! Error accumulation in [`Validation`](crate::Validation) goes through this
//! trait: combining two failures merges their errors instead of keeping only
//! the first one.
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use rulebook::{ErrorBag, FieldError, Semigroup};
//!
//! let first: ErrorBag = [FieldError::new("a", "required", "a required")].into_iter().collect();
//! let second: ErrorBag = [FieldError::new("b", "email", "b email")].into_iter().collect();
//!
//! assert_eq!(first.combine(second).all(), vec!["a required", "b email"]);
//! ```

/// A type that supports an associative binary operation
///
/// The `combine` method takes `self` by value. Clone first if the originals
/// are still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}
