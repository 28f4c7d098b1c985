//! Value object trait: equality by value, not identity.
//!
//! Everything the pipeline produces for a single submission (validated
//! inputs, feature vectors, predictions, breakdowns) is a value object:
//! created once per request, never mutated, compared by its contents.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Immutable values are safe to hand across threads, which is
/// what lets a single pipeline serve concurrent submissions without locking.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Kilograms(f64);
///
/// impl ValueObject for Kilograms {}
///
/// assert_eq!(Kilograms(1.5), Kilograms(1.5));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
