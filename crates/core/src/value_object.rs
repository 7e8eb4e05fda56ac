//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values.
/// `Money` and `Split` are value objects; `User` and `Expense` are entities.
///
/// ```ignore
/// let a = Money::new(dec!(12.50));
/// let b = Money::new(dec!(12.5));
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
