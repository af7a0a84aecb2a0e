//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are interchangeable. A price is a value object; an item is an entity.
///
/// To "modify" a value object, build a new one. `Clone + PartialEq + Debug` are
/// required so values can be copied, compared and logged freely.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
