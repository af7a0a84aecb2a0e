//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Observed subjects (items) are entities: their price and supply change over
/// time, but the identifier stays the same.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
