//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// The gateway keys its tables by `Entity::Id`, so every persisted record
/// implements this.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
