//! Entity trait: things with identity (users, expenses).

/// An object whose identity outlives any change to its attributes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether this entity carries the given identifier.
    fn is(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
