//! Entity identification.
//!
//! Every simulated unit that owns an ability system has a unique `EntityId`.
//! IDs are allocated by [`AbilityWorld`](crate::system::AbilityWorld) in
//! ascending order, and that order is the canonical iteration order
//! whenever more than one entity is visited in a tick.
//!
//! ```
//! use rust_gas::core::EntityId;
//!
//! let hero = EntityId::new(1);
//! assert_eq!(hero.raw(), 1);
//! assert!(hero < EntityId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
