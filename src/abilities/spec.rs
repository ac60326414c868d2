//! Ability specs - per-owner runtime ability state.
//!
//! A spec is created when an ability is granted to an entity and removed
//! when it is revoked. It tracks the ability's level and how many
//! activations are currently in flight.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::GameplayAbility;

/// Handle of a granted ability, unique and monotonic within its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AbilitySpecHandle(pub u32);

impl AbilitySpecHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AbilitySpecHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AbilitySpec({})", self.0)
    }
}

/// A granted ability.
///
/// Holding an `Arc<GameplayAbility>` makes a spec without an ability
/// unrepresentable.
#[derive(Clone, Debug)]
pub struct AbilitySpec {
    handle: AbilitySpecHandle,
    ability: Arc<GameplayAbility>,
    level: u32,
    active_count: u32,
}

impl AbilitySpec {
    /// Create a spec. `level` is clamped to at least 1.
    #[must_use]
    pub fn new(handle: AbilitySpecHandle, ability: Arc<GameplayAbility>, level: u32) -> Self {
        Self {
            handle,
            ability,
            level: level.max(1),
            active_count: 0,
        }
    }

    /// This spec's handle.
    #[must_use]
    pub fn handle(&self) -> AbilitySpecHandle {
        self.handle
    }

    /// The granted ability.
    #[must_use]
    pub fn ability(&self) -> &Arc<GameplayAbility> {
        &self.ability
    }

    /// Current level (at least 1).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Change the level. Clamped to at least 1.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    /// Number of activations in flight.
    #[must_use]
    pub fn active_count(&self) -> u32 {
        self.active_count
    }

    /// Whether any activation is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_count > 0
    }

    pub(crate) fn begin_activation(&mut self) {
        self.active_count = self.active_count.saturating_add(1);
    }

    pub(crate) fn end_activation(&mut self) {
        self.active_count = self.active_count.saturating_sub(1);
    }
}
