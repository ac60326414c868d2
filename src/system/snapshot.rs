//! Serializable point-in-time views of a component.
//!
//! Snapshots are plain data: attribute values, owned tags, granted
//! abilities and the end times of active effects. The encoding is up to
//! the consumer; everything here derives `serde`.

use serde::{Deserialize, Serialize};

use crate::abilities::AbilitySpecHandle;
use crate::attributes::AttributeSet;
use crate::core::EntityId;
use crate::effects::ActiveEffectHandle;
use crate::tags::Tag;

/// Read-only view of one [`AbilitySystemComponent`](super::AbilitySystemComponent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySystemSnapshot {
    pub owner: EntityId,
    /// Simulation time the snapshot was taken at.
    pub time: f64,
    pub attributes: AttributeSet,
    /// Explicitly owned tags, in the order they were first granted.
    pub owned_tags: Vec<Tag>,
    pub abilities: Vec<AbilitySnapshot>,
    pub active_effects: Vec<ActiveEffectSnapshot>,
}

/// A granted ability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySnapshot {
    pub handle: AbilitySpecHandle,
    pub tag: Tag,
    pub level: u32,
    pub active_count: u32,
}

/// An active effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffectSnapshot {
    pub handle: ActiveEffectHandle,
    pub name: String,
    pub source: Option<EntityId>,
    pub stack_count: u32,
    /// `None` for infinite effects.
    pub end_time: Option<f64>,
}

impl AbilitySystemSnapshot {
    /// Seconds left on an effect, by name. `None` if the effect isn't
    /// active or never expires.
    #[must_use]
    pub fn remaining(&self, effect_name: &str) -> Option<f64> {
        self.active_effects
            .iter()
            .find(|e| e.name == effect_name)
            .and_then(|e| e.end_time)
            .map(|end| (end - self.time).max(0.0))
    }

    /// Whether `tag` is explicitly owned.
    #[must_use]
    pub fn has_tag_exact(&self, tag: &Tag) -> bool {
        self.owned_tags.contains(tag)
    }
}
