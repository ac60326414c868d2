//! World queries supplied by the host simulation.
//!
//! Targeting never reaches into global state. Everything it needs about
//! the world comes through a [`TargetProvider`] and an injected
//! [`GameRng`], bundled into a [`TargetContext`] that is built once per
//! world and reused across ticks.

use crate::attributes::AttributeId;
use crate::core::{AbilitySystemConfig, EntityId, GameRng, Position};

/// Team and position queries answered by the host.
///
/// Implementations must be deterministic: the same world state must
/// produce the same lists in the same order on every peer.
pub trait TargetProvider {
    /// Hostile entities from `owner`'s point of view, in a stable order.
    fn enemies(&self, owner: EntityId) -> Vec<EntityId>;

    /// Friendly entities from `owner`'s point of view, in a stable order.
    fn allies(&self, owner: EntityId) -> Vec<EntityId>;

    /// World position of an entity, if it has one.
    fn position(&self, entity: EntityId) -> Option<Position>;
}

/// Read access to entity attributes.
///
/// Returns `None` for unknown entities. Known entities without the
/// attribute read as `Some(0.0)`.
pub trait AttributeQuery {
    fn attribute(&self, entity: EntityId, id: &AttributeId) -> Option<f32>;
}

/// Everything a targeting strategy may consult.
pub struct TargetContext<'a> {
    provider: Box<dyn TargetProvider + 'a>,
    rng: GameRng,
    max_nearest_targets: u32,
}

impl<'a> TargetContext<'a> {
    /// Create a context with the default nearest-N cap.
    pub fn new(provider: impl TargetProvider + 'a, rng: GameRng) -> Self {
        Self {
            provider: Box::new(provider),
            rng,
            max_nearest_targets: AbilitySystemConfig::default().max_nearest_targets,
        }
    }

    /// Take tunables from a configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: &AbilitySystemConfig) -> Self {
        self.max_nearest_targets = config.max_nearest_targets;
        self
    }

    /// Hostile entities for `owner`.
    pub fn enemies(&self, owner: EntityId) -> Vec<EntityId> {
        self.provider.enemies(owner)
    }

    /// Friendly entities for `owner`.
    pub fn allies(&self, owner: EntityId) -> Vec<EntityId> {
        self.provider.allies(owner)
    }

    /// Position of an entity.
    pub fn position(&self, entity: EntityId) -> Option<Position> {
        self.provider.position(entity)
    }

    /// The shared RNG stream.
    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Hard cap for nearest-N selection.
    #[must_use]
    pub fn max_nearest_targets(&self) -> u32 {
        self.max_nearest_targets
    }
}

impl std::fmt::Debug for TargetContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetContext")
            .field("rng", &self.rng)
            .field("max_nearest_targets", &self.max_nearest_targets)
            .finish_non_exhaustive()
    }
}
