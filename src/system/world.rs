//! Entity registry and cross-entity entry points.
//!
//! ## AbilityWorld
//!
//! Owns every [`AbilitySystemComponent`] in a `BTreeMap` keyed by
//! [`EntityId`], so iteration (and therefore `advance`) always runs in
//! ascending id order.
//!
//! Activation and effect application go through the world because they
//! touch more than one component: the source's attributes are
//! snapshotted once (an O(1) clone) and then each target component is
//! borrowed mutably in turn.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::abilities::AbilitySpecHandle;
use crate::attributes::{AttributeId, AttributeSet};
use crate::core::{AbilitySystemConfig, ConfigError, EntityId, GameRng};
use crate::effects::GameplayEffect;
use crate::targeting::{AttributeQuery, TargetContext, TargetData, TargetProvider};

use super::{AbilitySystemComponent, AbilitySystemSnapshot, ActivationError, ApplyOutcome};

/// RNG context label for targeting streams.
const TARGETING_RNG_CONTEXT: &str = "targeting";

/// Every ability system component in a simulation.
#[derive(Clone, Debug, Default)]
pub struct AbilityWorld {
    config: AbilitySystemConfig,
    components: BTreeMap<EntityId, AbilitySystemComponent>,
    next_entity: u32,
}

impl AbilityWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new(config: AbilitySystemConfig) -> Self {
        Self {
            config,
            components: BTreeMap::new(),
            next_entity: 0,
        }
    }

    /// Create an empty world after validating `config`.
    pub fn try_new(config: AbilitySystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &AbilitySystemConfig {
        &self.config
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Create a component under the next free id.
    pub fn spawn(&mut self) -> EntityId {
        let mut id = EntityId(self.next_entity);
        while self.components.contains_key(&id) {
            id = id.next();
        }
        self.next_entity = id.next().raw();
        self.components
            .insert(id, AbilitySystemComponent::with_config(id, self.config.clone()));
        id
    }

    /// Add a component built elsewhere, replacing any with the same owner.
    pub fn insert(&mut self, component: AbilitySystemComponent) -> Option<AbilitySystemComponent> {
        self.components.insert(component.owner(), component)
    }

    /// Remove an entity's component.
    pub fn despawn(&mut self, id: EntityId) -> Option<AbilitySystemComponent> {
        self.components.remove(&id)
    }

    #[must_use]
    pub fn component(&self, id: EntityId) -> Option<&AbilitySystemComponent> {
        self.components.get(&id)
    }

    pub fn component_mut(&mut self, id: EntityId) -> Option<&mut AbilitySystemComponent> {
        self.components.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.components.contains_key(&id)
    }

    /// Registered entities, ascending.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.components.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    // =========================================================================
    // Targeting
    // =========================================================================

    /// A fresh targeting RNG derived from the configured seed.
    ///
    /// Two worlds with the same seed produce identical streams.
    #[must_use]
    pub fn target_rng(&self) -> GameRng {
        GameRng::new(self.config.rng_seed).for_context(TARGETING_RNG_CONTEXT)
    }

    /// A targeting context over `provider`, seeded from the configuration.
    pub fn target_context<'a>(&self, provider: impl TargetProvider + 'a) -> TargetContext<'a> {
        TargetContext::new(provider, self.target_rng()).with_config(&self.config)
    }

    // =========================================================================
    // Activation & application
    // =========================================================================

    /// Try to activate one of `owner`'s abilities.
    ///
    /// 1. Gate on the owner's tags.
    /// 2. Resolve targets with the ability's strategy.
    /// 3. Fail if nothing was found and the ability needs a target.
    /// 4. Bump the active count, apply costs and cooldown to the owner.
    /// 5. If `apply_on_activate`, apply the ability's effects to the targets.
    ///
    /// Failures leave every component untouched.
    pub fn try_activate_ability(
        &mut self,
        owner: EntityId,
        handle: AbilitySpecHandle,
        context: &mut TargetContext<'_>,
        apply_on_activate: bool,
    ) -> Result<TargetData, ActivationError> {
        let component = self
            .components
            .get(&owner)
            .ok_or(ActivationError::UnknownEntity(owner))?;

        let ability = match component.check_activation(handle) {
            Ok(spec) => Arc::clone(spec.ability()),
            Err(err) => {
                debug!("activation failed: {err}");
                return Err(err);
            }
        };

        let targets = ability.targeting.find_targets(owner, &*self, context);
        if targets.is_empty() && ability.requires_target {
            let err = ActivationError::NoTargets {
                owner,
                ability: ability.tag.clone(),
            };
            debug!("activation failed: {err}");
            return Err(err);
        }

        if let Some(component) = self.components.get_mut(&owner) {
            component.commit_activation(handle);
        }
        debug!(
            "{} activated {} on {} target(s)",
            owner,
            ability.tag,
            targets.len()
        );

        if apply_on_activate {
            self.apply_effects_to_targets(owner, &ability.applied_effects, &targets);
        }
        Ok(targets)
    }

    /// Apply each effect to each target, effect by effect, in target order.
    ///
    /// The source's attributes are captured once, before the first
    /// application. An unknown source applies with an empty attribute set.
    pub fn apply_effects_to_targets(
        &mut self,
        source: EntityId,
        effects: &[Arc<GameplayEffect>],
        targets: &TargetData,
    ) -> Vec<ApplyOutcome> {
        let snapshot = self
            .components
            .get(&source)
            .map(|c| c.attributes().clone())
            .unwrap_or_default();

        let mut outcomes = Vec::with_capacity(effects.len() * targets.len());
        for effect in effects {
            for target in targets.iter() {
                let outcome = match self.components.get_mut(&target) {
                    Some(component) => component.apply_effect(effect, Some(source), &snapshot),
                    None => ApplyOutcome::MissingTarget,
                };
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Apply one effect from `source` to a single target.
    pub fn apply_effect(
        &mut self,
        source: EntityId,
        effect: &Arc<GameplayEffect>,
        target: EntityId,
    ) -> ApplyOutcome {
        let snapshot: AttributeSet = self
            .components
            .get(&source)
            .map(|c| c.attributes().clone())
            .unwrap_or_default();

        match self.components.get_mut(&target) {
            Some(component) => component.apply_effect(effect, Some(source), &snapshot),
            None => ApplyOutcome::MissingTarget,
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance every component by `dt`, in ascending entity order.
    pub fn advance(&mut self, dt: f32) {
        for component in self.components.values_mut() {
            component.advance(dt);
        }
    }

    /// Snapshot one entity.
    #[must_use]
    pub fn snapshot(&self, id: EntityId) -> Option<AbilitySystemSnapshot> {
        self.components.get(&id).map(AbilitySystemComponent::snapshot)
    }

    /// Snapshot every entity, ascending.
    #[must_use]
    pub fn snapshots(&self) -> Vec<AbilitySystemSnapshot> {
        self.components.values().map(AbilitySystemComponent::snapshot).collect()
    }
}

impl AttributeQuery for AbilityWorld {
    fn attribute(&self, entity: EntityId, id: &AttributeId) -> Option<f32> {
        self.components.get(&entity).map(|c| c.attribute(id))
    }
}
