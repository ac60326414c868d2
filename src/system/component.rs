//! Per-entity ability system component.
//!
//! ## AbilitySystemComponent
//!
//! The aggregation root for one entity:
//! - One `AttributeSet`
//! - One `TagContainer` of owned tags (loose tags plus tags granted by
//!   active effects, reference counted)
//! - Granted `AbilitySpec`s
//! - Active timed and infinite effects, in application order
//! - A simulation clock advanced by [`AbilitySystemComponent::advance`]
//!
//! The component only ever mutates its own state. Effects from other
//! entities arrive with a snapshot of the source's attributes, so a
//! component never needs to borrow another one.
//!
//! ## Stacking
//!
//! Re-applying an effect that is already active (same definition, or same
//! non-empty name) never creates a second instance:
//! - Below `max_stack`: the stack count grows and the modifiers apply once
//!   more. Periodic ticks fire once per stack.
//! - At `max_stack`: the application is accepted but changes nothing
//!   except the refresh below.
//! - Either way a timed effect's end time is reset to `now + duration`,
//!   and the stored source snapshot is replaced.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::abilities::{AbilitySpec, AbilitySpecHandle, GameplayAbility};
use crate::attributes::{AttributeId, AttributeSet};
use crate::core::{AbilitySystemConfig, EntityId};
use crate::effects::{
    ActiveEffect, ActiveEffectHandle, Contribution, DurationType, GameplayEffect, MIN_PERIOD,
};
use crate::tags::{Tag, TagContainer};

use super::snapshot::{AbilitySnapshot, AbilitySystemSnapshot, ActiveEffectSnapshot};
use super::ActivationError;

/// Result of applying one effect to one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Instant effect: modifiers ran once, nothing retained.
    Executed,
    /// A new active effect was created.
    Applied(ActiveEffectHandle),
    /// An existing instance gained a stack.
    Stacked {
        handle: ActiveEffectHandle,
        stack_count: u32,
    },
    /// An existing instance at its stack cap was refreshed.
    Refreshed(ActiveEffectHandle),
    /// The target's tags failed the effect's required/blocked gate.
    Blocked,
    /// The target entity does not exist.
    MissingTarget,
}

impl ApplyOutcome {
    /// Whether the effect landed.
    #[must_use]
    pub fn is_applied(self) -> bool {
        !matches!(self, ApplyOutcome::Blocked | ApplyOutcome::MissingTarget)
    }

    /// The active effect touched by this application, if any.
    #[must_use]
    pub fn handle(self) -> Option<ActiveEffectHandle> {
        match self {
            ApplyOutcome::Applied(handle)
            | ApplyOutcome::Stacked { handle, .. }
            | ApplyOutcome::Refreshed(handle) => Some(handle),
            ApplyOutcome::Executed | ApplyOutcome::Blocked | ApplyOutcome::MissingTarget => None,
        }
    }
}

/// Ability system state for one entity.
#[derive(Clone, Debug)]
pub struct AbilitySystemComponent {
    owner: EntityId,
    config: AbilitySystemConfig,

    // === Attributes & Tags ===
    attributes: AttributeSet,
    owned_tags: TagContainer,
    /// Number of live grants per owned tag (loose adds count as grants).
    tag_counts: FxHashMap<Tag, u32>,

    // === Abilities ===
    specs: Vec<AbilitySpec>,
    next_spec_handle: u32,

    // === Effects ===
    active_effects: Vec<ActiveEffect>,
    next_effect_handle: u32,

    // === Clock ===
    time: f64,
    ability_dirty: bool,
}

impl AbilitySystemComponent {
    /// Create an empty component with the default configuration.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self::with_config(owner, AbilitySystemConfig::default())
    }

    /// Create an empty component.
    #[must_use]
    pub fn with_config(owner: EntityId, config: AbilitySystemConfig) -> Self {
        Self {
            owner,
            config,
            attributes: AttributeSet::new(),
            owned_tags: TagContainer::new(),
            tag_counts: FxHashMap::default(),
            specs: Vec::new(),
            next_spec_handle: 1,
            active_effects: Vec::new(),
            next_effect_handle: 1,
            time: 0.0,
            ability_dirty: false,
        }
    }

    /// The entity this component belongs to.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    #[must_use]
    pub fn config(&self) -> &AbilitySystemConfig {
        &self.config
    }

    /// Simulation time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[must_use]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Direct write access, for host-side initialization and tests.
    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    /// Create or reset an attribute.
    pub fn set_attribute(&mut self, id: &AttributeId, base: f32, min: f32, max: f32) {
        self.attributes.set_attribute(id, base, min, max);
    }

    /// Current value of an attribute; `0.0` if missing.
    #[must_use]
    pub fn attribute(&self, id: &AttributeId) -> f32 {
        self.attributes.get(id)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    #[must_use]
    pub fn owned_tags(&self) -> &TagContainer {
        &self.owned_tags
    }

    /// Ancestor-inclusive check against owned tags.
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.owned_tags.has_tag(tag)
    }

    /// Add a tag not backed by any effect. Returns `false` for invalid tags.
    pub fn add_loose_tag(&mut self, tag: impl Into<Tag>) -> bool {
        let tag = tag.into();
        if !tag.is_valid() {
            return false;
        }
        if self.grant_tag(tag) {
            self.ability_dirty = true;
        }
        true
    }

    /// Drop one loose grant of a tag. Returns `false` if the tag wasn't owned.
    pub fn remove_loose_tag(&mut self, tag: &Tag) -> bool {
        if !self.tag_counts.contains_key(tag) {
            return false;
        }
        if self.release_tag(tag) {
            self.ability_dirty = true;
        }
        true
    }

    /// Returns `true` if the tag became owned.
    fn grant_tag(&mut self, tag: Tag) -> bool {
        let count = self.tag_counts.entry(tag.clone()).or_insert(0);
        *count += 1;
        *count == 1 && self.owned_tags.add_tag(tag)
    }

    /// Returns `true` if the tag stopped being owned.
    fn release_tag(&mut self, tag: &Tag) -> bool {
        let Some(count) = self.tag_counts.get_mut(tag) else {
            return false;
        };
        if *count > 1 {
            *count -= 1;
            return false;
        }
        self.tag_counts.remove(tag);
        self.owned_tags.remove_tag(tag)
    }

    fn grant_tags(&mut self, tags: &TagContainer) -> bool {
        let mut changed = false;
        for tag in tags.iter() {
            changed |= self.grant_tag(tag.clone());
        }
        changed
    }

    fn release_tags(&mut self, tags: &TagContainer) -> bool {
        let mut changed = false;
        for tag in tags.iter() {
            changed |= self.release_tag(tag);
        }
        changed
    }

    // =========================================================================
    // Abilities
    // =========================================================================

    /// Grant an ability. Granting an ability whose tag is already granted
    /// returns the existing handle.
    pub fn give_ability(&mut self, ability: Arc<GameplayAbility>, level: u32) -> AbilitySpecHandle {
        if let Some(existing) = self.find_spec_by_tag(&ability.tag) {
            return existing.handle();
        }

        let handle = AbilitySpecHandle(self.next_spec_handle);
        self.next_spec_handle += 1;
        debug!("{} granted {} as {}", self.owner, ability.tag, handle);
        self.specs.push(AbilitySpec::new(handle, ability, level));
        self.ability_dirty = true;
        handle
    }

    /// Remove a granted ability.
    pub fn revoke_ability(&mut self, handle: AbilitySpecHandle) -> bool {
        let Some(index) = self.specs.iter().position(|s| s.handle() == handle) else {
            return false;
        };
        let spec = self.specs.remove(index);
        debug!("{} revoked {}", self.owner, spec.ability().tag);
        self.ability_dirty = true;
        true
    }

    #[must_use]
    pub fn spec(&self, handle: AbilitySpecHandle) -> Option<&AbilitySpec> {
        self.specs.iter().find(|s| s.handle() == handle)
    }

    fn spec_mut(&mut self, handle: AbilitySpecHandle) -> Option<&mut AbilitySpec> {
        self.specs.iter_mut().find(|s| s.handle() == handle)
    }

    /// Granted abilities, in grant order.
    #[must_use]
    pub fn specs(&self) -> &[AbilitySpec] {
        &self.specs
    }

    /// The spec whose ability tag equals `tag` exactly.
    #[must_use]
    pub fn find_spec_by_tag(&self, tag: &Tag) -> Option<&AbilitySpec> {
        self.specs.iter().find(|s| s.ability().tag == *tag)
    }

    /// Change a granted ability's level.
    pub fn set_ability_level(&mut self, handle: AbilitySpecHandle, level: u32) -> bool {
        match self.spec_mut(handle) {
            Some(spec) => {
                spec.set_level(level);
                true
            }
            None => false,
        }
    }

    /// Check the activation gate without resolving targets.
    pub fn check_activation(&self, handle: AbilitySpecHandle) -> Result<&AbilitySpec, ActivationError> {
        let spec = self.spec(handle).ok_or(ActivationError::UnknownAbility {
            owner: self.owner,
            handle,
        })?;
        let ability = spec.ability();

        if !self.owned_tags.has_all(&ability.activation_required_tags) {
            return Err(ActivationError::MissingRequiredTags {
                owner: self.owner,
                ability: ability.tag.clone(),
            });
        }
        if self.owned_tags.has_any(&ability.activation_blocked_tags) {
            return Err(ActivationError::Blocked {
                owner: self.owner,
                ability: ability.tag.clone(),
            });
        }
        Ok(spec)
    }

    /// Whether the owner's tags currently allow the ability.
    #[must_use]
    pub fn can_activate_ability(&self, handle: AbilitySpecHandle) -> bool {
        self.check_activation(handle).is_ok()
    }

    /// Record a successful activation: bump the active count and pay
    /// costs and cooldown out of this component.
    pub(crate) fn commit_activation(&mut self, handle: AbilitySpecHandle) -> bool {
        let Some(spec) = self.spec_mut(handle) else {
            return false;
        };
        spec.begin_activation();
        let ability = Arc::clone(spec.ability());

        let snapshot = self.attributes.clone();
        for cost in &ability.cost_effects {
            self.apply_effect(cost, Some(self.owner), &snapshot);
        }
        if let Some(cooldown) = &ability.cooldown_effect {
            self.apply_effect(cooldown, Some(self.owner), &snapshot);
        }
        true
    }

    /// Finish one in-flight activation.
    pub fn end_ability(&mut self, handle: AbilitySpecHandle) -> bool {
        match self.spec_mut(handle) {
            Some(spec) => {
                spec.end_activation();
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Effects
    // =========================================================================

    /// Apply an effect to this entity.
    ///
    /// `source_attributes` is the applier's attribute set at application
    /// time. It is kept for periodic calculators.
    pub fn apply_effect(
        &mut self,
        effect: &Arc<GameplayEffect>,
        source: Option<EntityId>,
        source_attributes: &AttributeSet,
    ) -> ApplyOutcome {
        if !effect.can_apply_to(&self.owned_tags) {
            debug!("{} blocked effect {:?}", self.owner, effect.name);
            return ApplyOutcome::Blocked;
        }

        if effect.is_instant() {
            run_modifiers(effect, source_attributes, &mut self.attributes);
            debug!("{} executed {:?}", self.owner, effect.name);
            return ApplyOutcome::Executed;
        }

        let end_time = self.end_time_for(effect);

        if let Some(active) = self.active_effects.iter_mut().find(|a| a.is_instance_of(effect)) {
            active.end_time = end_time;
            active.source = source;
            active.source_attributes = source_attributes.clone();

            if active.stack_count >= active.effect.stack_limit() {
                debug!("{} refreshed {:?}", self.owner, effect.name);
                return ApplyOutcome::Refreshed(active.handle);
            }

            active.stack_count += 1;
            let contributions = run_modifiers(&active.effect, source_attributes, &mut self.attributes);
            if !active.effect.is_periodic() {
                contributions.into_iter().for_each(|c| active.track(c));
            }
            debug!("{} stacked {:?} to {}", self.owner, effect.name, active.stack_count);
            return ApplyOutcome::Stacked {
                handle: active.handle,
                stack_count: active.stack_count,
            };
        }

        let handle = ActiveEffectHandle(self.next_effect_handle);
        self.next_effect_handle += 1;

        let mut active = ActiveEffect::new(
            handle,
            Arc::clone(effect),
            source,
            source_attributes.clone(),
            self.time,
            end_time,
        );
        if self.grant_tags(&effect.granted_tags) {
            self.ability_dirty = true;
        }
        let contributions = run_modifiers(effect, source_attributes, &mut self.attributes);
        if !effect.is_periodic() {
            contributions.into_iter().for_each(|c| active.track(c));
        }
        self.active_effects.push(active);

        debug!("{} applied {:?} as {}", self.owner, effect.name, handle);
        ApplyOutcome::Applied(handle)
    }

    /// Apply an effect sourced from this entity to itself.
    pub fn apply_effect_to_self(&mut self, effect: &Arc<GameplayEffect>) -> ApplyOutcome {
        let snapshot = self.attributes.clone();
        self.apply_effect(effect, Some(self.owner), &snapshot)
    }

    fn end_time_for(&self, effect: &GameplayEffect) -> Option<f64> {
        match effect.duration_type {
            DurationType::HasDuration => {
                let duration = effect.duration_policy.map_or(effect.duration, |policy| {
                    policy.calculate_duration(&self.attributes, effect.duration, &self.config)
                });
                Some(self.time + f64::from(duration.max(0.0)))
            }
            DurationType::Instant | DurationType::Infinite => None,
        }
    }

    /// Active effects, in application order.
    #[must_use]
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.active_effects
    }

    #[must_use]
    pub fn active_effect(&self, handle: ActiveEffectHandle) -> Option<&ActiveEffect> {
        self.active_effects.iter().find(|a| a.handle == handle)
    }

    /// Remove an active effect before it expires.
    pub fn remove_active_effect(&mut self, handle: ActiveEffectHandle) -> bool {
        let Some(index) = self.active_effects.iter().position(|a| a.handle == handle) else {
            return false;
        };
        let active = self.active_effects.remove(index);
        debug!("{} removed {:?}", self.owner, active.effect.name);
        self.retire(active);
        true
    }

    /// Remove every active effect granting `tag` (ancestor-inclusive).
    /// Returns how many were removed.
    pub fn remove_effects_with_granted_tag(&mut self, tag: &Tag) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active_effects)
            .into_iter()
            .partition(|a| a.effect.granted_tags.has_tag(tag));
        self.active_effects = kept;

        let count = removed.len();
        for active in removed {
            debug!("{} removed {:?} via {}", self.owner, active.effect.name, tag);
            self.retire(active);
        }
        count
    }

    /// Undo a departing effect: revert tracked contributions, release tags.
    fn retire(&mut self, active: ActiveEffect) {
        for contribution in active.contributions.iter().rev() {
            self.attributes.add(&contribution.attribute, -contribution.delta);
        }
        if self.release_tags(&active.effect.granted_tags) {
            self.ability_dirty = true;
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the clock by `dt` seconds: fire periodic effects, then
    /// expire effects whose end time has been reached.
    ///
    /// Negative or non-finite deltas are ignored. Periodic effects never
    /// fire past their own end time, however large `dt` is.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }

        let previous = self.time;
        self.time += f64::from(dt);
        let now = self.time;

        let mut index = 0;
        while index < self.active_effects.len() {
            let active = &mut self.active_effects[index];

            if active.effect.is_periodic() {
                let window = match active.end_time {
                    Some(end) => ((end - previous).max(0.0) as f32).min(dt),
                    None => dt,
                };
                fire_periodic(active, window, &mut self.attributes);
            }

            if active.is_expired(now) {
                let expired = self.active_effects.remove(index);
                debug!("{} expired {:?} at {:.3}", self.owner, expired.effect.name, now);
                self.retire(expired);
            } else {
                index += 1;
            }
        }
    }

    // =========================================================================
    // Dirty flag & snapshot
    // =========================================================================

    /// Read and clear the ability-dirty flag.
    pub fn consume_ability_dirty(&mut self) -> bool {
        std::mem::take(&mut self.ability_dirty)
    }

    #[must_use]
    pub fn is_ability_dirty(&self) -> bool {
        self.ability_dirty
    }

    /// Force the next [`consume_ability_dirty`](Self::consume_ability_dirty)
    /// to report `true`.
    pub fn mark_ability_dirty(&mut self) {
        self.ability_dirty = true;
    }

    /// Point-in-time view for external serialization.
    #[must_use]
    pub fn snapshot(&self) -> AbilitySystemSnapshot {
        AbilitySystemSnapshot {
            owner: self.owner,
            time: self.time,
            attributes: self.attributes.clone(),
            owned_tags: self.owned_tags.iter().cloned().collect(),
            abilities: self
                .specs
                .iter()
                .map(|spec| AbilitySnapshot {
                    handle: spec.handle(),
                    tag: spec.ability().tag.clone(),
                    level: spec.level(),
                    active_count: spec.active_count(),
                })
                .collect(),
            active_effects: self
                .active_effects
                .iter()
                .map(|active| ActiveEffectSnapshot {
                    handle: active.handle,
                    name: active.effect.name.clone(),
                    source: active.source,
                    stack_count: active.stack_count,
                    end_time: active.end_time,
                })
                .collect(),
        }
    }
}

fn run_modifiers(
    effect: &GameplayEffect,
    source: &AttributeSet,
    target: &mut AttributeSet,
) -> SmallVec<[Contribution; 4]> {
    effect
        .modifiers
        .iter()
        .filter_map(|modifier| modifier.apply(source, target))
        .collect()
}

fn fire_periodic(active: &mut ActiveEffect, dt: f32, attributes: &mut AttributeSet) {
    // The field is public, so a hand-built effect can bypass the builder floor.
    let period = active.effect.period.max(MIN_PERIOD);
    active.period_accumulator += dt;
    let fires = (active.period_accumulator / period).floor();
    if !(fires >= 1.0) {
        return;
    }
    active.period_accumulator = (active.period_accumulator - fires * period).max(0.0);

    let fires = fires as u64;
    for _ in 0..fires {
        for _ in 0..active.stack_count {
            run_modifiers(&active.effect, &active.source_attributes, attributes);
        }
    }
    trace!(
        "periodic {:?} fired {} time(s) x{}",
        active.effect.name,
        fires,
        active.stack_count
    );
}
