//! Ability definitions - static ability data.
//!
//! `GameplayAbility` holds the immutable properties of an ability:
//! what it is (its tag), what it costs, what it does, when it may be used
//! and how it finds targets. Per-owner runtime state lives in
//! [`AbilitySpec`](super::AbilitySpec).

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::effects::GameplayEffect;
use crate::tags::{Tag, TagContainer};
use crate::targeting::TargetingStrategy;

/// Static ability definition.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_gas::abilities::GameplayAbility;
/// use rust_gas::effects::{CalculatorType, GameplayEffect, Modifier};
/// use rust_gas::attributes::AttributeId;
/// use rust_gas::targeting::TargetingStrategy;
///
/// let hit = GameplayEffect::instant("BaseAttack.Damage").with_modifier(Modifier::calculated(
///     AttributeId::HEALTH,
///     CalculatorType::DamageBySourceAttackDamage,
/// ));
///
/// let attack = GameplayAbility::new("Ability.BaseAttack")
///     .with_name("Attack")
///     .with_targeting(TargetingStrategy::NearestEnemy { max_range: 5.0 })
///     .with_applied_effect(Arc::new(hit))
///     .block_tag("State.Debuff.Stun");
///
/// assert_eq!(attack.tag.as_str(), "Ability.BaseAttack");
/// assert!(attack.requires_target);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameplayAbility {
    /// Identity of the ability.
    pub tag: Tag,

    /// Display name.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Applied to the owner on activation; usually grants a cooldown tag
    /// that the ability itself is blocked by.
    pub cooldown_effect: Option<Arc<GameplayEffect>>,

    /// Applied to the owner on activation.
    pub cost_effects: Vec<Arc<GameplayEffect>>,

    /// Applied to each resolved target.
    pub applied_effects: Vec<Arc<GameplayEffect>>,

    /// The owner must carry all of these to activate.
    pub activation_required_tags: TagContainer,

    /// The owner must carry none of these to activate.
    pub activation_blocked_tags: TagContainer,

    /// How targets are found.
    pub targeting: TargetingStrategy,

    /// Whether activation fails when no target is found.
    pub requires_target: bool,
}

impl GameplayAbility {
    /// Create an ability that targets its owner and does nothing yet.
    pub fn new(tag: impl Into<Tag>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.as_str().to_string(),
            tag,
            description: String::new(),
            cooldown_effect: None,
            cost_effects: Vec::new(),
            applied_effects: Vec::new(),
            activation_required_tags: TagContainer::new(),
            activation_blocked_tags: TagContainer::new(),
            targeting: TargetingStrategy::default(),
            requires_target: true,
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the display description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the cooldown effect (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, effect: Arc<GameplayEffect>) -> Self {
        self.cooldown_effect = Some(effect);
        self
    }

    /// Add a cost effect (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, effect: Arc<GameplayEffect>) -> Self {
        self.cost_effects.push(effect);
        self
    }

    /// Add an effect applied to targets (builder pattern).
    #[must_use]
    pub fn with_applied_effect(mut self, effect: Arc<GameplayEffect>) -> Self {
        self.applied_effects.push(effect);
        self
    }

    /// Require an owner tag for activation (builder pattern).
    #[must_use]
    pub fn require_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.activation_required_tags.add_tag(tag.into());
        self
    }

    /// Block activation while the owner carries a tag (builder pattern).
    #[must_use]
    pub fn block_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.activation_blocked_tags.add_tag(tag.into());
        self
    }

    /// Set the targeting strategy (builder pattern).
    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingStrategy) -> Self {
        self.targeting = targeting;
        self
    }

    /// Allow activation without any target (builder pattern).
    #[must_use]
    pub fn target_optional(mut self) -> Self {
        self.requires_target = false;
        self
    }

    /// Whether an owner with `tags` passes the activation gate.
    #[must_use]
    pub fn can_activate_with(&self, tags: &TagContainer) -> bool {
        tags.satisfies(&self.activation_required_tags, &self.activation_blocked_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ability = GameplayAbility::new("Ability.Heal");
        assert_eq!(ability.name, "Ability.Heal");
        assert_eq!(ability.targeting, TargetingStrategy::SelfTarget);
        assert!(ability.requires_target);
        assert!(ability.cooldown_effect.is_none());
    }

    #[test]
    fn test_activation_gate() {
        let ability = GameplayAbility::new("Ability.Finisher")
            .require_tag("State.Combo")
            .block_tag("Cooldown.Finisher");

        assert!(!ability.can_activate_with(&TagContainer::new()));
        assert!(ability.can_activate_with(&TagContainer::from_names(["State.Combo.Three"])));
        assert!(!ability.can_activate_with(&TagContainer::from_names([
            "State.Combo",
            "Cooldown.Finisher",
        ])));
    }

    #[test]
    fn test_target_optional() {
        let ability = GameplayAbility::new("Ability.Shout").target_optional();
        assert!(!ability.requires_target);
    }
}
