//! Gameplay effect definitions.
//!
//! An effect is authored once and shared (via `Arc`) by every ability and
//! entity that uses it. It bundles:
//! - modifiers to apply to the target's attributes
//! - tags granted to the target while the effect is active
//! - tags the target must have (`required_tags`) or must not have
//!   (`blocked_tags`) for the effect to land
//! - a lifetime: instant, timed, or infinite, optionally periodic

use serde::{Deserialize, Serialize};

use crate::tags::{Tag, TagContainer};

use super::{DurationPolicy, Modifier};

/// Shortest period a periodic effect may tick at, in seconds.
pub const MIN_PERIOD: f32 = 1.0e-3;

/// Lifetime of an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationType {
    /// Modifiers apply once; nothing is retained.
    #[default]
    Instant,
    /// Active until its end time.
    HasDuration,
    /// Active until explicitly removed.
    Infinite,
}

/// An immutable effect definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameplayEffect {
    /// Identity used for stacking: re-applying an effect with the same
    /// name to a target that already has it stacks instead of adding a
    /// second instance.
    pub name: String,
    pub duration_type: DurationType,
    /// Seconds. Only read for `HasDuration`.
    pub duration: f32,
    /// Seconds between periodic re-applications. `0` disables.
    pub period: f32,
    pub max_stack: u32,
    pub modifiers: Vec<Modifier>,
    pub granted_tags: TagContainer,
    pub required_tags: TagContainer,
    pub blocked_tags: TagContainer,
    pub duration_policy: Option<DurationPolicy>,
}

impl GameplayEffect {
    fn with_lifetime(name: impl Into<String>, duration_type: DurationType, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration_type,
            duration,
            period: 0.0,
            max_stack: 1,
            modifiers: Vec::new(),
            granted_tags: TagContainer::new(),
            required_tags: TagContainer::new(),
            blocked_tags: TagContainer::new(),
            duration_policy: None,
        }
    }

    /// An effect that applies its modifiers once.
    pub fn instant(name: impl Into<String>) -> Self {
        Self::with_lifetime(name, DurationType::Instant, 0.0)
    }

    /// An effect that lasts `duration` seconds.
    pub fn timed(name: impl Into<String>, duration: f32) -> Self {
        Self::with_lifetime(name, DurationType::HasDuration, duration)
    }

    /// An effect that lasts until removed.
    pub fn infinite(name: impl Into<String>) -> Self {
        Self::with_lifetime(name, DurationType::Infinite, 0.0)
    }

    /// Add a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Re-apply modifiers every `period` seconds (builder pattern).
    /// Positive periods are raised to [`MIN_PERIOD`]; anything else disables.
    #[must_use]
    pub fn with_period(mut self, period: f32) -> Self {
        self.period = if period > 0.0 { period.max(MIN_PERIOD) } else { 0.0 };
        self
    }

    /// Allow up to `max_stack` stacks (builder pattern). Clamped to at least 1.
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    /// Grant a tag while active (builder pattern).
    #[must_use]
    pub fn grant_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.granted_tags.add_tag(tag.into());
        self
    }

    /// Require a tag on the target (builder pattern).
    #[must_use]
    pub fn require_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.required_tags.add_tag(tag.into());
        self
    }

    /// Refuse targets carrying a tag (builder pattern).
    #[must_use]
    pub fn block_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.blocked_tags.add_tag(tag.into());
        self
    }

    /// Recompute the duration from the target's attributes (builder pattern).
    #[must_use]
    pub fn with_duration_policy(mut self, policy: DurationPolicy) -> Self {
        self.duration_policy = Some(policy);
        self
    }

    /// Whether the effect is applied once and discarded.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration_type == DurationType::Instant
    }

    /// Whether the effect re-applies its modifiers on a timer.
    #[must_use]
    pub fn is_periodic(&self) -> bool {
        !self.is_instant() && self.period > 0.0
    }

    /// Stack cap, never below 1.
    #[must_use]
    pub fn stack_limit(&self) -> u32 {
        self.max_stack.max(1)
    }

    /// Whether a target with `tags` passes this effect's gate.
    #[must_use]
    pub fn can_apply_to(&self, tags: &TagContainer) -> bool {
        tags.satisfies(&self.required_tags, &self.blocked_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeId;

    #[test]
    fn test_builders() {
        let effect = GameplayEffect::timed("Buff.Rage", 5.0)
            .with_modifier(Modifier::add(AttributeId::ATTACK_DAMAGE, 5.0))
            .with_period(-1.0)
            .with_max_stack(0)
            .grant_tag("State.Buffed")
            .block_tag("State.Silenced");

        assert_eq!(effect.duration_type, DurationType::HasDuration);
        assert_eq!(effect.period, 0.0);
        assert_eq!(effect.max_stack, 1);
        assert!(!effect.is_periodic());
        assert_eq!(effect.modifiers.len(), 1);
        assert!(effect.granted_tags.has_tag_exact(&Tag::new("State.Buffed")));
    }

    #[test]
    fn test_period_floor() {
        let effect = GameplayEffect::infinite("Tick").with_period(1.0e-9);
        assert_eq!(effect.period, MIN_PERIOD);

        let effect = GameplayEffect::infinite("Tick").with_period(f32::NAN);
        assert_eq!(effect.period, 0.0);
        assert!(!effect.is_periodic());
    }

    #[test]
    fn test_instant_is_never_periodic() {
        let effect = GameplayEffect::instant("Hit").with_period(1.0);
        assert!(effect.is_instant());
        assert!(!effect.is_periodic());
    }

    #[test]
    fn test_gate() {
        let effect = GameplayEffect::instant("Execute")
            .require_tag("State.Buffed")
            .block_tag("State.Immune");

        assert!(!effect.can_apply_to(&TagContainer::new()));
        assert!(effect.can_apply_to(&TagContainer::from_names(["State.Buffed"])));
        assert!(!effect.can_apply_to(&TagContainer::from_names(["State.Buffed", "State.Immune.Magic"])));
    }

    #[test]
    fn test_stack_limit_floor() {
        let mut effect = GameplayEffect::infinite("Aura");
        effect.max_stack = 0;
        assert_eq!(effect.stack_limit(), 1);
    }

    #[test]
    fn test_serialization() {
        let effect = GameplayEffect::timed("Cooldown.BaseAttack", 1.0)
            .grant_tag("Cooldown.BaseAttack")
            .with_duration_policy(DurationPolicy::AttackSpeedScaled);

        let json = serde_json::to_string(&effect).unwrap();
        let back: GameplayEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, effect);
    }
}
