//! Runtime instances of timed and infinite effects.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use crate::attributes::AttributeSet;
use crate::core::EntityId;

use super::{Contribution, GameplayEffect};

/// Handle of an active effect, unique within its owning component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActiveEffectHandle(pub u32);

impl ActiveEffectHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActiveEffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActiveEffect({})", self.0)
    }
}

/// An effect currently applied to an entity.
///
/// Lifecycle: `Applied -> Active (0..n periodic ticks) -> Expired`.
/// Infinite effects only leave `Active` through explicit removal.
#[derive(Clone, Debug)]
pub struct ActiveEffect {
    pub(crate) handle: ActiveEffectHandle,
    pub(crate) effect: Arc<GameplayEffect>,
    pub(crate) source: Option<EntityId>,
    /// Source attributes captured at application; calculators on periodic
    /// ticks read from here.
    pub(crate) source_attributes: AttributeSet,
    pub(crate) start_time: f64,
    pub(crate) end_time: Option<f64>,
    pub(crate) stack_count: u32,
    pub(crate) period_accumulator: f32,
    pub(crate) contributions: SmallVec<[Contribution; 4]>,
}

impl ActiveEffect {
    pub(crate) fn new(
        handle: ActiveEffectHandle,
        effect: Arc<GameplayEffect>,
        source: Option<EntityId>,
        source_attributes: AttributeSet,
        start_time: f64,
        end_time: Option<f64>,
    ) -> Self {
        Self {
            handle,
            effect,
            source,
            source_attributes,
            start_time,
            end_time,
            stack_count: 1,
            period_accumulator: 0.0,
            contributions: SmallVec::new(),
        }
    }

    /// This instance's handle.
    #[must_use]
    pub fn handle(&self) -> ActiveEffectHandle {
        self.handle
    }

    /// The effect definition.
    #[must_use]
    pub fn effect(&self) -> &Arc<GameplayEffect> {
        &self.effect
    }

    /// The entity that applied the effect, if known.
    #[must_use]
    pub fn source(&self) -> Option<EntityId> {
        self.source
    }

    /// Simulation time at which the effect was applied.
    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Simulation time at which the effect expires; `None` for infinite.
    #[must_use]
    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    /// Current stack count (at least 1).
    #[must_use]
    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    /// Seconds left before expiry; `None` for infinite.
    #[must_use]
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.end_time.map(|end| (end - now).max(0.0))
    }

    /// Whether the effect's end time has been reached.
    #[must_use]
    pub fn is_expired(&self, now: f64) -> bool {
        self.end_time.is_some_and(|end| now >= end)
    }

    /// Whether this instance was created from `effect`.
    #[must_use]
    pub fn is_instance_of(&self, effect: &Arc<GameplayEffect>) -> bool {
        Arc::ptr_eq(&self.effect, effect)
            || (!effect.name.is_empty() && self.effect.name == effect.name)
    }

    /// Additive changes that will be undone on removal.
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub(crate) fn track(&mut self, contribution: Contribution) {
        if contribution.delta != 0.0 {
            self.contributions.push(contribution);
        }
    }
}
