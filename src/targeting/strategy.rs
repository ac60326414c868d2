//! Targeting strategies.
//!
//! Every strategy is a pure function of `(owner, world queries, RNG)`.
//! Distances are compared squared, and ties always keep the candidate
//! that appeared first in the provider's list, so peers fed the same
//! world agree on every pick.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::attributes::AttributeId;
use crate::core::EntityId;

use super::{AttributeQuery, TargetContext, TargetData};

/// How an ability picks its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TargetingStrategy {
    /// The owner itself.
    #[default]
    SelfTarget,
    /// One enemy, chosen uniformly with the context RNG.
    Random,
    /// The closest enemy within `max_range`.
    NearestEnemy { max_range: f32 },
    /// Up to `max_targets` closest enemies within `max_range`, plus the
    /// owner's `ExtraTargetCount`, never more than the configured cap.
    NearestN { max_targets: u32, max_range: f32 },
    /// The enemy with the lowest `Health`.
    LowestHp,
    /// Every enemy within `radius`.
    Area { radius: f32 },
}

/// Parameterless name of a [`TargetingStrategy`] variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum TargetingKind {
    SelfTarget,
    Random,
    NearestEnemy,
    NearestN,
    LowestHp,
    Area,
}

impl TargetingKind {
    /// Resolve a kind by name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// The kind's stable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl TargetingStrategy {
    /// The variant's kind.
    #[must_use]
    pub fn kind(&self) -> TargetingKind {
        match self {
            TargetingStrategy::SelfTarget => TargetingKind::SelfTarget,
            TargetingStrategy::Random => TargetingKind::Random,
            TargetingStrategy::NearestEnemy { .. } => TargetingKind::NearestEnemy,
            TargetingStrategy::NearestN { .. } => TargetingKind::NearestN,
            TargetingStrategy::LowestHp => TargetingKind::LowestHp,
            TargetingStrategy::Area { .. } => TargetingKind::Area,
        }
    }

    /// The variant's stable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Resolve targets for `owner`.
    ///
    /// Never fails: anything that can't be resolved (no enemies, owner
    /// without a position) produces an empty result.
    pub fn find_targets(
        &self,
        owner: EntityId,
        attributes: &dyn AttributeQuery,
        context: &mut TargetContext<'_>,
    ) -> TargetData {
        match *self {
            TargetingStrategy::SelfTarget => Self::self_target(owner, context),
            TargetingStrategy::Random => Self::random(owner, context),
            TargetingStrategy::NearestEnemy { max_range } => {
                Self::nearest_enemy(owner, max_range, context)
            }
            TargetingStrategy::NearestN { max_targets, max_range } => {
                Self::nearest_n(owner, max_targets, max_range, attributes, context)
            }
            TargetingStrategy::LowestHp => Self::lowest_hp(owner, attributes, context),
            TargetingStrategy::Area { radius } => Self::area(owner, radius, context),
        }
    }

    fn self_target(owner: EntityId, context: &TargetContext<'_>) -> TargetData {
        let mut data = TargetData::new(owner);
        data.add_target(owner);
        match context.position(owner) {
            Some(position) => data.with_hit_location(position),
            None => data,
        }
    }

    fn random(owner: EntityId, context: &mut TargetContext<'_>) -> TargetData {
        let enemies = context.enemies(owner);
        let mut data = TargetData::new(owner);
        if enemies.is_empty() {
            return data;
        }
        let count = i32::try_from(enemies.len()).unwrap_or(i32::MAX);
        let index = context.rng().next(0, count) as usize;
        data.add_target(enemies[index]);
        data
    }

    fn nearest_enemy(owner: EntityId, max_range: f32, context: &TargetContext<'_>) -> TargetData {
        let data = TargetData::new(owner);
        let Some(origin) = context.position(owner) else {
            return data;
        };
        let range_sq = max_range * max_range;

        let mut best = None;
        let mut best_distance = f32::MAX;
        for enemy in context.enemies(owner) {
            let Some(position) = context.position(enemy) else {
                continue;
            };
            let distance = origin.distance_squared(position);
            if distance > range_sq {
                continue;
            }
            if best.is_none() || distance < best_distance {
                best = Some((enemy, position));
                best_distance = distance;
            }
        }

        match best {
            Some((enemy, position)) => {
                let mut data = data.with_hit_location(position);
                data.add_target(enemy);
                data
            }
            None => data,
        }
    }

    fn lowest_hp(
        owner: EntityId,
        attributes: &dyn AttributeQuery,
        context: &TargetContext<'_>,
    ) -> TargetData {
        let mut data = TargetData::new(owner);

        let mut best = None;
        let mut best_health = f32::MAX;
        for enemy in context.enemies(owner) {
            let Some(health) = attributes.attribute(enemy, &AttributeId::HEALTH) else {
                continue;
            };
            if best.is_none() || health < best_health {
                best = Some(enemy);
                best_health = health;
            }
        }

        if let Some(enemy) = best {
            data.add_target(enemy);
        }
        data
    }

    fn nearest_n(
        owner: EntityId,
        max_targets: u32,
        max_range: f32,
        attributes: &dyn AttributeQuery,
        context: &TargetContext<'_>,
    ) -> TargetData {
        let mut data = TargetData::new(owner);
        let Some(origin) = context.position(owner) else {
            return data;
        };
        let range_sq = max_range * max_range;

        let mut candidates: Vec<(EntityId, f32)> = context
            .enemies(owner)
            .into_iter()
            .filter_map(|enemy| {
                let distance = origin.distance_squared(context.position(enemy)?);
                (distance <= range_sq).then_some((enemy, distance))
            })
            .collect();

        // Bonus targets are whole units; the attribute is truncated toward zero.
        let extra = attributes
            .attribute(owner, &AttributeId::EXTRA_TARGET_COUNT)
            .unwrap_or(0.0) as i64;
        let cap = i64::from(context.max_nearest_targets());
        let wanted = (i64::from(max_targets) + extra).clamp(0, cap) as usize;
        let count = wanted.min(candidates.len());

        // Partial selection sort: only the first `count` slots are ordered.
        for i in 0..count {
            let mut nearest = i;
            for j in (i + 1)..candidates.len() {
                if candidates[j].1 < candidates[nearest].1 {
                    nearest = j;
                }
            }
            candidates.swap(i, nearest);
            data.add_target(candidates[i].0);
        }

        data
    }

    fn area(owner: EntityId, radius: f32, context: &TargetContext<'_>) -> TargetData {
        let data = TargetData::new(owner);
        let Some(origin) = context.position(owner) else {
            return data;
        };
        let radius_sq = radius * radius;

        let mut data = data.with_hit_location(origin);
        for enemy in context.enemies(owner) {
            let in_range = context
                .position(enemy)
                .is_some_and(|position| origin.distance_squared(position) <= radius_sq);
            if in_range {
                data.add_target(enemy);
            }
        }
        data
    }
}
