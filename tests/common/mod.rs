//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_gas::abilities::GameplayAbility;
use rust_gas::attributes::AttributeId;
use rust_gas::core::{EntityId, Position};
use rust_gas::effects::{CalculatorType, GameplayEffect, Modifier};
use rust_gas::targeting::{TargetProvider, TargetingStrategy};

/// Route engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Entities split into teams on a plane. Everyone on another team is an
/// enemy; lists come back in ascending id order.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    members: BTreeMap<EntityId, (u8, Position)>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, entity: EntityId, team: u8, x: f32, z: f32) {
        self.members.insert(entity, (team, Position::planar(x, z)));
    }

    fn team(&self, entity: EntityId) -> Option<u8> {
        self.members.get(&entity).map(|(team, _)| *team)
    }
}

impl TargetProvider for &Arena {
    fn enemies(&self, owner: EntityId) -> Vec<EntityId> {
        let team = self.team(owner);
        self.members
            .iter()
            .filter(|(id, (t, _))| **id != owner && Some(*t) != team)
            .map(|(id, _)| *id)
            .collect()
    }

    fn allies(&self, owner: EntityId) -> Vec<EntityId> {
        let team = self.team(owner);
        self.members
            .iter()
            .filter(|(id, (t, _))| **id != owner && Some(*t) == team)
            .map(|(id, _)| *id)
            .collect()
    }

    fn position(&self, entity: EntityId) -> Option<Position> {
        self.members.get(&entity).map(|(_, position)| *position)
    }
}

/// Instant damage equal to the source's `AttackDamage`.
pub fn attack_damage_effect() -> Arc<GameplayEffect> {
    Arc::new(
        GameplayEffect::instant("BaseAttack.Damage").with_modifier(Modifier::calculated(
            AttributeId::HEALTH,
            CalculatorType::DamageBySourceAttackDamage,
        )),
    )
}

/// `Ability.BaseAttack`: nearest enemy in `range`, calculator damage.
pub fn base_attack(range: f32) -> GameplayAbility {
    GameplayAbility::new("Ability.BaseAttack")
        .with_name("Base Attack")
        .with_targeting(TargetingStrategy::NearestEnemy { max_range: range })
        .with_applied_effect(attack_damage_effect())
}
