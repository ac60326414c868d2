//! Ability activation integration tests.
//!
//! These drive `AbilityWorld` end to end: gating, targeting, costs,
//! cooldowns, the ability-dirty flag and lockstep determinism.

mod common;

use std::sync::Arc;

use common::{base_attack, init_tracing, Arena};
use rust_gas::abilities::GameplayAbility;
use rust_gas::attributes::AttributeId;
use rust_gas::core::{AbilitySystemConfig, ConfigError, EntityId, GameRng};
use rust_gas::effects::{GameplayEffect, Modifier};
use rust_gas::system::{AbilitySystemSnapshot, AbilityWorld, ActivationError};
use rust_gas::targeting::{TargetContext, TargetingStrategy};

fn health(world: &AbilityWorld, id: EntityId) -> f32 {
    world.component(id).unwrap().attribute(&AttributeId::HEALTH)
}

// =============================================================================
// End to End
// =============================================================================

#[test]
fn test_base_attack_end_to_end() {
    init_tracing();
    let mut world = AbilityWorld::new(AbilitySystemConfig::default());
    let hero = world.spawn();
    let goblin = world.spawn();

    let asc = world.component_mut(hero).unwrap();
    asc.set_attribute(&AttributeId::ATTACK_DAMAGE, 15.0, 0.0, 0.0);
    let handle = asc.give_ability(Arc::new(base_attack(5.0)), 1);
    world
        .component_mut(goblin)
        .unwrap()
        .set_attribute(&AttributeId::HEALTH, 30.0, 0.0, 30.0);

    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    arena.place(goblin, 1, 3.0, 4.0);
    let mut ctx = world.target_context(&arena);

    let targets = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap();
    assert_eq!(targets.targets(), &[goblin]);
    assert_eq!(targets.source(), Some(hero));
    assert_eq!(health(&world, goblin), 15.0);
    assert_eq!(world.component(hero).unwrap().spec(handle).unwrap().active_count(), 1);
}

#[test]
fn test_activation_without_applying_effects() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let goblin = world.spawn();
    let handle = world
        .component_mut(hero)
        .unwrap()
        .give_ability(Arc::new(base_attack(5.0)), 1);
    world
        .component_mut(goblin)
        .unwrap()
        .set_attribute(&AttributeId::HEALTH, 30.0, 0.0, 30.0);

    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    arena.place(goblin, 1, 1.0, 0.0);
    let mut ctx = world.target_context(&arena);

    let targets = world.try_activate_ability(hero, handle, &mut ctx, false).unwrap();
    assert_eq!(health(&world, goblin), 30.0);

    // The caller applies later, e.g. when an animation lands.
    let ability = Arc::clone(world.component(hero).unwrap().spec(handle).unwrap().ability());
    world.apply_effects_to_targets(hero, &ability.applied_effects, &targets);
    assert_eq!(health(&world, goblin), 30.0);

    world
        .component_mut(hero)
        .unwrap()
        .set_attribute(&AttributeId::ATTACK_DAMAGE, 4.0, 0.0, 0.0);
    world.apply_effects_to_targets(hero, &ability.applied_effects, &targets);
    assert_eq!(health(&world, goblin), 26.0);
}

#[test]
fn test_out_of_range_fails_without_mutation() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let goblin = world.spawn();
    let handle = world
        .component_mut(hero)
        .unwrap()
        .give_ability(Arc::new(base_attack(2.0)), 1);

    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    arena.place(goblin, 1, 10.0, 0.0);
    let mut ctx = world.target_context(&arena);

    let before: AbilitySystemSnapshot = world.snapshot(hero).unwrap();
    let err = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap_err();
    assert!(matches!(err, ActivationError::NoTargets { .. }));
    assert_eq!(world.snapshot(hero).unwrap(), before);
}

#[test]
fn test_target_optional_ability_succeeds_empty() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let shout = GameplayAbility::new("Ability.Shout")
        .with_targeting(TargetingStrategy::Area { radius: 3.0 })
        .target_optional();
    let handle = world.component_mut(hero).unwrap().give_ability(Arc::new(shout), 1);

    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    let mut ctx = world.target_context(&arena);

    let targets = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap();
    assert!(targets.is_empty());
}

// =============================================================================
// Gating, Costs & Cooldowns
// =============================================================================

#[test]
fn test_gating_by_owner_tags() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let ability = GameplayAbility::new("Ability.Finisher")
        .require_tag("State.Combo")
        .block_tag("State.Debuff.Stun");
    let handle = world.component_mut(hero).unwrap().give_ability(Arc::new(ability), 1);

    let arena = Arena::new();
    let mut ctx = world.target_context(&arena);

    let err = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap_err();
    assert!(matches!(err, ActivationError::MissingRequiredTags { .. }));

    world.component_mut(hero).unwrap().add_loose_tag("State.Combo.Two");
    assert!(world.try_activate_ability(hero, handle, &mut ctx, true).is_ok());

    world.component_mut(hero).unwrap().add_loose_tag("State.Debuff.Stun");
    let err = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap_err();
    assert!(matches!(err, ActivationError::Blocked { .. }));
}

#[test]
fn test_costs_and_cooldown_drive_dirty_flag() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();

    let mana_cost = GameplayEffect::instant("Cost.Fireball")
        .with_modifier(Modifier::add(AttributeId::MANA, -10.0));
    let cooldown = GameplayEffect::timed("Cooldown.Fireball", 1.5).grant_tag("Cooldown.Fireball");
    let fireball = GameplayAbility::new("Ability.Fireball")
        .with_cost(Arc::new(mana_cost))
        .with_cooldown(Arc::new(cooldown))
        .block_tag("Cooldown.Fireball");

    let asc = world.component_mut(hero).unwrap();
    asc.set_attribute(&AttributeId::MANA, 30.0, 0.0, 30.0);
    let handle = asc.give_ability(Arc::new(fireball), 1);
    assert!(asc.consume_ability_dirty());

    let arena = Arena::new();
    let mut ctx = world.target_context(&arena);

    world.try_activate_ability(hero, handle, &mut ctx, true).unwrap();
    let asc = world.component_mut(hero).unwrap();
    assert_eq!(asc.attribute(&AttributeId::MANA), 20.0);
    assert!(!asc.can_activate_ability(handle));
    assert!(asc.consume_ability_dirty());
    assert!(!asc.consume_ability_dirty());

    world.advance(1.0);
    assert!(!world.component_mut(hero).unwrap().consume_ability_dirty());

    world.advance(0.5);
    let asc = world.component_mut(hero).unwrap();
    assert!(asc.consume_ability_dirty());
    assert!(asc.can_activate_ability(handle));

    asc.end_ability(handle);
    assert_eq!(asc.spec(handle).unwrap().active_count(), 0);
}

#[test]
fn test_find_and_revoke_by_tag() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let asc = world.component_mut(hero).unwrap();
    asc.give_ability(Arc::new(base_attack(5.0)), 3);

    let handle = asc
        .find_spec_by_tag(&"Ability.BaseAttack".into())
        .map(|spec| spec.handle())
        .unwrap();
    assert_eq!(asc.spec(handle).unwrap().level(), 3);

    assert!(asc.revoke_ability(handle));
    assert!(asc.find_spec_by_tag(&"Ability.BaseAttack".into()).is_none());

    let arena = Arena::new();
    let mut ctx = world.target_context(&arena);
    let err = world.try_activate_ability(hero, handle, &mut ctx, true).unwrap_err();
    assert!(matches!(err, ActivationError::UnknownAbility { .. }));
}

// =============================================================================
// Targeting Through the World
// =============================================================================

#[test]
fn test_nearest_n_count_formula() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);

    // Eight enemies, spawned farthest first.
    let enemies: Vec<EntityId> = (0..8)
        .map(|i| {
            let id = world.spawn();
            arena.place(id, 1, 8.0 - i as f32, 0.0);
            id
        })
        .collect();

    let volley = GameplayAbility::new("Ability.Volley").with_targeting(TargetingStrategy::NearestN {
        max_targets: 2,
        max_range: 100.0,
    });
    let asc = world.component_mut(hero).unwrap();
    asc.set_attribute(&AttributeId::EXTRA_TARGET_COUNT, 3.0, 0.0, 0.0);
    let handle = asc.give_ability(Arc::new(volley), 1);

    let mut ctx = world.target_context(&arena);
    let targets = world.try_activate_ability(hero, handle, &mut ctx, false).unwrap();

    let expected: Vec<EntityId> = enemies.iter().rev().take(5).copied().collect();
    assert_eq!(targets.targets(), expected.as_slice());
}

#[test]
fn test_nearest_n_cap_from_config() {
    let config = AbilitySystemConfig::default().with_max_nearest_targets(3);
    let mut world = AbilityWorld::try_new(config).unwrap();
    let hero = world.spawn();
    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    for i in 0..6 {
        let id = world.spawn();
        arena.place(id, 1, 1.0 + i as f32, 0.0);
    }

    let volley = GameplayAbility::new("Ability.Volley").with_targeting(TargetingStrategy::NearestN {
        max_targets: 6,
        max_range: 100.0,
    });
    let handle = world.component_mut(hero).unwrap().give_ability(Arc::new(volley), 1);

    let mut ctx = world.target_context(&arena);
    let targets = world.try_activate_ability(hero, handle, &mut ctx, false).unwrap();
    assert_eq!(targets.len(), 3);
}

#[test]
fn test_lowest_hp_reads_world_attributes() {
    let mut world = AbilityWorld::default();
    let hero = world.spawn();
    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);

    let mut weakest = hero;
    for hp in [40.0, 12.0, 25.0, 12.0] {
        let id = world.spawn();
        arena.place(id, 1, 1.0, 0.0);
        world
            .component_mut(id)
            .unwrap()
            .set_attribute(&AttributeId::HEALTH, hp, 0.0, 100.0);
        if hp == 12.0 && weakest == hero {
            weakest = id;
        }
    }

    let execute = GameplayAbility::new("Ability.Execute").with_targeting(TargetingStrategy::LowestHp);
    let handle = world.component_mut(hero).unwrap().give_ability(Arc::new(execute), 1);

    let mut ctx = world.target_context(&arena);
    let targets = world.try_activate_ability(hero, handle, &mut ctx, false).unwrap();
    assert_eq!(targets.targets(), &[weakest]);
}

// =============================================================================
// Determinism
// =============================================================================

fn random_picks(seed: u64) -> Vec<EntityId> {
    let mut world = AbilityWorld::new(AbilitySystemConfig::default().with_rng_seed(seed));
    let hero = world.spawn();
    let mut arena = Arena::new();
    arena.place(hero, 0, 0.0, 0.0);
    for i in 0..6 {
        let id = world.spawn();
        arena.place(id, 1, i as f32, 1.0);
    }

    let chaos = GameplayAbility::new("Ability.Chaos").with_targeting(TargetingStrategy::Random);
    let handle = world.component_mut(hero).unwrap().give_ability(Arc::new(chaos), 1);

    let mut ctx = world.target_context(&arena);
    (0..16)
        .map(|_| {
            let targets = world.try_activate_ability(hero, handle, &mut ctx, false).unwrap();
            targets.targets()[0]
        })
        .collect()
}

#[test]
fn test_random_targeting_is_deterministic() {
    let first = random_picks(1234);
    let second = random_picks(1234);
    assert_eq!(first, second);
    assert!(first.iter().all(|id| id.raw() >= 1 && id.raw() <= 6));
}

#[test]
fn test_forked_streams_replay() {
    let arena = {
        let mut arena = Arena::new();
        arena.place(EntityId(0), 0, 0.0, 0.0);
        for i in 1..=4 {
            arena.place(EntityId(i), 1, i as f32, 0.0);
        }
        arena
    };

    let picks = |rng: GameRng| {
        let mut ctx = TargetContext::new(&arena, rng);
        (0..8)
            .map(|_| {
                TargetingStrategy::Random
                    .find_targets(EntityId(0), &AbilityWorld::default(), &mut ctx)
                    .targets()[0]
            })
            .collect::<Vec<_>>()
    };

    let mut host = GameRng::new(99);
    let mut client = GameRng::new(99);
    assert_eq!(picks(host.fork()), picks(client.fork()));
}

/// Two independently simulated worlds stay bit-identical.
#[test]
fn test_lockstep_worlds_match() {
    init_tracing();

    fn simulate() -> Vec<AbilitySystemSnapshot> {
        let mut world = AbilityWorld::new(AbilitySystemConfig::default().with_rng_seed(7));
        let hero = world.spawn();
        let mut arena = Arena::new();
        arena.place(hero, 0, 0.0, 0.0);
        for i in 0..4 {
            let id = world.spawn();
            arena.place(id, 1, 1.0 + i as f32, 0.0);
            world
                .component_mut(id)
                .unwrap()
                .set_attribute(&AttributeId::HEALTH, 100.0, 0.0, 100.0);
        }

        let bleed = GameplayEffect::timed("Bleed", 2.0)
            .with_period(0.25)
            .with_max_stack(3)
            .with_modifier(Modifier::add(AttributeId::HEALTH, -1.5));
        let strike = GameplayAbility::new("Ability.Strike")
            .with_targeting(TargetingStrategy::Random)
            .with_applied_effect(Arc::new(bleed));

        let asc = world.component_mut(hero).unwrap();
        asc.set_attribute(&AttributeId::ATTACK_DAMAGE, 10.0, 0.0, 0.0);
        let handle = asc.give_ability(Arc::new(strike), 1);

        let mut ctx = world.target_context(&arena);
        for tick in 0..40 {
            if tick % 3 == 0 {
                world.try_activate_ability(hero, handle, &mut ctx, true).unwrap();
            }
            world.advance(0.1);
        }
        world.snapshots()
    }

    assert_eq!(simulate(), simulate());
}

#[test]
fn test_try_new_validates_config() {
    let bad = AbilitySystemConfig::default().with_max_nearest_targets(0);
    assert_eq!(
        AbilityWorld::try_new(bad).map(|_| ()),
        Err(ConfigError::NoNearestTargets)
    );
    assert!(AbilityWorld::try_new(AbilitySystemConfig::default()).is_ok());
}
