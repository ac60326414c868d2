//! Effect system.
//!
//! Effects are the only way abilities change the world:
//! - `Modifier`: one attribute mutation (static formula or calculator)
//! - `CalculatorType`: built-in calculators, addressable by name
//! - `DurationPolicy`: recomputes a raw duration from the target
//! - `GameplayEffect`: immutable bundle of modifiers, tags and lifetime
//! - `ActiveEffect`: a timed or infinite effect living on an entity
//!
//! ## Revert rules
//!
//! When a timed or infinite, non-periodic effect ends, the additive
//! changes it made (`Add`, `AddPercent`) are undone so buffs leave no
//! residue. `Multiply` and `Override` are never undone: they express a
//! recomputed baseline. Periodic executions are permanent, so a
//! damage-over-time effect doesn't heal its target back when it ends.

mod active;
mod calculator;
mod duration;
mod effect;
mod modifier;

pub use active::{ActiveEffect, ActiveEffectHandle};
pub use calculator::{
    CalculatorType, DamageBySourceAttackDamage, FullHeal, HealByTargetMaxHealth,
    ModifierCalculator,
};
pub use duration::DurationPolicy;
pub use effect::{DurationType, GameplayEffect, MIN_PERIOD};
pub use modifier::{Contribution, Modifier, ModifierOp, ValueMode};
