//! # rust-gas
//!
//! A deterministic gameplay ability system for lockstep simulations.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Fixed ticks plus a fixed RNG stream give
//!    bit-identical attribute and tag state on every peer. No wall clock,
//!    no hash-order leaks into behaviour.
//!
//! 2. **Data-Driven**: Abilities and effects are immutable values shared
//!    through `Arc`. Calculators, duration policies and targeting
//!    strategies are enums with stable names.
//!
//! 3. **Never Abort the Tick**: Bad data degrades to a no-op. Gating
//!    failures are silent; activation failures come back as a typed
//!    `ActivationError`.
//!
//! ## Architecture
//!
//! - **Per-Entity Components**: each `AbilitySystemComponent` owns its
//!   attributes, tags, granted abilities and active effects, and is the
//!   only thing that mutates them.
//!
//! - **Persistent Snapshots**: attribute sets are `im` maps, so a source's
//!   attributes are captured in O(1) whenever it applies an effect.
//!
//! - **Ordered World**: `AbilityWorld` keeps components in a `BTreeMap`
//!   and advances them in ascending `EntityId` order.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, positions, RNG, configuration
//! - `tags`: Hierarchical tags and tag containers
//! - `attributes`: Clamped attribute storage
//! - `effects`: Modifiers, calculators, duration policies, effects
//! - `targeting`: World queries and the six targeting strategies
//! - `abilities`: Ability definitions and granted specs
//! - `system`: Components, world, snapshots

pub mod core;
pub mod tags;
pub mod attributes;
pub mod effects;
pub mod targeting;
pub mod abilities;
pub mod system;

// Re-export commonly used types
pub use crate::core::{
    AbilitySystemConfig, ConfigError,
    EntityId, Position,
    GameRng, GameRngState,
};

pub use crate::tags::{Tag, TagContainer};

pub use crate::attributes::{AttributeId, AttributeSet, AttributeValue};

pub use crate::effects::{
    ActiveEffect, ActiveEffectHandle,
    CalculatorType, DurationPolicy, DurationType,
    GameplayEffect, Modifier, ModifierOp, ValueMode,
};

pub use crate::targeting::{
    AttributeQuery, TargetContext, TargetData, TargetProvider,
    TargetingKind, TargetingStrategy,
};

pub use crate::abilities::{AbilitySpec, AbilitySpecHandle, GameplayAbility};

pub use crate::system::{
    AbilitySystemComponent, AbilitySystemSnapshot, AbilityWorld,
    ActivationError, ApplyOutcome,
};
