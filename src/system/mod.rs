//! Orchestration: per-entity components and the world that owns them.
//!
//! ## Key Types
//!
//! - `AbilitySystemComponent`: attributes, tags, granted abilities and
//!   active effects of one entity, plus its clock
//! - `AbilityWorld`: `EntityId`-ordered registry with the cross-entity
//!   entry points (activation, effect application, `advance`)
//! - `ApplyOutcome`: what happened when an effect met a target
//! - `ActivationError`: why an ability did not activate
//! - `AbilitySystemSnapshot`: serializable view of a component

mod component;
mod error;
mod snapshot;
mod world;

pub use component::{AbilitySystemComponent, ApplyOutcome};
pub use error::ActivationError;
pub use snapshot::{AbilitySnapshot, AbilitySystemSnapshot, ActiveEffectSnapshot};
pub use world::AbilityWorld;
