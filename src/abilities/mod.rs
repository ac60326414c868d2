//! Ability system: definitions and per-owner specs.
//!
//! ## Key Types
//!
//! - `GameplayAbility`: immutable ability definition
//! - `AbilitySpec`: runtime instance of a granted ability (handle, level,
//!   active activation count)
//! - `AbilitySpecHandle`: stable identifier for a spec within its owner

pub mod ability;
pub mod spec;

pub use ability::GameplayAbility;
pub use spec::{AbilitySpec, AbilitySpecHandle};
