//! Target resolution.
//!
//! - `TargetProvider`: host-supplied enemy/ally lists and positions
//! - `AttributeQuery`: read access to other entities' attributes
//! - `TargetContext`: provider + RNG, reused across ticks
//! - `TargetingStrategy`: the six built-in selection rules
//! - `TargetData`: ordered, de-duplicated result of one search

mod context;
mod data;
mod strategy;

pub use context::{AttributeQuery, TargetContext, TargetProvider};
pub use data::TargetData;
pub use strategy::{TargetingKind, TargetingStrategy};
