//! Core engine types: entities, positions, RNG, configuration.
//!
//! These are the leaf building blocks every other module depends on.

pub mod entity;
pub mod position;
pub mod rng;
pub mod config;

pub use entity::EntityId;
pub use position::Position;
pub use rng::{GameRng, GameRngState};
pub use config::{AbilitySystemConfig, ConfigError};
