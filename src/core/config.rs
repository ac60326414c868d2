//! Engine-wide tunables.
//!
//! Authoring data (abilities, effects, modifiers) is converted into value
//! objects before it reaches the engine. The handful of numbers that
//! govern the engine itself live here so hosts can load them alongside
//! the rest of their settings:
//!
//! - `max_nearest_targets`: hard cap on multi-target nearest selection
//! - `attack_speed_min` / `attack_speed_max`: bounds applied to
//!   `AttackSpeed` before it scales a duration
//! - `rng_seed`: seed for the world's targeting stream
//!
//! ```
//! use rust_gas::core::AbilitySystemConfig;
//!
//! let config = AbilitySystemConfig::default().with_rng_seed(7);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.max_nearest_targets, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default hard cap on targets picked by nearest-N selection.
pub const DEFAULT_MAX_NEAREST_TARGETS: u32 = 10;

/// Default lower bound for `AttackSpeed` when it scales a duration.
pub const DEFAULT_ATTACK_SPEED_MIN: f32 = 0.1;

/// Default upper bound for `AttackSpeed` when it scales a duration.
pub const DEFAULT_ATTACK_SPEED_MAX: f32 = 10.0;

/// Errors raised when validating an [`AbilitySystemConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Nearest-N selection would never pick anything.
    #[error("max_nearest_targets must be at least 1")]
    NoNearestTargets,

    /// The attack speed bounds are unusable.
    #[error("invalid attack speed bounds [{min}, {max}]")]
    InvalidAttackSpeedBounds { min: f32, max: f32 },
}

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilitySystemConfig {
    /// Hard cap on targets picked by nearest-N selection.
    pub max_nearest_targets: u32,

    /// Lower bound for `AttackSpeed` in duration scaling.
    pub attack_speed_min: f32,

    /// Upper bound for `AttackSpeed` in duration scaling.
    pub attack_speed_max: f32,

    /// Seed for the world's targeting RNG stream.
    pub rng_seed: u64,
}

impl AbilitySystemConfig {
    /// Set the nearest-N target cap.
    #[must_use]
    pub fn with_max_nearest_targets(mut self, cap: u32) -> Self {
        self.max_nearest_targets = cap;
        self
    }

    /// Set the attack speed bounds.
    #[must_use]
    pub fn with_attack_speed_bounds(mut self, min: f32, max: f32) -> Self {
        self.attack_speed_min = min;
        self.attack_speed_max = max;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nearest_targets == 0 {
            return Err(ConfigError::NoNearestTargets);
        }

        let (min, max) = (self.attack_speed_min, self.attack_speed_max);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidAttackSpeedBounds { min, max });
        }

        Ok(())
    }
}

impl Default for AbilitySystemConfig {
    fn default() -> Self {
        Self {
            max_nearest_targets: DEFAULT_MAX_NEAREST_TARGETS,
            attack_speed_min: DEFAULT_ATTACK_SPEED_MIN,
            attack_speed_max: DEFAULT_ATTACK_SPEED_MAX,
            rng_seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AbilitySystemConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.attack_speed_min, 0.1);
        assert_eq!(config.attack_speed_max, 10.0);
    }

    #[test]
    fn test_zero_target_cap_rejected() {
        let config = AbilitySystemConfig::default().with_max_nearest_targets(0);
        assert_eq!(config.validate(), Err(ConfigError::NoNearestTargets));
    }

    #[test]
    fn test_bad_attack_speed_bounds_rejected() {
        let inverted = AbilitySystemConfig::default().with_attack_speed_bounds(5.0, 1.0);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidAttackSpeedBounds { .. })
        ));

        let zero = AbilitySystemConfig::default().with_attack_speed_bounds(0.0, 1.0);
        assert!(zero.validate().is_err());

        let nan = AbilitySystemConfig::default().with_attack_speed_bounds(f32::NAN, 1.0);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AbilitySystemConfig = serde_json::from_str(r#"{ "rng_seed": 99 }"#).unwrap();
        assert_eq!(config.rng_seed, 99);
        assert_eq!(config.max_nearest_targets, DEFAULT_MAX_NEAREST_TARGETS);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::NoNearestTargets.to_string(),
            "max_nearest_targets must be at least 1"
        );
    }
}
