//! Duration policies.
//!
//! A policy recomputes an effect's raw duration from the attributes of
//! the entity the effect lands on, right before its end time is fixed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::attributes::{AttributeId, AttributeSet};
use crate::core::AbilitySystemConfig;

/// Built-in duration policies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum DurationPolicy {
    /// Divide by the owner's `AttackSpeed`, clamped to the configured bounds.
    ///
    /// Owners without an `AttackSpeed` attribute keep the raw duration.
    AttackSpeedScaled,
}

impl DurationPolicy {
    /// Resolve a policy by name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// The policy's stable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Compute the effective duration for `owner`.
    #[must_use]
    pub fn calculate_duration(
        self,
        owner: &AttributeSet,
        duration: f32,
        config: &AbilitySystemConfig,
    ) -> f32 {
        match self {
            DurationPolicy::AttackSpeedScaled => {
                if !owner.contains(&AttributeId::ATTACK_SPEED) {
                    return duration;
                }
                // Unvalidated bounds must not panic: max/min skip NaN.
                let speed = owner
                    .get(&AttributeId::ATTACK_SPEED)
                    .max(config.attack_speed_min)
                    .min(config.attack_speed_max);
                if !(speed.is_finite() && speed > 0.0) {
                    return duration;
                }
                duration / speed
            }
        }
    }
}
