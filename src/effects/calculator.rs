//! Calculators for `Calculated` modifiers.
//!
//! A calculator reads both participants' attributes and performs its own
//! sequence of reads and writes on the target. They are selected by
//! [`CalculatorType`], which doubles as the name table used when effects
//! are authored outside the engine:
//!
//! ```
//! use rust_gas::effects::CalculatorType;
//!
//! let calc = CalculatorType::from_name("DamageBySourceAttackDamage").unwrap();
//! assert_eq!(calc.name(), "DamageBySourceAttackDamage");
//! assert!(CalculatorType::from_name("Teleport").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::attributes::{AttributeId, AttributeSet};

/// Custom modifier logic.
///
/// `source` is a read-only snapshot of the instigator's attributes.
/// Implementations write only to `target`.
pub trait ModifierCalculator: Send + Sync {
    fn execute(&self, source: &AttributeSet, target: &mut AttributeSet);
}

/// Heals the target by its own `MaxHealth`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HealByTargetMaxHealth;

impl ModifierCalculator for HealByTargetMaxHealth {
    fn execute(&self, _source: &AttributeSet, target: &mut AttributeSet) {
        let amount = target.get(&AttributeId::MAX_HEALTH);
        target.add(&AttributeId::HEALTH, amount);
    }
}

/// Sets the target's `Health` to its `MaxHealth`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullHeal;

impl ModifierCalculator for FullHeal {
    fn execute(&self, _source: &AttributeSet, target: &mut AttributeSet) {
        let max = target.get(&AttributeId::MAX_HEALTH);
        target.set(&AttributeId::HEALTH, max);
    }
}

/// Deals the source's `AttackDamage` to the target's `Health`.
///
/// Does nothing when the source has no positive attack damage.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageBySourceAttackDamage;

impl ModifierCalculator for DamageBySourceAttackDamage {
    fn execute(&self, source: &AttributeSet, target: &mut AttributeSet) {
        let damage = source.get(&AttributeId::ATTACK_DAMAGE);
        if damage <= 0.0 {
            return;
        }
        target.add(&AttributeId::HEALTH, -damage);
    }
}

static HEAL_BY_TARGET_MAX_HEALTH: HealByTargetMaxHealth = HealByTargetMaxHealth;
static FULL_HEAL: FullHeal = FullHeal;
static DAMAGE_BY_SOURCE_ATTACK_DAMAGE: DamageBySourceAttackDamage = DamageBySourceAttackDamage;

/// Stable identifier of a built-in calculator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum CalculatorType {
    HealByTargetMaxHealth,
    FullHeal,
    DamageBySourceAttackDamage,
}

impl CalculatorType {
    /// Resolve a calculator by name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// The calculator's stable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The shared calculator instance for this type.
    #[must_use]
    pub fn calculator(self) -> &'static dyn ModifierCalculator {
        match self {
            CalculatorType::HealByTargetMaxHealth => &HEAL_BY_TARGET_MAX_HEALTH,
            CalculatorType::FullHeal => &FULL_HEAL,
            CalculatorType::DamageBySourceAttackDamage => &DAMAGE_BY_SOURCE_ATTACK_DAMAGE,
        }
    }

    /// Run the calculator.
    pub fn execute(self, source: &AttributeSet, target: &mut AttributeSet) {
        self.calculator().execute(source, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn unit(health: f32, max_health: f32, attack: f32) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs.set_attribute(&AttributeId::HEALTH, health, 0.0, max_health);
        attrs.set_attribute(&AttributeId::MAX_HEALTH, max_health, 0.0, 0.0);
        attrs.set_attribute(&AttributeId::ATTACK_DAMAGE, attack, 0.0, 0.0);
        attrs
    }

    #[test]
    fn test_name_table_roundtrip() {
        for calc in CalculatorType::iter() {
            assert_eq!(CalculatorType::from_name(calc.name()), Some(calc));
        }
        assert_eq!(CalculatorType::from_name(""), None);
        assert_eq!(CalculatorType::from_name("fullheal"), None);
    }

    #[test]
    fn test_damage_by_source_attack_damage() {
        let source = unit(10.0, 10.0, 15.0);
        let mut target = unit(30.0, 30.0, 0.0);

        CalculatorType::DamageBySourceAttackDamage.execute(&source, &mut target);
        assert_eq!(target.get(&AttributeId::HEALTH), 15.0);
    }

    #[test]
    fn test_damage_skipped_without_attack() {
        let source = unit(10.0, 10.0, 0.0);
        let mut target = unit(30.0, 30.0, 0.0);

        CalculatorType::DamageBySourceAttackDamage.execute(&source, &mut target);
        assert_eq!(target.get(&AttributeId::HEALTH), 30.0);
    }

    #[test]
    fn test_full_heal() {
        let source = AttributeSet::new();
        let mut target = unit(4.0, 40.0, 0.0);

        CalculatorType::FullHeal.execute(&source, &mut target);
        assert_eq!(target.get(&AttributeId::HEALTH), 40.0);
    }

    #[test]
    fn test_heal_by_max_health_clamps() {
        let source = AttributeSet::new();
        let mut target = unit(10.0, 25.0, 0.0);

        CalculatorType::HealByTargetMaxHealth.execute(&source, &mut target);
        assert_eq!(target.get(&AttributeId::HEALTH), 25.0);
    }
}
