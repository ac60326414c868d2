//! Clamped numeric attribute storage.
//!
//! Every attribute has a base value, a current value and bounds. Writes
//! always go through [`AttributeValue::clamp`]:
//!
//! - if `max > 0` and the value exceeds it, the value becomes `max`
//! - otherwise, if the value is below `min`, it becomes `min`
//!
//! A `max` of zero or less means "no upper bound".
//!
//! Reads of attributes that were never set return `0.0`; nothing here
//! fails. The backing map is an `im::OrdMap`, which gives deterministic
//! name-ordered iteration and O(1) clones for source snapshots.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::AttributeId;

/// A single clamped attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub base: f32,
    pub current: f32,
    pub min: f32,
    pub max: f32,
}

impl AttributeValue {
    /// Create an attribute whose current value starts at `base`.
    #[must_use]
    pub fn new(base: f32, min: f32, max: f32) -> Self {
        let mut value = Self {
            base,
            current: base,
            min,
            max,
        };
        value.current = value.clamp(base);
        value
    }

    /// Clamp a candidate current value into this attribute's bounds.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        if self.max > 0.0 && value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}

/// Named attributes owned by one entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    values: OrdMap<AttributeId, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or reset an attribute. The current value starts at `base`.
    pub fn set_attribute(&mut self, id: &AttributeId, base: f32, min: f32, max: f32) {
        self.values.insert(id.clone(), AttributeValue::new(base, min, max));
    }

    /// Current value, or `0.0` if the attribute doesn't exist.
    #[must_use]
    pub fn get(&self, id: &AttributeId) -> f32 {
        self.values.get(id).map_or(0.0, |v| v.current)
    }

    /// Base value, or `0.0` if the attribute doesn't exist.
    #[must_use]
    pub fn base(&self, id: &AttributeId) -> f32 {
        self.values.get(id).map_or(0.0, |v| v.base)
    }

    /// Full attribute record, if present.
    #[must_use]
    pub fn value(&self, id: &AttributeId) -> Option<AttributeValue> {
        self.values.get(id).copied()
    }

    /// Whether the attribute exists.
    #[must_use]
    pub fn contains(&self, id: &AttributeId) -> bool {
        self.values.contains_key(id)
    }

    /// Write the current value (clamped). Returns the stored value.
    ///
    /// Missing attributes are created with default bounds first.
    pub fn set(&mut self, id: &AttributeId, value: f32) -> f32 {
        let mut entry = self.values.get(id).copied().unwrap_or_default();
        entry.current = entry.clamp(value);
        self.values.insert(id.clone(), entry);
        entry.current
    }

    /// Add to the current value (clamped). Returns the stored value.
    pub fn add(&mut self, id: &AttributeId, delta: f32) -> f32 {
        let current = self.get(id);
        self.set(id, current + delta)
    }

    /// Attributes in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &AttributeValue)> {
        self.values.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_max_and_min() {
        let mut attrs = AttributeSet::new();
        attrs.set_attribute(&AttributeId::HEALTH, 10.0, 0.0, 5.0);
        assert_eq!(attrs.get(&AttributeId::HEALTH), 5.0);

        attrs.add(&AttributeId::HEALTH, 10.0);
        assert_eq!(attrs.get(&AttributeId::HEALTH), 5.0);

        attrs.add(&AttributeId::HEALTH, -100.0);
        assert_eq!(attrs.get(&AttributeId::HEALTH), 0.0);
    }

    #[test]
    fn test_zero_max_is_unbounded() {
        let mut attrs = AttributeSet::new();
        attrs.set_attribute(&AttributeId::ATTACK_DAMAGE, 10.0, 0.0, 0.0);
        attrs.add(&AttributeId::ATTACK_DAMAGE, 1000.0);
        assert_eq!(attrs.get(&AttributeId::ATTACK_DAMAGE), 1010.0);
    }

    #[test]
    fn test_missing_reads_zero() {
        let attrs = AttributeSet::new();
        assert_eq!(attrs.get(&AttributeId::MANA), 0.0);
        assert_eq!(attrs.base(&AttributeId::MANA), 0.0);
        assert!(attrs.value(&AttributeId::MANA).is_none());
    }

    #[test]
    fn test_write_to_missing_creates_default() {
        let mut attrs = AttributeSet::new();
        let luck = AttributeId::new("Luck");

        assert_eq!(attrs.add(&luck, 3.0), 3.0);
        assert!(attrs.contains(&luck));
        // default min of zero
        assert_eq!(attrs.add(&luck, -10.0), 0.0);
    }

    #[test]
    fn test_set_attribute_resets() {
        let mut attrs = AttributeSet::new();
        attrs.set_attribute(&AttributeId::HEALTH, 30.0, 0.0, 30.0);
        attrs.add(&AttributeId::HEALTH, -12.0);
        assert_eq!(attrs.get(&AttributeId::HEALTH), 18.0);

        attrs.set_attribute(&AttributeId::HEALTH, 50.0, 0.0, 60.0);
        let value = attrs.value(&AttributeId::HEALTH).unwrap();
        assert_eq!(value.current, 50.0);
        assert_eq!(value.base, 50.0);
        assert_eq!(value.max, 60.0);
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut attrs = AttributeSet::new();
        attrs.set(&AttributeId::MANA, 1.0);
        attrs.set(&AttributeId::ARMOR, 2.0);
        attrs.set(&AttributeId::HEALTH, 3.0);

        let names: Vec<_> = attrs.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(names, vec!["Armor", "Health", "Mana"]);
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let mut attrs = AttributeSet::new();
        attrs.set_attribute(&AttributeId::ATTACK_DAMAGE, 15.0, 0.0, 0.0);

        let snapshot = attrs.clone();
        attrs.add(&AttributeId::ATTACK_DAMAGE, 5.0);

        assert_eq!(snapshot.get(&AttributeId::ATTACK_DAMAGE), 15.0);
        assert_eq!(attrs.get(&AttributeId::ATTACK_DAMAGE), 20.0);
    }
}
