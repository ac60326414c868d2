//! Attribute identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Name of a numeric attribute.
///
/// The well-known attributes the engine itself reads are associated
/// constants and cost nothing to clone. Games add their own with
/// [`AttributeId::new`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(Cow<'static, str>);

impl AttributeId {
    pub const HEALTH: Self = Self::from_static("Health");
    pub const MAX_HEALTH: Self = Self::from_static("MaxHealth");
    pub const MANA: Self = Self::from_static("Mana");
    pub const MAX_MANA: Self = Self::from_static("MaxMana");
    pub const ATTACK_DAMAGE: Self = Self::from_static("AttackDamage");
    pub const ATTACK_SPEED: Self = Self::from_static("AttackSpeed");
    pub const ARMOR: Self = Self::from_static("Armor");
    pub const MOVE_SPEED: Self = Self::from_static("MoveSpeed");
    /// Bonus targets for nearest-N targeting.
    pub const EXTRA_TARGET_COUNT: Self = Self::from_static("ExtraTargetCount");

    /// Every attribute the engine knows by name.
    pub const WELL_KNOWN: [Self; 9] = [
        Self::HEALTH,
        Self::MAX_HEALTH,
        Self::MANA,
        Self::MAX_MANA,
        Self::ATTACK_DAMAGE,
        Self::ATTACK_SPEED,
        Self::ARMOR,
        Self::MOVE_SPEED,
        Self::EXTRA_TARGET_COUNT,
    ];

    /// Create an ad hoc attribute ID.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Create an ID from a static name without allocating.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The attribute name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a name to its well-known ID, if it is one.
    #[must_use]
    pub fn well_known(name: &str) -> Option<Self> {
        Self::WELL_KNOWN.into_iter().find(|id| id.as_str() == name)
    }
}

impl From<&'static str> for AttributeId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for AttributeId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl std::fmt::Display for AttributeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
