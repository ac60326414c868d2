//! Resolved targets.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{EntityId, Position};

/// The result of one targeting call.
///
/// Targets keep first-seen order and never repeat.
#[derive(Clone, Debug, Default)]
pub struct TargetData {
    source: Option<EntityId>,
    targets: SmallVec<[EntityId; 8]>,
    lookup: FxHashSet<EntityId>,
    hit_location: Option<Position>,
}

impl TargetData {
    /// Create an empty result for `source`.
    pub fn new(source: EntityId) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// Build from a list of targets, dropping duplicates.
    pub fn from_targets(source: EntityId, targets: impl IntoIterator<Item = EntityId>) -> Self {
        let mut data = Self::new(source);
        for target in targets {
            data.add_target(target);
        }
        data
    }

    /// Add a target. Returns `false` if it was already present.
    pub fn add_target(&mut self, target: EntityId) -> bool {
        if !self.lookup.insert(target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Set where the ability landed (builder pattern).
    #[must_use]
    pub fn with_hit_location(mut self, location: Position) -> Self {
        self.hit_location = Some(location);
        self
    }

    /// The entity that searched for targets.
    #[must_use]
    pub fn source(&self) -> Option<EntityId> {
        self.source
    }

    /// Targets in selection order.
    #[must_use]
    pub fn targets(&self) -> &[EntityId] {
        &self.targets
    }

    /// Where the ability landed, if known.
    #[must_use]
    pub fn hit_location(&self) -> Option<Position> {
        self.hit_location
    }

    /// Whether `entity` was selected.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.lookup.contains(&entity)
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate over targets in selection order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.targets.iter().copied()
    }
}
