//! Tag containers with ancestor-inclusive membership.
//!
//! A container tracks two sets:
//! - **explicit**: tags that were actually added, in insertion order
//! - **expanded**: hashes of the explicit tags plus all their ancestors
//!
//! `has_tag("State")` is answered from the expanded set in O(1), so a
//! container holding only `"State.Debuff.Stun"` reports `"State"` as
//! present. `has_tag_exact` only consults the explicit tags.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tag::{fnv1a32, Tag};

/// A set of gameplay tags.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagContainer {
    explicit: SmallVec<[Tag; 4]>,
    explicit_hashes: FxHashSet<u32>,
    expanded: FxHashSet<u32>,
}

impl TagContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container from tag paths, dropping malformed ones.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().map(Tag::new).collect()
    }

    /// Add a tag. Returns `false` if it was invalid or already present.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if !tag.is_valid() || self.explicit_hashes.contains(&tag.hash()) {
            return false;
        }

        self.explicit_hashes.insert(tag.hash());
        self.expanded.insert(tag.hash());
        for ancestor in tag.ancestors() {
            self.expanded.insert(fnv1a32(ancestor));
        }
        self.explicit.push(tag);
        true
    }

    /// Add every tag from another container.
    pub fn append(&mut self, other: &TagContainer) {
        for tag in other.iter() {
            self.add_tag(tag.clone());
        }
    }

    /// Remove a tag. Returns `false` if it wasn't explicitly present.
    ///
    /// The expanded set is rebuilt from the remaining explicit tags, since
    /// another tag may still imply an ancestor of the removed one.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        let before = self.explicit.len();
        self.explicit.retain(|t| t != tag);
        if self.explicit.len() == before {
            return false;
        }

        self.rebuild();
        true
    }

    /// Remove all tags.
    pub fn clear(&mut self) {
        self.explicit.clear();
        self.explicit_hashes.clear();
        self.expanded.clear();
    }

    /// Ancestor-inclusive membership.
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.expanded.contains(&tag.hash())
    }

    /// Exact membership (explicitly added tags only).
    #[must_use]
    pub fn has_tag_exact(&self, tag: &Tag) -> bool {
        self.explicit_hashes.contains(&tag.hash())
    }

    /// Whether any tag of `other` is present (ancestor-inclusive).
    ///
    /// An empty `other` never matches.
    #[must_use]
    pub fn has_any(&self, other: &TagContainer) -> bool {
        other.iter().any(|tag| self.has_tag(tag))
    }

    /// Whether every tag of `other` is present (ancestor-inclusive).
    ///
    /// An empty `other` always matches.
    #[must_use]
    pub fn has_all(&self, other: &TagContainer) -> bool {
        other.iter().all(|tag| self.has_tag(tag))
    }

    /// The required/blocked gate used for effects and abilities.
    #[must_use]
    pub fn satisfies(&self, required: &TagContainer, blocked: &TagContainer) -> bool {
        self.has_all(required) && !self.has_any(blocked)
    }

    /// Explicit tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.explicit.iter()
    }

    /// Number of explicit tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.explicit.len()
    }

    /// Whether no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }

    fn rebuild(&mut self) {
        self.explicit_hashes.clear();
        self.expanded.clear();
        for tag in &self.explicit {
            self.explicit_hashes.insert(tag.hash());
            self.expanded.insert(tag.hash());
            for ancestor in tag.ancestors() {
                self.expanded.insert(fnv1a32(ancestor));
            }
        }
    }
}

impl FromIterator<Tag> for TagContainer {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut container = Self::new();
        for tag in iter {
            container.add_tag(tag);
        }
        container
    }
}

impl From<Vec<Tag>> for TagContainer {
    fn from(tags: Vec<Tag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagContainer> for Vec<Tag> {
    fn from(container: TagContainer) -> Self {
        container.explicit.into_vec()
    }
}

impl PartialEq for TagContainer {
    fn eq(&self, other: &Self) -> bool {
        self.explicit == other.explicit
    }
}
