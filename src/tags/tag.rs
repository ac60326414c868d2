//! Hierarchical gameplay tags.
//!
//! A tag is a dot-separated path such as `"Ability.BaseAttack"` or
//! `"State.Debuff.Stun"`. Each segment is a parent of the segments after
//! it, so `"State.Debuff.Stun"` implies `"State.Debuff"` and `"State"`.
//!
//! Tags compare by their 32-bit FNV-1a hash, computed once at
//! construction. The hash is stable across processes and platforms,
//! which keeps lockstep peers agreeing on tag identity.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of a string's UTF-8 bytes.
///
/// ```
/// use rust_gas::tags::fnv1a32;
///
/// assert_eq!(fnv1a32(""), 0x811C_9DC5);
/// assert_eq!(fnv1a32("a"), 0xE40C_292C);
/// ```
#[must_use]
pub const fn fnv1a32(value: &str) -> u32 {
    let bytes = value.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Check whether a string is a well-formed tag path.
///
/// Rejects the empty string, leading or trailing dots, consecutive dots,
/// and any character outside `[A-Za-z0-9_.]`.
#[must_use]
pub fn is_valid_tag(value: &str) -> bool {
    if value.is_empty() || value.starts_with('.') || value.ends_with('.') {
        return false;
    }

    let mut previous_dot = false;
    for c in value.chars() {
        if c == '.' {
            if previous_dot {
                return false;
            }
            previous_dot = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            previous_dot = false;
        } else {
            return false;
        }
    }
    true
}

/// Whether `child` sits strictly below `parent` in the hierarchy.
///
/// ```
/// use rust_gas::tags::is_descendant;
///
/// assert!(is_descendant("a.b.c", "a.b"));
/// assert!(!is_descendant("a.b", "a.b"));
/// assert!(!is_descendant("a.bc", "a.b"));
/// ```
#[must_use]
pub fn is_descendant(child: &str, parent: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && child.as_bytes()[parent.len()] == b'.'
}

/// Iterator over the ancestors of a tag path, nearest first.
///
/// `"a.b.c"` yields `"a.b"` then `"a"`.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let cut = self.remaining.rfind('.')?;
        self.remaining = &self.remaining[..cut];
        Some(self.remaining)
    }
}

/// An immutable, hash-identified gameplay tag.
///
/// Construction never fails; use [`Tag::is_valid`] or [`Tag::parse`] to
/// reject malformed paths. Containers silently ignore invalid tags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Tag {
    value: Arc<str>,
    hash: u32,
}

impl Tag {
    /// Create a tag, hashing it eagerly.
    #[must_use]
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        let value = value.into();
        let hash = fnv1a32(&value);
        Self { value, hash }
    }

    /// Create a tag only if the path is well formed.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        is_valid_tag(value).then(|| Self::new(value))
    }

    /// The tag path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The FNV-1a hash of the path.
    #[must_use]
    pub const fn hash(&self) -> u32 {
        self.hash
    }

    /// Whether the path is well formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_tag(&self.value)
    }

    /// Ancestors of this tag, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { remaining: &self.value }
    }

    /// The immediate parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Tag> {
        self.ancestors().next().map(Tag::new)
    }

    /// Whether this tag sits strictly below `parent`.
    #[must_use]
    pub fn is_descendant_of(&self, parent: &Tag) -> bool {
        is_descendant(&self.value, &parent.value)
    }

    /// Whether this tag equals `other` or sits below it.
    #[must_use]
    pub fn matches(&self, other: &Tag) -> bool {
        self == other || self.is_descendant_of(other)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.value.to_string()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
