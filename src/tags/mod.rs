//! Hierarchical tag system.
//!
//! Tags drive almost every gating decision in the engine: abilities check
//! their owner's tags before activating, effects check the target's tags
//! before applying, and active effects grant tags for as long as they
//! last.
//!
//! - `Tag`: immutable, hash-identified, dot-separated label
//! - `TagContainer`: explicit tags plus an expanded ancestor set
//!
//! ```
//! use rust_gas::tags::{Tag, TagContainer};
//!
//! let mut owned = TagContainer::new();
//! owned.add_tag(Tag::new("State.Debuff.Stun"));
//!
//! assert!(owned.has_tag(&Tag::new("State.Debuff")));
//! assert!(!owned.has_tag_exact(&Tag::new("State.Debuff")));
//! ```

mod tag;
mod container;

pub use tag::{fnv1a32, is_descendant, is_valid_tag, Ancestors, Tag};
pub use container::TagContainer;
