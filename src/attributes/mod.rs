//! Numeric attribute system.
//!
//! - `AttributeId`: interned attribute name (well-known constants + ad hoc)
//! - `AttributeValue`: base/current/min/max record
//! - `AttributeSet`: per-entity store with clamped writes
//!
//! ```
//! use rust_gas::attributes::{AttributeId, AttributeSet};
//!
//! let mut attrs = AttributeSet::new();
//! attrs.set_attribute(&AttributeId::HEALTH, 10.0, 0.0, 5.0);
//! attrs.add(&AttributeId::HEALTH, 10.0);
//! assert_eq!(attrs.get(&AttributeId::HEALTH), 5.0);
//! ```

mod id;
mod set;

pub use id::AttributeId;
pub use set::{AttributeSet, AttributeValue};
