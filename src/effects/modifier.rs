//! Attribute modifiers.
//!
//! A modifier changes one attribute of the entity an effect lands on.
//! Static modifiers combine a magnitude with the attribute through a
//! [`ModifierOp`]; calculated modifiers hand control to a
//! [`CalculatorType`] and ignore both op and magnitude.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeId, AttributeSet};

use super::CalculatorType;

/// How a static modifier combines its magnitude with the attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierOp {
    /// `current += magnitude`
    #[default]
    Add,
    /// `current += base * magnitude`
    AddPercent,
    /// `current *= magnitude`
    Multiply,
    /// `current = magnitude`
    Override,
}

impl ModifierOp {
    /// Whether contributions of this op are reverted when a timed effect ends.
    #[must_use]
    pub const fn is_additive(self) -> bool {
        matches!(self, ModifierOp::Add | ModifierOp::AddPercent)
    }
}

/// Whether a modifier is a static formula or a calculator dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueMode {
    #[default]
    Static,
    Calculated,
}

/// A single attribute mutation inside an effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub mode: ValueMode,
    pub attribute: AttributeId,
    pub op: ModifierOp,
    pub magnitude: f32,
    /// Only read in `Calculated` mode. `None` means the modifier is skipped.
    pub calculator: Option<CalculatorType>,
}

/// A tracked additive change, used to undo a timed effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub attribute: AttributeId,
    pub delta: f32,
}

impl Modifier {
    /// A static modifier.
    pub fn new(attribute: AttributeId, op: ModifierOp, magnitude: f32) -> Self {
        Self {
            mode: ValueMode::Static,
            attribute,
            op,
            magnitude,
            calculator: None,
        }
    }

    /// `current += magnitude`
    pub fn add(attribute: AttributeId, magnitude: f32) -> Self {
        Self::new(attribute, ModifierOp::Add, magnitude)
    }

    /// `current += base * magnitude`
    pub fn add_percent(attribute: AttributeId, magnitude: f32) -> Self {
        Self::new(attribute, ModifierOp::AddPercent, magnitude)
    }

    /// `current *= magnitude`
    pub fn multiply(attribute: AttributeId, magnitude: f32) -> Self {
        Self::new(attribute, ModifierOp::Multiply, magnitude)
    }

    /// `current = magnitude`
    pub fn override_with(attribute: AttributeId, magnitude: f32) -> Self {
        Self::new(attribute, ModifierOp::Override, magnitude)
    }

    /// A modifier that delegates to a calculator.
    ///
    /// The attribute is informational; calculators choose what they write.
    pub fn calculated(attribute: AttributeId, calculator: CalculatorType) -> Self {
        Self {
            mode: ValueMode::Calculated,
            attribute,
            op: ModifierOp::Add,
            magnitude: 0.0,
            calculator: Some(calculator),
        }
    }

    /// Apply this modifier to `target`.
    ///
    /// Returns the actual (post-clamp) change for additive static ops so
    /// the caller can revert it later. Every other path returns `None`.
    pub fn apply(&self, source: &AttributeSet, target: &mut AttributeSet) -> Option<Contribution> {
        match self.mode {
            ValueMode::Calculated => {
                if let Some(calculator) = self.calculator {
                    calculator.execute(source, target);
                }
                None
            }
            ValueMode::Static => {
                let before = target.get(&self.attribute);
                let after = match self.op {
                    ModifierOp::Add => target.add(&self.attribute, self.magnitude),
                    ModifierOp::AddPercent => {
                        let base = target.base(&self.attribute);
                        target.add(&self.attribute, base * self.magnitude)
                    }
                    ModifierOp::Multiply => target.set(&self.attribute, before * self.magnitude),
                    ModifierOp::Override => target.set(&self.attribute, self.magnitude),
                };

                self.op.is_additive().then(|| Contribution {
                    attribute: self.attribute.clone(),
                    delta: after - before,
                })
            }
        }
    }
}
