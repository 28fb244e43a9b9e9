//! Qubit, operator and layer labels.
//!
//! A primitive operator is identified by its gate name plus the ordered
//! qubit tuple it was placed on, printed `Gx:0:1`. Layer labels are transient
//! simulation-time references and are never stored inside a model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved label of the model's state preparation.
pub const PREP_LABEL: &str = "rho0";

/// Reserved label of the model's measurement.
pub const POVM_LABEL: &str = "Mdefault";

/// An opaque qubit identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QubitLabel {
    /// An integer-indexed qubit.
    Index(u32),
    /// A named qubit (e.g. "Q7").
    Name(String),
}

impl fmt::Display for QubitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitLabel::Index(i) => write!(f, "{i}"),
            QubitLabel::Name(s) => f.write_str(s),
        }
    }
}

impl From<u32> for QubitLabel {
    fn from(i: u32) -> Self {
        QubitLabel::Index(i)
    }
}

impl From<&str> for QubitLabel {
    fn from(s: &str) -> Self {
        QubitLabel::Name(s.to_string())
    }
}

/// An ordered tuple of qubit labels; ordering carries gate semantics
/// (control/target assignment).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitTuple(pub Vec<QubitLabel>);

impl QubitTuple {
    /// Number of qubits in the tuple.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the tuple is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The labels, in order.
    pub fn labels(&self) -> &[QubitLabel] {
        &self.0
    }
}

impl fmt::Display for QubitTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{q}")?;
        }
        Ok(())
    }
}

impl<L: Into<QubitLabel>, const N: usize> From<[L; N]> for QubitTuple {
    fn from(labels: [L; N]) -> Self {
        QubitTuple(labels.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<QubitLabel>> for QubitTuple {
    fn from(labels: Vec<QubitLabel>) -> Self {
        QubitTuple(labels)
    }
}

/// A primitive operator label: gate name plus placement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OpLabel {
    /// Gate name, e.g. "Gx".
    pub name: String,
    /// Ordered placement tuple.
    pub qubits: QubitTuple,
}

impl OpLabel {
    /// Build a label from a name and placement.
    pub fn new(name: impl Into<String>, qubits: impl Into<QubitTuple>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into(),
        }
    }
}

impl fmt::Display for OpLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.qubits.is_empty() {
            write!(f, ":{}", self.qubits)?;
        }
        Ok(())
    }
}

/// One circuit time-step: zero or more primitive operator references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerLabel(pub Vec<OpLabel>);

impl LayerLabel {
    /// The empty (idle) layer.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A single-component layer.
    pub fn single(op: OpLabel) -> Self {
        Self(vec![op])
    }

    /// The component labels, in composition order.
    pub fn components(&self) -> &[OpLabel] {
        &self.0
    }
}

impl From<OpLabel> for LayerLabel {
    fn from(op: OpLabel) -> Self {
        Self::single(op)
    }
}

impl From<Vec<OpLabel>> for LayerLabel {
    fn from(ops: Vec<OpLabel>) -> Self {
        Self(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_label_display() {
        let l = OpLabel::new("Gx", [0u32]);
        assert_eq!(l.to_string(), "Gx:0");
        let l2 = OpLabel::new("Gcnot", [1u32, 0]);
        assert_eq!(l2.to_string(), "Gcnot:1:0");
    }

    #[test]
    fn named_qubit_display() {
        let l = OpLabel::new("Gh", ["Q2"]);
        assert_eq!(l.to_string(), "Gh:Q2");
    }

    #[test]
    fn empty_placement_displays_bare_name() {
        let l = OpLabel::new("Gglobal", QubitTuple(vec![]));
        assert_eq!(l.to_string(), "Gglobal");
    }

    #[test]
    fn label_ordering_is_stable() {
        let a = OpLabel::new("Gx", [0u32]);
        let b = OpLabel::new("Gx", [1u32]);
        assert!(a < b);
    }

    #[test]
    fn serde_round_trip() {
        let l = OpLabel::new("Gcnot", [0u32, 1]);
        let json = serde_json::to_string(&l).unwrap();
        let back: OpLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }
}
