//! The assembled model object.
//!
//! A [`LocalNoiseModel`] is built once by the
//! [`LocalNoiseModelBuilder`](crate::builder::LocalNoiseModelBuilder) and is
//! read-mostly afterwards. The one permitted mutation is
//! [`append_gate_noise`](LocalNoiseModel::append_gate_noise), which pushes a
//! noise factor onto a gate's shared composed operator; callers must
//! serialize that finalize-noise phase relative to concurrent reads.

use rustc_hash::FxHashMap;

use tessel_ops::{EvoType, LinearOperator, OpHandle, Parameterization, Povm, Prep, SimMode};

use crate::error::{ModelError, ModelResult};
use crate::labels::{OpLabel, QubitLabel, QubitTuple};

/// Insertion-ordered, label-unique operator dictionary.
#[derive(Debug, Default)]
pub(crate) struct OpDict {
    entries: Vec<(OpLabel, OpHandle)>,
    index: FxHashMap<OpLabel, usize>,
}

impl OpDict {
    /// Insert or replace; returns true when the label is new.
    pub(crate) fn insert(&mut self, label: OpLabel, op: OpHandle) -> bool {
        if let Some(&i) = self.index.get(&label) {
            self.entries[i].1 = op;
            return false;
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, op));
        true
    }

    pub(crate) fn get(&self, label: &OpLabel) -> Option<&OpHandle> {
        self.index.get(label).map(|&i| &self.entries[i].1)
    }

    fn labels(&self) -> impl Iterator<Item = &OpLabel> {
        self.entries.iter().map(|(l, _)| l)
    }
}

/// A fully assembled n-qubit model: SPAM operators, embedded gate operators
/// and the bookkeeping needed to query them.
#[derive(Debug)]
pub struct LocalNoiseModel {
    pub(crate) n_qubits: usize,
    pub(crate) qubit_labels: Vec<QubitLabel>,
    pub(crate) evotype: EvoType,
    pub(crate) sim_mode: SimMode,
    pub(crate) parameterization: Parameterization,
    pub(crate) dim: usize,
    /// Per gate name, the placements that actually built.
    pub(crate) availability: Vec<(String, Vec<QubitTuple>)>,
    pub(crate) preps: Vec<(String, Prep)>,
    pub(crate) povms: Vec<(String, Povm)>,
    pub(crate) operations: OpDict,
    pub(crate) primitive_op_labels: Vec<OpLabel>,
}

impl LocalNoiseModel {
    /// Number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The ordered qubit labels.
    pub fn qubit_labels(&self) -> &[QubitLabel] {
        &self.qubit_labels
    }

    /// The resolved evolution type.
    pub fn evotype(&self) -> EvoType {
        self.evotype
    }

    /// The resolved simulation mode.
    pub fn sim_mode(&self) -> SimMode {
        self.sim_mode
    }

    /// The parameterization scheme the model was built with.
    pub fn parameterization(&self) -> Parameterization {
        self.parameterization
    }

    /// Total operator dimension, `qudit_dim ^ n_qubits`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The resolved (and successfully built) placements of a gate.
    pub fn availability(&self, gate: &str) -> Option<&[QubitTuple]> {
        self.availability
            .iter()
            .find(|(name, _)| name == gate)
            .map(|(_, tuples)| tuples.as_slice())
    }

    /// Every primitive operation label, in build order.
    pub fn primitive_op_labels(&self) -> &[OpLabel] {
        &self.primitive_op_labels
    }

    /// Every prep label, in build order.
    pub fn primitive_prep_labels(&self) -> Vec<&str> {
        self.preps.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Every measurement label, in build order.
    pub fn primitive_povm_labels(&self) -> Vec<&str> {
        self.povms.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Look up a primitive (or bookkeeping) operator.
    pub fn operation(&self, label: &OpLabel) -> Option<&OpHandle> {
        self.operations.get(label)
    }

    /// Look up a state preparation by label.
    pub fn prep(&self, label: &str) -> Option<&Prep> {
        self.preps
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p)
    }

    /// Look up a measurement by label.
    pub fn povm(&self, label: &str) -> Option<&Povm> {
        self.povms
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p)
    }

    /// All operator labels including `{name}_gate` bookkeeping entries.
    pub fn operation_labels(&self) -> Vec<&OpLabel> {
        self.operations.labels().collect()
    }

    /// Append a noise factor to a gate's composed operator.
    ///
    /// With shared composition (`independent_gates = false`) pass `None` for
    /// the placement; the factor becomes visible through every placement of
    /// the gate. With independent gates pass the specific placement. Fails
    /// with [`ModelError::NotComposed`] when the model was built without
    /// composed wrappers.
    pub fn append_gate_noise(
        &self,
        gate: &str,
        placement: Option<&QubitTuple>,
        factor: OpHandle,
    ) -> ModelResult<()> {
        let name = format!("{gate}_gate");
        let label = match placement {
            Some(p) => OpLabel::new(name, p.clone()),
            None => OpLabel::new(name, QubitTuple(vec![])),
        };
        let handle = self
            .operations
            .get(&label)
            .ok_or_else(|| ModelError::UnknownOperation(label.to_string()))?;
        let composed = handle
            .as_composed()
            .ok_or_else(|| ModelError::NotComposed(label.to_string()))?;
        composed.append(factor)?;
        Ok(())
    }
}
