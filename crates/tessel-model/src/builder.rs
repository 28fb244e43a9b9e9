//! Model assembly.
//!
//! [`LocalNoiseModelBuilder`] expands a compact device description (a few
//! local gates, a connectivity geometry, a parameterization scheme) into a
//! fully specified [`LocalNoiseModel`]: SPAM operators plus one embedded,
//! composed operator per gate placement.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use tessel_ops::{
    convert, embed, infer_width, unitary_to_pp, ComposedOp, EvoType, EvoTypeChoice,
    LinearOperator, OpHandle, OpsError, Parameterization, Povm, PovmFactor, Prep, PrepFactor,
    SimMode, SimModeChoice,
};

use crate::availability::{self, AvailabilityPolicy};
use crate::error::{ModelError, ModelResult};
use crate::labels::{OpLabel, QubitLabel, QubitTuple, POVM_LABEL, PREP_LABEL};
use crate::library::standard_gate_unitary;
use crate::model::{LocalNoiseModel, OpDict};
use crate::noise::{GlobalNoiseBuilder, WeightOneGlobalNoise};
use crate::topology::Topology;

/// How a gate is supplied to the builder.
#[derive(Debug)]
pub enum GateSpec {
    /// Look the unitary up in the built-in library by gate name.
    Standard,
    /// An explicit unitary matrix.
    Unitary(Array2<Complex64>),
    /// A matrix already in the evolution representation (a pp-basis
    /// superoperator for density-matrix-class evolution).
    Matrix(Array2<Complex64>),
    /// An already-parameterized operator, used as-is.
    Op(OpHandle),
}

/// What to do when a single gate fails to convert or embed.
///
/// Structural specification errors (bad geometry, bad placement width, bad
/// dimensions) are always fatal regardless of this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole build; no partial model is returned.
    #[default]
    Raise,
    /// Log a warning and omit the gate or placement.
    WarnAndSkip,
    /// Omit silently.
    IgnoreAndSkip,
}

/// Device connectivity input.
#[derive(Debug)]
pub enum Geometry {
    /// A named geometry built over the qubit labels.
    Named(String),
    /// A pre-built topology, used as-is (its labels are authoritative).
    Graph(Topology),
}

/// Builder for [`LocalNoiseModel`].
#[derive(Debug)]
pub struct LocalNoiseModelBuilder {
    n_qubits: usize,
    qubit_labels: Option<Vec<QubitLabel>>,
    geometry: Geometry,
    gates: Vec<(String, GateSpec)>,
    availability: FxHashMap<String, AvailabilityPolicy>,
    parameterization: Parameterization,
    evotype: EvoTypeChoice,
    sim_mode: SimModeChoice,
    error_policy: ErrorPolicy,
    independent_gates: bool,
    ensure_composed_gates: bool,
    global_noise: Option<Box<dyn GlobalNoiseBuilder>>,
}

impl LocalNoiseModelBuilder {
    /// Start a builder for an `n_qubits` device with a line geometry.
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            qubit_labels: None,
            geometry: Geometry::Named("line".to_string()),
            gates: Vec::new(),
            availability: FxHashMap::default(),
            parameterization: Parameterization::Static,
            evotype: EvoTypeChoice::Auto,
            sim_mode: SimModeChoice::Auto,
            error_policy: ErrorPolicy::Raise,
            independent_gates: false,
            ensure_composed_gates: true,
            global_noise: None,
        }
    }

    /// Use explicit qubit labels instead of sequential integers.
    #[must_use]
    pub fn with_qubit_labels(mut self, labels: Vec<QubitLabel>) -> Self {
        self.qubit_labels = Some(labels);
        self
    }

    /// Use a named geometry ("line", "ring", "full", "star").
    #[must_use]
    pub fn with_geometry(mut self, name: impl Into<String>) -> Self {
        self.geometry = Geometry::Named(name.into());
        self
    }

    /// Use a pre-built topology.
    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.geometry = Geometry::Graph(topology);
        self
    }

    /// Add a gate from the built-in library.
    #[must_use]
    pub fn with_standard_gate(mut self, name: impl Into<String>) -> Self {
        self.gates.push((name.into(), GateSpec::Standard));
        self
    }

    /// Add a gate from an explicit unitary.
    #[must_use]
    pub fn with_unitary_gate(mut self, name: impl Into<String>, u: Array2<Complex64>) -> Self {
        self.gates.push((name.into(), GateSpec::Unitary(u)));
        self
    }

    /// Add a gate from a matrix already in the evolution representation.
    #[must_use]
    pub fn with_matrix_gate(mut self, name: impl Into<String>, m: Array2<Complex64>) -> Self {
        self.gates.push((name.into(), GateSpec::Matrix(m)));
        self
    }

    /// Add an already-parameterized operator.
    #[must_use]
    pub fn with_op_gate(mut self, name: impl Into<String>, op: OpHandle) -> Self {
        self.gates.push((name.into(), GateSpec::Op(op)));
        self
    }

    /// Set the placement policy for one gate (default: all edges).
    #[must_use]
    pub fn with_availability(
        mut self,
        gate: impl Into<String>,
        policy: AvailabilityPolicy,
    ) -> Self {
        self.availability.insert(gate.into(), policy);
        self
    }

    /// Set the parameterization scheme (default: static).
    #[must_use]
    pub fn with_parameterization(mut self, param: Parameterization) -> Self {
        self.parameterization = param;
        self
    }

    /// Force an evolution type instead of deriving it.
    #[must_use]
    pub fn with_evotype(mut self, choice: EvoTypeChoice) -> Self {
        self.evotype = choice;
        self
    }

    /// Force a simulation mode instead of auto-selecting one.
    #[must_use]
    pub fn with_sim_mode(mut self, choice: SimModeChoice) -> Self {
        self.sim_mode = choice;
        self
    }

    /// Set the per-gate failure policy (default: raise).
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Give each placement its own composed operator instead of one shared
    /// per gate name.
    #[must_use]
    pub fn with_independent_gates(mut self, independent: bool) -> Self {
        self.independent_gates = independent;
        self
    }

    /// Wrap each gate in a composed operator so noise can be appended later
    /// (default: true).
    #[must_use]
    pub fn with_ensure_composed_gates(mut self, ensure: bool) -> Self {
        self.ensure_composed_gates = ensure;
        self
    }

    /// Override the global-noise construction used for Lindblad-class SPAM.
    #[must_use]
    pub fn with_global_noise(mut self, builder: Box<dyn GlobalNoiseBuilder>) -> Self {
        self.global_noise = Some(builder);
        self
    }

    /// Assemble the model.
    pub fn build(self) -> ModelResult<LocalNoiseModel> {
        let n = self.n_qubits;
        let param = self.parameterization;

        let topology = match self.geometry {
            Geometry::Named(ref name) => {
                Topology::common_graph(n, name, self.qubit_labels.clone())?
            }
            Geometry::Graph(ref t) => {
                if t.n_qubits() != n {
                    return Err(ModelError::QubitLabelCountMismatch {
                        expected: n,
                        got: t.n_qubits(),
                    });
                }
                t.clone()
            }
        };
        let qubit_labels = topology.labels().to_vec();

        let evotype = self.evotype.resolve(param);
        let sim_mode = SimMode::resolve(self.sim_mode, evotype, n);
        let d = evotype.qudit_dim();
        let dim = d.pow(n as u32);
        info!(
            n_qubits = n,
            %evotype,
            ?sim_mode,
            parameterization = %param,
            "assembling local-noise model"
        );

        let (prep, povm) = build_spam(
            param,
            evotype,
            n,
            &topology,
            sim_mode,
            self.global_noise.as_deref(),
        )?;

        let mut operations = OpDict::default();
        let mut primitive_op_labels = Vec::new();
        let mut availability = Vec::new();

        for (gate_name, spec) in &self.gates {
            // Library lookup failures are structural, not per-gate.
            let raw = match spec {
                GateSpec::Standard => RawGate::Unitary(standard_gate_unitary(gate_name)?),
                GateSpec::Unitary(u) => RawGate::Unitary(u.clone()),
                GateSpec::Matrix(m) => RawGate::Matrix(m.clone()),
                GateSpec::Op(h) => RawGate::Op(h.clone()),
            };

            let converted = match realize_gate(raw, param, evotype) {
                Ok(op) => op,
                Err(source) => {
                    match self.error_policy {
                        ErrorPolicy::Raise => {
                            return Err(ModelError::GateConstructionFailure {
                                gate: gate_name.clone(),
                                source,
                            });
                        }
                        ErrorPolicy::WarnAndSkip => {
                            warn!(gate = %gate_name, error = %source, "skipping gate: conversion failed");
                        }
                        ErrorPolicy::IgnoreAndSkip => {}
                    }
                    continue;
                }
            };

            let width = infer_width(converted.dim(), d)?;
            let policy = self
                .availability
                .get(gate_name)
                .cloned()
                .unwrap_or_default();
            let placements =
                availability::resolve(gate_name, width, &policy, &qubit_labels, &topology)?;
            debug!(gate = %gate_name, width, placements = placements.len(), "resolved availability");

            // One shared composed operator per gate name, unless placements
            // are independent.
            let shared: Option<OpHandle> = if self.ensure_composed_gates && !self.independent_gates
            {
                let composed = ComposedOp::from_factors(vec![converted.clone()])?;
                let handle: OpHandle = Arc::new(composed);
                operations.insert(
                    OpLabel::new(format!("{gate_name}_gate"), QubitTuple(vec![])),
                    handle.clone(),
                );
                Some(handle)
            } else {
                None
            };

            let mut built = Vec::new();
            for placement in placements {
                let positions = label_positions(gate_name, &placement, &qubit_labels)?;

                let (to_embed, bookkeeping) = match &shared {
                    Some(h) => (h.clone(), None),
                    None if self.ensure_composed_gates => {
                        let composed = ComposedOp::from_factors(vec![converted.clone()])?;
                        let handle: OpHandle = Arc::new(composed);
                        let label =
                            OpLabel::new(format!("{gate_name}_gate"), placement.clone());
                        (handle.clone(), Some((label, handle)))
                    }
                    None => (converted.clone(), None),
                };

                match embed(to_embed, &positions, n, sim_mode) {
                    Ok(embedded) => {
                        if let Some((label, handle)) = bookkeeping {
                            operations.insert(label, handle);
                        }
                        let label = OpLabel::new(gate_name.clone(), placement.clone());
                        debug!(label = %label, "registered gate placement");
                        if operations.insert(label.clone(), embedded) {
                            primitive_op_labels.push(label);
                        }
                        built.push(placement);
                    }
                    Err(source) => match self.error_policy {
                        ErrorPolicy::Raise => {
                            return Err(ModelError::GateConstructionFailure {
                                gate: gate_name.clone(),
                                source,
                            });
                        }
                        ErrorPolicy::WarnAndSkip => {
                            warn!(
                                gate = %gate_name,
                                placement = %placement,
                                error = %source,
                                "skipping placement: embedding failed"
                            );
                        }
                        ErrorPolicy::IgnoreAndSkip => {}
                    },
                }
            }
            availability.push((gate_name.clone(), built));
        }

        info!(
            primitive_ops = primitive_op_labels.len(),
            dim, "local-noise model assembled"
        );
        Ok(LocalNoiseModel {
            n_qubits: n,
            qubit_labels,
            evotype,
            sim_mode,
            parameterization: param,
            dim,
            availability,
            preps: vec![(PREP_LABEL.to_string(), prep)],
            povms: vec![(POVM_LABEL.to_string(), povm)],
            operations,
            primitive_op_labels,
        })
    }
}

enum RawGate {
    Unitary(Array2<Complex64>),
    Matrix(Array2<Complex64>),
    Op(OpHandle),
}

/// Convert one raw gate into a parameterized operator.
fn realize_gate(
    raw: RawGate,
    param: Parameterization,
    evotype: EvoType,
) -> Result<OpHandle, OpsError> {
    match raw {
        RawGate::Unitary(u) => {
            if evotype.is_density_class() {
                // Unitaries are given on the 2^k state space; lift to the
                // pp-basis superoperator before parameterizing.
                let k = infer_width(u.nrows(), 2)?;
                let pp = unitary_to_pp(&u, k)?;
                convert(&pp, param, evotype)
            } else {
                convert(&u, param, evotype)
            }
        }
        RawGate::Matrix(m) => convert(&m, param, evotype),
        RawGate::Op(h) => {
            if h.evotype() != evotype {
                return Err(OpsError::EvoTypeMismatch {
                    expected: evotype,
                    got: h.evotype(),
                });
            }
            Ok(h)
        }
    }
}

/// Map placement labels to positions in the full qubit ordering.
fn label_positions(
    gate: &str,
    placement: &QubitTuple,
    qubit_labels: &[QubitLabel],
) -> ModelResult<Vec<usize>> {
    placement
        .labels()
        .iter()
        .map(|q| {
            qubit_labels.iter().position(|l| l == q).ok_or_else(|| {
                ModelError::UnknownPlacementLabel {
                    gate: gate.to_string(),
                    label: q.to_string(),
                }
            })
        })
        .collect()
}

/// Build the reserved prep and measurement for the chosen scheme.
fn build_spam(
    param: Parameterization,
    evotype: EvoType,
    n_qubits: usize,
    topology: &Topology,
    sim_mode: SimMode,
    global_noise: Option<&dyn GlobalNoiseBuilder>,
) -> ModelResult<(Prep, Povm)> {
    match param {
        Parameterization::TP | Parameterization::Full => {
            if !evotype.is_density_class() {
                return Err(OpsError::UnsupportedParameterization { param, evotype }.into());
            }
            let prep = Prep::TensorProduct {
                factors: (0..n_qubits)
                    .map(|_| PrepFactor::computational(0, param, evotype))
                    .collect(),
            };
            let povm = Povm::TensorProduct {
                factors: (0..n_qubits)
                    .map(|_| PovmFactor::computational(param, evotype))
                    .collect(),
            };
            Ok((prep, povm))
        }
        Parameterization::Clifford => Ok((
            Prep::Stabilizer { n_qubits },
            Povm::Computational { n_qubits, evotype },
        )),
        Parameterization::Static | Parameterization::StaticUnitary => Ok((
            Prep::Computational {
                zvals: vec![0; n_qubits],
                evotype,
            },
            Povm::Computational { n_qubits, evotype },
        )),
        Parameterization::CPTP
        | Parameterization::HPlusS
        | Parameterization::S
        | Parameterization::HPlusSTerms
        | Parameterization::HPlusSCliffordTerms => {
            let default_noise = WeightOneGlobalNoise;
            let builder = global_noise.unwrap_or(&default_noise);
            let noise = builder.build(topology, param, evotype, sim_mode)?;
            let prep = Prep::Noisy {
                pure: Box::new(Prep::Computational {
                    zvals: vec![0; n_qubits],
                    evotype,
                }),
                noise: noise.clone(),
            };
            let povm = Povm::Noisy {
                n_qubits,
                evotype,
                noise,
            };
            Ok((prep, povm))
        }
    }
}
