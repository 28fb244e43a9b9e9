//! Global noise construction.
//!
//! Lindblad-class parameterizations wrap the perfect prep and measurement
//! with one shared noise map covering the whole device. The construction is
//! pluggable so callers can swap in device-specific noise structure.

use ndarray::Array2;
use std::fmt::Debug;
use std::sync::Arc;

use tessel_ops::{convert, embed, ComposedOp, EvoType, OpHandle, Parameterization, SimMode};

use crate::error::ModelResult;
use crate::topology::Topology;

/// Builds the single shared noise map used to wrap SPAM operators.
pub trait GlobalNoiseBuilder: Debug {
    /// Build a full-space noise operator for the given device.
    fn build(
        &self,
        topology: &Topology,
        param: Parameterization,
        evotype: EvoType,
        mode: SimMode,
    ) -> ModelResult<OpHandle>;
}

/// The default global noise: one embedded single-qubit Lindblad factor per
/// qubit, composed over the whole device.
///
/// Each factor starts as the identity with zero error-generator
/// coefficients, so the initial map is the identity; an estimation layer
/// adjusts the coefficients later.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightOneGlobalNoise;

impl GlobalNoiseBuilder for WeightOneGlobalNoise {
    fn build(
        &self,
        topology: &Topology,
        param: Parameterization,
        evotype: EvoType,
        mode: SimMode,
    ) -> ModelResult<OpHandle> {
        let n = topology.n_qubits();
        let d = evotype.qudit_dim();
        let ident = Array2::eye(d);
        let mut factors = Vec::with_capacity(n);
        for q in 0..n {
            let local = convert(&ident, param, evotype)?;
            factors.push(embed(local, &[q], n, mode)?);
        }
        let composed = ComposedOp::from_factors(factors)?;
        Ok(Arc::new(composed))
    }
}
