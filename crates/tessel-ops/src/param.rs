//! Evolution types, parameterization schemes and simulation modes.
//!
//! These were string-valued policies in older tooling ("auto", "densitymx",
//! "matrix"/"map"); here they are closed enums resolved once at build entry
//! and passed explicitly everywhere, so the evotype-inference rule table has
//! a single home: [`Parameterization::implied_evotype`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OpsError, OpsResult};

/// The mathematical representation used to propagate quantum state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvoType {
    /// Full density-matrix evolution (superoperators on a 4ⁿ space).
    DensityMatrix,
    /// Pure state-vector evolution (unitaries on a 2ⁿ space).
    StateVector,
    /// Stabilizer-formalism evolution (Clifford operations).
    Stabilizer,
    /// Perturbative term expansion over state vectors.
    SvTerm,
    /// Perturbative term expansion over Clifford/stabilizer terms.
    CTerm,
}

impl EvoType {
    /// Per-qubit dimension: 4 for density-matrix-class evolution, 2 otherwise.
    #[inline]
    pub fn qudit_dim(self) -> usize {
        match self {
            EvoType::DensityMatrix | EvoType::SvTerm | EvoType::CTerm => 4,
            EvoType::StateVector | EvoType::Stabilizer => 2,
        }
    }

    /// True for evolution types whose operators are superoperators.
    #[inline]
    pub fn is_density_class(self) -> bool {
        self.qudit_dim() == 4
    }

    /// Canonical short name.
    pub fn name(self) -> &'static str {
        match self {
            EvoType::DensityMatrix => "densitymx",
            EvoType::StateVector => "statevec",
            EvoType::Stabilizer => "stabilizer",
            EvoType::SvTerm => "svterm",
            EvoType::CTerm => "cterm",
        }
    }
}

impl fmt::Display for EvoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How each local operator's free parameters are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameterization {
    /// Every superoperator entry is a free parameter.
    Full,
    /// Trace-preserving: all entries free except the fixed first row.
    TP,
    /// Lindblad parameterization with a completely-positive constraint.
    CPTP,
    /// Lindblad Hamiltonian + stochastic error generators.
    HPlusS,
    /// Lindblad stochastic error generators only.
    S,
    /// No free parameters; a fixed superoperator.
    Static,
    /// No free parameters; a fixed unitary (state-vector evolution).
    StaticUnitary,
    /// Symplectic/stabilizer representation of a Clifford operation.
    Clifford,
    /// H+S generators evaluated by state-vector term expansion.
    HPlusSTerms,
    /// H+S generators evaluated by Clifford term expansion.
    HPlusSCliffordTerms,
}

impl Parameterization {
    /// The evolution type this scheme implies when the caller asks for "auto".
    ///
    /// This rule table is the single source of truth for evotype inference;
    /// every component receives the resolved [`EvoType`] explicitly instead
    /// of re-deriving it.
    pub fn implied_evotype(self) -> EvoType {
        match self {
            Parameterization::Clifford => EvoType::Stabilizer,
            Parameterization::StaticUnitary => EvoType::StateVector,
            Parameterization::HPlusSTerms => EvoType::SvTerm,
            Parameterization::HPlusSCliffordTerms => EvoType::CTerm,
            _ => EvoType::DensityMatrix,
        }
    }

    /// True for the noise-channel (error-generator) schemes.
    pub fn is_lindblad(self) -> bool {
        matches!(
            self,
            Parameterization::CPTP
                | Parameterization::HPlusS
                | Parameterization::S
                | Parameterization::HPlusSTerms
                | Parameterization::HPlusSCliffordTerms
        )
    }

    /// Canonical name, matching the conventional scheme identifiers.
    pub fn name(self) -> &'static str {
        match self {
            Parameterization::Full => "full",
            Parameterization::TP => "TP",
            Parameterization::CPTP => "CPTP",
            Parameterization::HPlusS => "H+S",
            Parameterization::S => "S",
            Parameterization::Static => "static",
            Parameterization::StaticUnitary => "static unitary",
            Parameterization::Clifford => "clifford",
            Parameterization::HPlusSTerms => "H+S terms",
            Parameterization::HPlusSCliffordTerms => "H+S clifford terms",
        }
    }
}

impl fmt::Display for Parameterization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller's evolution-type request: explicit, or derived from the
/// parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvoTypeChoice {
    /// Derive the evolution type from the parameterization scheme.
    #[default]
    Auto,
    /// Use exactly this evolution type.
    Explicit(EvoType),
}

impl EvoTypeChoice {
    /// Resolve to a concrete evolution type.
    pub fn resolve(self, param: Parameterization) -> EvoType {
        match self {
            EvoTypeChoice::Auto => param.implied_evotype(),
            EvoTypeChoice::Explicit(e) => e,
        }
    }
}

/// Caller's simulation-mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimModeChoice {
    /// Pick dense or lazy based on evolution type and qubit count.
    #[default]
    Auto,
    /// Force explicit dense full-space matrices.
    Matrix,
    /// Force lazy operator-action application.
    Map,
}

/// Resolved simulation mode.
///
/// The two modes are numerically equivalent; the choice is a memory/speed
/// trade-off, not semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimMode {
    /// Dense full-space matrix representation.
    Matrix,
    /// Lazy operator-action representation.
    Map,
}

/// Largest density-matrix qubit count for which Auto picks dense matrices.
pub const DENSE_DENSITYMX_MAX_QUBITS: usize = 2;

/// Largest state-vector qubit count for which Auto picks dense matrices.
pub const DENSE_STATEVEC_MAX_QUBITS: usize = 4;

impl SimMode {
    /// Resolve a caller's request against the evolution type and qubit count.
    ///
    /// Stabilizer and term evolution always resolve to `Map` under `Auto`.
    pub fn resolve(choice: SimModeChoice, evotype: EvoType, n_qubits: usize) -> SimMode {
        match choice {
            SimModeChoice::Matrix => SimMode::Matrix,
            SimModeChoice::Map => SimMode::Map,
            SimModeChoice::Auto => match evotype {
                EvoType::DensityMatrix if n_qubits <= DENSE_DENSITYMX_MAX_QUBITS => {
                    SimMode::Matrix
                }
                EvoType::StateVector if n_qubits <= DENSE_STATEVEC_MAX_QUBITS => SimMode::Matrix,
                _ => SimMode::Map,
            },
        }
    }
}

/// Infer how many qudits an operator of dimension `dim` acts on.
///
/// The dimension must be an exact non-negative integer power of `qudit_dim`.
pub fn infer_width(dim: usize, qudit_dim: usize) -> OpsResult<usize> {
    debug_assert!(qudit_dim >= 2);
    let mut acc = 1usize;
    let mut width = 0usize;
    while acc < dim {
        acc *= qudit_dim;
        width += 1;
    }
    if acc == dim && dim > 0 {
        Ok(width)
    } else {
        Err(OpsError::InvalidOperatorDimension { dim, qudit_dim })
    }
}
