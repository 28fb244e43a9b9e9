//! Parameterized dense operators and the conversion entry point.
//!
//! [`convert`] turns a raw matrix (a pp-basis superoperator for
//! density-matrix-class evolution, a unitary otherwise) into a
//! fully-parameterized [`LinearOperator`] under a chosen scheme. Lindblad
//! conversion wraps the ideal operator with zero-initialized error-generator
//! coefficients, so the initial dense action equals the ideal gate.

use ndarray::Array2;
use num_complex::Complex64;
use std::sync::Arc;

use crate::basis::{square_dim, unitarity_deviation};
use crate::clifford::CliffordOp;
use crate::error::{OpsError, OpsResult};
use crate::linop::{LinearOperator, OpHandle};
use crate::param::{EvoType, Parameterization};

/// Numerical tolerance for structural matrix checks.
pub const CHECK_TOL: f64 = 1e-8;

/// A fixed operator with no free parameters.
#[derive(Debug, Clone)]
pub struct StaticDenseOp {
    mx: Array2<Complex64>,
    evotype: EvoType,
}

impl StaticDenseOp {
    /// Wrap a square matrix as a static operator.
    pub fn new(mx: Array2<Complex64>, evotype: EvoType) -> OpsResult<Self> {
        square_dim(&mx)?;
        Ok(Self { mx, evotype })
    }
}

impl LinearOperator for StaticDenseOp {
    fn dim(&self) -> usize {
        self.mx.nrows()
    }

    fn evotype(&self) -> EvoType {
        self.evotype
    }

    fn num_params(&self) -> usize {
        0
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.mx.clone()
    }
}

/// A fixed unitary for state-vector evolution.
#[derive(Debug, Clone)]
pub struct StaticUnitaryOp {
    mx: Array2<Complex64>,
}

impl StaticUnitaryOp {
    /// Wrap a unitary matrix; fails if the matrix is not unitary.
    pub fn new(mx: Array2<Complex64>) -> OpsResult<Self> {
        let deviation = unitarity_deviation(&mx)?;
        if deviation > CHECK_TOL {
            return Err(OpsError::NotUnitary { deviation });
        }
        Ok(Self { mx })
    }
}

impl LinearOperator for StaticUnitaryOp {
    fn dim(&self) -> usize {
        self.mx.nrows()
    }

    fn evotype(&self) -> EvoType {
        EvoType::StateVector
    }

    fn num_params(&self) -> usize {
        0
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.mx.clone()
    }
}

/// A superoperator whose every entry is a free parameter.
#[derive(Debug, Clone)]
pub struct FullDenseOp {
    mx: Array2<Complex64>,
    evotype: EvoType,
}

impl FullDenseOp {
    /// Wrap a square superoperator with a full parameterization.
    pub fn new(mx: Array2<Complex64>, evotype: EvoType) -> OpsResult<Self> {
        square_dim(&mx)?;
        Ok(Self { mx, evotype })
    }
}

impl LinearOperator for FullDenseOp {
    fn dim(&self) -> usize {
        self.mx.nrows()
    }

    fn evotype(&self) -> EvoType {
        self.evotype
    }

    fn num_params(&self) -> usize {
        let d = self.mx.nrows();
        d * d
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.mx.clone()
    }
}

/// A trace-preserving superoperator: the first row is fixed to (1, 0, …, 0)
/// and every other entry is a free parameter.
#[derive(Debug, Clone)]
pub struct TpDenseOp {
    mx: Array2<Complex64>,
    evotype: EvoType,
}

impl TpDenseOp {
    /// Wrap a superoperator; fails if its first row deviates from the
    /// trace-preservation constraint.
    pub fn new(mx: Array2<Complex64>, evotype: EvoType) -> OpsResult<Self> {
        let dim = square_dim(&mx)?;
        let mut deviation = (mx[[0, 0]] - Complex64::new(1.0, 0.0)).norm();
        for col in 1..dim {
            deviation = deviation.max(mx[[0, col]].norm());
        }
        if deviation > CHECK_TOL {
            return Err(OpsError::NotTracePreserving { deviation });
        }
        Ok(Self { mx, evotype })
    }
}

impl LinearOperator for TpDenseOp {
    fn dim(&self) -> usize {
        self.mx.nrows()
    }

    fn evotype(&self) -> EvoType {
        self.evotype
    }

    fn num_params(&self) -> usize {
        let d = self.mx.nrows();
        d * (d - 1)
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.mx.clone()
    }
}

/// An ideal superoperator wrapped with Lindblad error-generator
/// coefficients over the non-identity Pauli basis.
///
/// Coefficients start at zero, so the dense action equals the ideal gate
/// until an estimation layer adjusts them.
#[derive(Debug, Clone)]
pub struct LindbladDenseOp {
    mx: Array2<Complex64>,
    evotype: EvoType,
    ham_coeffs: Vec<f64>,
    other_coeffs: Vec<f64>,
}

impl LindbladDenseOp {
    /// Wrap an ideal superoperator under a Lindblad scheme.
    pub fn new(
        mx: Array2<Complex64>,
        param: Parameterization,
        evotype: EvoType,
    ) -> OpsResult<Self> {
        let dim = square_dim(&mx)?;
        let n_basis = dim - 1;
        let ham = match param {
            Parameterization::S => 0,
            _ => n_basis,
        };
        let other = match param {
            Parameterization::CPTP => n_basis * n_basis,
            _ => n_basis,
        };
        Ok(Self {
            mx,
            evotype,
            ham_coeffs: vec![0.0; ham],
            other_coeffs: vec![0.0; other],
        })
    }

    /// The Hamiltonian-block coefficients.
    pub fn ham_coeffs(&self) -> &[f64] {
        &self.ham_coeffs
    }

    /// The stochastic/other-block coefficients.
    pub fn other_coeffs(&self) -> &[f64] {
        &self.other_coeffs
    }
}

impl LinearOperator for LindbladDenseOp {
    fn dim(&self) -> usize {
        self.mx.nrows()
    }

    fn evotype(&self) -> EvoType {
        self.evotype
    }

    fn num_params(&self) -> usize {
        self.ham_coeffs.len() + self.other_coeffs.len()
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.mx.clone()
    }
}

/// Convert a raw matrix into a fully-parameterized operator.
///
/// For density-matrix-class evolution types the matrix is a pp-basis
/// superoperator; for state-vector and stabilizer evolution it is a unitary.
/// Scheme/evotype mismatches fail with
/// [`OpsError::UnsupportedParameterization`]; structural failures surface as
/// `NotUnitary`, `NotTracePreserving` or `NotClifford`.
pub fn convert(
    mx: &Array2<Complex64>,
    param: Parameterization,
    evotype: EvoType,
) -> OpsResult<OpHandle> {
    let unsupported = || OpsError::UnsupportedParameterization { param, evotype };
    match param {
        Parameterization::Static => {
            if evotype == EvoType::Stabilizer {
                return Err(unsupported());
            }
            Ok(Arc::new(StaticDenseOp::new(mx.clone(), evotype)?))
        }
        Parameterization::StaticUnitary => {
            if evotype != EvoType::StateVector {
                return Err(unsupported());
            }
            Ok(Arc::new(StaticUnitaryOp::new(mx.clone())?))
        }
        Parameterization::Full => {
            if !evotype.is_density_class() {
                return Err(unsupported());
            }
            Ok(Arc::new(FullDenseOp::new(mx.clone(), evotype)?))
        }
        Parameterization::TP => {
            if !evotype.is_density_class() {
                return Err(unsupported());
            }
            Ok(Arc::new(TpDenseOp::new(mx.clone(), evotype)?))
        }
        Parameterization::CPTP
        | Parameterization::HPlusS
        | Parameterization::S
        | Parameterization::HPlusSTerms
        | Parameterization::HPlusSCliffordTerms => {
            if !evotype.is_density_class() {
                return Err(unsupported());
            }
            Ok(Arc::new(LindbladDenseOp::new(mx.clone(), param, evotype)?))
        }
        Parameterization::Clifford => {
            if evotype != EvoType::Stabilizer {
                return Err(unsupported());
            }
            Ok(Arc::new(CliffordOp::from_unitary(mx)?))
        }
    }
}
