//! State-preparation and measurement (SPAM) objects.
//!
//! Preps are column vectors in the model's evolution space (pp-basis
//! superket for density-matrix-class evolution, amplitude vector
//! otherwise); POVM effects are the matching dual vectors, looked up by
//! computational-basis bit-string labels. The all-zero stabilizer state
//! exposes its computational state-vector as a dense fallback, so every
//! variant stays total.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{OpsError, OpsResult};
use crate::linop::{LinearOperator, OpHandle};
use crate::param::{EvoType, Parameterization};

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// The single-qubit computational vector for one classical bit value.
///
/// For density-matrix-class evolution this is the pp-basis superket of
/// |b⟩⟨b| = (I ± Z)/2; otherwise the amplitude basis vector.
pub fn computational_1q(bit: u8, evotype: EvoType) -> Array1<Complex64> {
    let z = Complex64::new(0.0, 0.0);
    if evotype.is_density_class() {
        let sign = if bit == 0 { INV_SQRT2 } else { -INV_SQRT2 };
        ndarray::array![
            Complex64::new(INV_SQRT2, 0.0),
            z,
            z,
            Complex64::new(sign, 0.0)
        ]
    } else if bit == 0 {
        ndarray::array![Complex64::new(1.0, 0.0), z]
    } else {
        ndarray::array![z, Complex64::new(1.0, 0.0)]
    }
}

fn kron_vec(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array1<Complex64> {
    let mut out = Array1::zeros(a.len() * b.len());
    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i * b.len() + j] = av * bv;
        }
    }
    out
}

fn tensor_all(parts: impl Iterator<Item = Array1<Complex64>>) -> Array1<Complex64> {
    let mut acc = ndarray::array![Complex64::new(1.0, 0.0)];
    for p in parts {
        acc = kron_vec(&acc, &p);
    }
    acc
}

/// A single-qubit parameterized prep factor.
#[derive(Debug, Clone)]
pub struct PrepFactor {
    vec: Array1<Complex64>,
    parameterization: Parameterization,
}

impl PrepFactor {
    /// A computational |b⟩ factor under the given scheme.
    pub fn computational(bit: u8, parameterization: Parameterization, evotype: EvoType) -> Self {
        Self {
            vec: computational_1q(bit, evotype),
            parameterization,
        }
    }

    /// Dense vector of this factor.
    pub fn to_dense(&self) -> Array1<Complex64> {
        self.vec.clone()
    }

    /// Free parameters of this factor.
    pub fn num_params(&self) -> usize {
        match self.parameterization {
            Parameterization::TP => 3,
            Parameterization::Full => 4,
            _ => 0,
        }
    }
}

/// A state-preparation operator.
#[derive(Debug, Clone)]
pub enum Prep {
    /// A fixed computational basis state, one z-value per qubit.
    Computational {
        /// Classical bit per qubit, first qubit most significant.
        zvals: Vec<u8>,
        /// Evolution type (fixes the per-qubit dimension).
        evotype: EvoType,
    },
    /// A tensor product of single-qubit parameterized factors.
    TensorProduct {
        /// One factor per qubit, in qubit order.
        factors: Vec<PrepFactor>,
    },
    /// The all-zero stabilizer state.
    Stabilizer {
        /// Number of qubits.
        n_qubits: usize,
    },
    /// A perfect prep followed by a shared noise map.
    Noisy {
        /// The underlying perfect preparation.
        pure: Box<Prep>,
        /// The noise channel applied after preparation.
        noise: OpHandle,
    },
}

impl Prep {
    /// Number of qubits prepared.
    pub fn n_qubits(&self) -> usize {
        match self {
            Prep::Computational { zvals, .. } => zvals.len(),
            Prep::TensorProduct { factors } => factors.len(),
            Prep::Stabilizer { n_qubits } => *n_qubits,
            Prep::Noisy { pure, .. } => pure.n_qubits(),
        }
    }

    /// Total free parameters.
    pub fn num_params(&self) -> usize {
        match self {
            Prep::Computational { .. } | Prep::Stabilizer { .. } => 0,
            Prep::TensorProduct { factors } => factors.iter().map(|f| f.num_params()).sum(),
            Prep::Noisy { pure, noise } => pure.num_params() + noise.num_params(),
        }
    }

    /// Dense vector representation.
    pub fn to_dense(&self) -> Array1<Complex64> {
        match self {
            Prep::Computational { zvals, evotype } => {
                tensor_all(zvals.iter().map(|&b| computational_1q(b, *evotype)))
            }
            Prep::TensorProduct { factors } => tensor_all(factors.iter().map(|f| f.to_dense())),
            Prep::Stabilizer { n_qubits } => {
                // The all-zero stabilizer state is |0…0⟩.
                let mut v = Array1::zeros(1usize << n_qubits);
                v[0] = Complex64::new(1.0, 0.0);
                v
            }
            Prep::Noisy { pure, noise } => noise.to_dense().dot(&pure.to_dense()),
        }
    }
}

/// A single-qubit parameterized POVM factor with "0"/"1" effects.
#[derive(Debug, Clone)]
pub struct PovmFactor {
    effects: [Array1<Complex64>; 2],
    parameterization: Parameterization,
}

impl PovmFactor {
    /// The computational {"0", "1"} factor under the given scheme.
    pub fn computational(parameterization: Parameterization, evotype: EvoType) -> Self {
        Self {
            effects: [computational_1q(0, evotype), computational_1q(1, evotype)],
            parameterization,
        }
    }

    /// Effect vector for a single bit.
    pub fn effect(&self, bit: u8) -> Array1<Complex64> {
        self.effects[usize::from(bit)].clone()
    }

    /// Free parameters of this factor.
    pub fn num_params(&self) -> usize {
        match self.parameterization {
            Parameterization::TP => 4,
            Parameterization::Full => 8,
            _ => 0,
        }
    }
}

/// A measurement (POVM) with computational-basis bit-string effect labels.
#[derive(Debug, Clone)]
pub enum Povm {
    /// The perfect computational-basis measurement.
    Computational {
        /// Number of qubits measured.
        n_qubits: usize,
        /// Evolution type (fixes the per-qubit dimension).
        evotype: EvoType,
    },
    /// A tensor product of single-qubit parameterized factors.
    TensorProduct {
        /// One factor per qubit, in qubit order.
        factors: Vec<PovmFactor>,
    },
    /// A computational measurement preceded by a shared noise map.
    Noisy {
        /// Number of qubits measured.
        n_qubits: usize,
        /// Evolution type.
        evotype: EvoType,
        /// The noise channel absorbed into the effects.
        noise: OpHandle,
    },
}

impl Povm {
    /// Number of qubits measured.
    pub fn n_qubits(&self) -> usize {
        match self {
            Povm::Computational { n_qubits, .. } | Povm::Noisy { n_qubits, .. } => *n_qubits,
            Povm::TensorProduct { factors } => factors.len(),
        }
    }

    /// All effect labels, in counting order ("00", "01", …).
    pub fn effect_labels(&self) -> Vec<String> {
        let n = self.n_qubits();
        (0..1usize << n)
            .map(|i| format!("{i:0width$b}", width = n))
            .collect()
    }

    /// Total free parameters.
    pub fn num_params(&self) -> usize {
        match self {
            Povm::Computational { .. } => 0,
            Povm::TensorProduct { factors } => factors.iter().map(|f| f.num_params()).sum(),
            Povm::Noisy { noise, .. } => noise.num_params(),
        }
    }

    fn parse_label(&self, label: &str) -> OpsResult<Vec<u8>> {
        let n = self.n_qubits();
        if label.len() != n || !label.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(OpsError::UnknownEffectLabel(label.to_string()));
        }
        Ok(label.bytes().map(|b| b - b'0').collect())
    }

    /// Dense effect vector for a bit-string label.
    pub fn effect(&self, label: &str) -> OpsResult<Array1<Complex64>> {
        let bits = self.parse_label(label)?;
        match self {
            Povm::Computational { evotype, .. } => {
                Ok(tensor_all(bits.iter().map(|&b| computational_1q(b, *evotype))))
            }
            Povm::TensorProduct { factors } => Ok(tensor_all(
                bits.iter().zip(factors).map(|(&b, f)| f.effect(b)),
            )),
            Povm::Noisy { evotype, noise, .. } => {
                let base = tensor_all(bits.iter().map(|&b| computational_1q(b, *evotype)));
                // Effects absorb the noise map by adjoint action.
                Ok(noise.to_dense().t().dot(&base))
            }
        }
    }
}

/// The pp-basis superket of the identity matrix.
#[doc(hidden)]
pub fn trace_superket(n_qubits: usize) -> Array1<Complex64> {
    // The pp-basis superket of the identity: √2ⁿ on the all-identity
    // component, zero elsewhere.
    let dim = 4usize.pow(n_qubits as u32);
    let mut v = Array1::zeros(dim);
    v[0] = Complex64::new(2f64.powi(n_qubits as i32).sqrt(), 0.0);
    v
}
