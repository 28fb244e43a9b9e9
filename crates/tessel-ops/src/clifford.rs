//! Clifford operators in symplectic form.
//!
//! A unitary is a Clifford exactly when it maps every Pauli operator to a
//! single Pauli operator times a phase in {±1, ±i}. Conversion conjugates
//! each X/Z generator through the unitary and decomposes the image in the
//! Pauli-product basis; anything with a spread-out image (the T gate, say)
//! is rejected.

use ndarray::Array2;
use num_complex::Complex64;

use crate::basis::{pauli_product_basis, square_dim, unitarity_deviation};
use crate::error::{OpsError, OpsResult};
use crate::linop::LinearOperator;
use crate::param::{infer_width, EvoType};

const PHASE_TOL: f64 = 1e-8;

/// The image of one Pauli-group generator under conjugation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauliImage {
    /// X bits of the image Pauli product, qubit 0 in bit 0.
    pub x_bits: u32,
    /// Z bits of the image Pauli product.
    pub z_bits: u32,
    /// Phase of the image, one of ±1, ±i.
    pub phase: Complex64,
}

/// A Clifford operation for stabilizer evolution.
///
/// Stores the symplectic image table of the X and Z generators (in that
/// order, qubit-ascending within each block) plus the unitary itself as a
/// dense fallback.
#[derive(Debug, Clone)]
pub struct CliffordOp {
    n_qubits: usize,
    unitary: Array2<Complex64>,
    images: Vec<PauliImage>,
}

impl CliffordOp {
    /// Convert a unitary into symplectic form.
    ///
    /// Fails with [`OpsError::NotClifford`] if any generator image is not a
    /// single Pauli product with phase in {±1, ±i}.
    pub fn from_unitary(u: &Array2<Complex64>) -> OpsResult<Self> {
        let dim = square_dim(u)?;
        let n_qubits = infer_width(dim, 2)?;
        let deviation = unitarity_deviation(u)?;
        if deviation > PHASE_TOL {
            return Err(OpsError::NotUnitary { deviation });
        }

        let basis = pauli_product_basis(n_qubits);
        let u_dag = u.t().mapv(|x| x.conj());
        let mut images = Vec::with_capacity(2 * n_qubits);
        for generator in generator_indices(n_qubits) {
            let image = u.dot(&basis[generator]).dot(&u_dag);
            images.push(decompose_single_pauli(&image, &basis, n_qubits)?);
        }
        Ok(Self {
            n_qubits,
            unitary: u.clone(),
            images,
        })
    }

    /// Number of qubits the Clifford acts on.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The generator image table: X_0..X_{k-1} then Z_0..Z_{k-1}.
    pub fn images(&self) -> &[PauliImage] {
        &self.images
    }
}

impl LinearOperator for CliffordOp {
    fn dim(&self) -> usize {
        self.unitary.nrows()
    }

    fn evotype(&self) -> EvoType {
        EvoType::Stabilizer
    }

    fn num_params(&self) -> usize {
        0
    }

    fn to_dense(&self) -> Array2<Complex64> {
        self.unitary.clone()
    }
}

/// Basis indices of the X_i and Z_i generators within the lexicographic
/// I,X,Y,Z Pauli-product ordering (first qubit most significant).
fn generator_indices(n_qubits: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(2 * n_qubits);
    for digit in [1usize, 3] {
        for q in 0..n_qubits {
            // Digit at qubit q, identity elsewhere.
            out.push(digit * 4usize.pow((n_qubits - 1 - q) as u32));
        }
    }
    out
}

/// Decompose a matrix over the Pauli-product basis and require a single
/// component with phase in {±1, ±i}.
fn decompose_single_pauli(
    m: &Array2<Complex64>,
    basis: &[Array2<Complex64>],
    n_qubits: usize,
) -> OpsResult<PauliImage> {
    let norm = 2f64.powi(n_qubits as i32);
    let mut found: Option<(usize, Complex64)> = None;
    for (idx, p) in basis.iter().enumerate() {
        // tr(P† M) / 2ⁿ
        let tr: Complex64 = p
            .t()
            .mapv(|x| x.conj())
            .dot(m)
            .diag()
            .sum();
        let coeff = tr / norm;
        if coeff.norm() < PHASE_TOL {
            continue;
        }
        if found.is_some() || (coeff.norm() - 1.0).abs() > PHASE_TOL {
            return Err(OpsError::NotClifford);
        }
        if !is_quarter_phase(coeff) {
            return Err(OpsError::NotClifford);
        }
        found = Some((idx, coeff));
    }
    let (idx, phase) = found.ok_or(OpsError::NotClifford)?;

    let mut x_bits = 0u32;
    let mut z_bits = 0u32;
    let mut rem = idx;
    for q in (0..n_qubits).rev() {
        let digit = rem % 4;
        rem /= 4;
        // 1 = X, 2 = Y (X and Z), 3 = Z.
        if digit == 1 || digit == 2 {
            x_bits |= 1 << q;
        }
        if digit == 2 || digit == 3 {
            z_bits |= 1 << q;
        }
    }
    Ok(PauliImage {
        x_bits,
        z_bits,
        phase,
    })
}

fn is_quarter_phase(c: Complex64) -> bool {
    [
        Complex64::new(1.0, 0.0),
        Complex64::new(-1.0, 0.0),
        Complex64::new(0.0, 1.0),
        Complex64::new(0.0, -1.0),
    ]
    .iter()
    .any(|p| (c - p).norm() < PHASE_TOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::FRAC_1_SQRT_2 as S;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn hadamard_is_clifford() {
        let h = array![[c(S, 0.0), c(S, 0.0)], [c(S, 0.0), c(-S, 0.0)]];
        let op = CliffordOp::from_unitary(&h).unwrap();
        assert_eq!(op.n_qubits(), 1);
        // H X H = Z, H Z H = X.
        assert_eq!(op.images()[0].z_bits, 1);
        assert_eq!(op.images()[0].x_bits, 0);
        assert_eq!(op.images()[1].x_bits, 1);
        assert_eq!(op.images()[1].z_bits, 0);
    }

    #[test]
    fn phase_gate_is_clifford() {
        // S X S† = Y (phase +1 with our Y convention: S X S† = i·XZ = Y).
        let s_gate = array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]];
        let op = CliffordOp::from_unitary(&s_gate).unwrap();
        let x_image = op.images()[0];
        assert_eq!(x_image.x_bits, 1);
        assert_eq!(x_image.z_bits, 1);
    }

    #[test]
    fn t_gate_is_not_clifford() {
        let t = array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(S, S)]];
        assert!(matches!(
            CliffordOp::from_unitary(&t),
            Err(OpsError::NotClifford)
        ));
    }

    #[test]
    fn cnot_is_clifford() {
        let z = c(0.0, 0.0);
        let o = c(1.0, 0.0);
        let cnot = array![
            [o, z, z, z],
            [z, o, z, z],
            [z, z, z, o],
            [z, z, o, z]
        ];
        let op = CliffordOp::from_unitary(&cnot).unwrap();
        assert_eq!(op.n_qubits(), 2);
        // CNOT maps X⊗I to X⊗X (control X propagates to the target).
        let x0_image = op.images()[0];
        assert_eq!(x0_image.x_bits, 0b11);
        assert_eq!(x0_image.z_bits, 0);
    }

    #[test]
    fn non_unitary_rejected() {
        let m = array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]];
        assert!(matches!(
            CliffordOp::from_unitary(&m),
            Err(OpsError::NotUnitary { .. })
        ));
    }
}
