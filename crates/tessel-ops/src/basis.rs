//! Pauli-product bases and process-matrix conversion.
//!
//! Vectorization is row-major: `vec(UρU†) = (U ⊗ U*) vec(ρ)`, so the
//! process matrix of a unitary `U` in the standard basis is `U ⊗ conj(U)`.
//! The "pp" basis is the normalized Pauli-product basis (σ/√2 per qubit) in
//! lexicographic I, X, Y, Z order; process matrices of CPTP maps are real in
//! this basis up to numerical noise.

use ndarray::linalg::kron;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{OpsError, OpsResult};

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// The four unnormalized single-qubit Pauli matrices, in I, X, Y, Z order.
pub fn pauli_1q() -> [Array2<Complex64>; 4] {
    let z = c(0.0, 0.0);
    let o = c(1.0, 0.0);
    let i = c(0.0, 1.0);
    [
        ndarray::array![[o, z], [z, o]],
        ndarray::array![[z, o], [o, z]],
        ndarray::array![[z, -i], [i, z]],
        ndarray::array![[o, z], [z, -o]],
    ]
}

/// The unnormalized n-qubit Pauli-product basis, 4ⁿ matrices in
/// lexicographic I, X, Y, Z digit order (first qubit most significant).
pub fn pauli_product_basis(n_qubits: usize) -> Vec<Array2<Complex64>> {
    let paulis = pauli_1q();
    let count = 4usize.pow(n_qubits as u32);
    let mut out = Vec::with_capacity(count);
    for idx in 0..count {
        let mut m = Array2::eye(1);
        let mut rem = idx;
        let mut digits = vec![0usize; n_qubits];
        for q in (0..n_qubits).rev() {
            digits[q] = rem % 4;
            rem /= 4;
        }
        for &digit in &digits {
            m = kron(&m, &paulis[digit]);
        }
        out.push(m);
    }
    out
}

pub(crate) fn square_dim(m: &Array2<Complex64>) -> OpsResult<usize> {
    if m.nrows() != m.ncols() {
        return Err(OpsError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(m.nrows())
}

/// Largest deviation of `U·U†` from the identity.
pub fn unitarity_deviation(u: &Array2<Complex64>) -> OpsResult<f64> {
    let dim = square_dim(u)?;
    let prod = u.dot(&u.t().mapv(|x| x.conj()));
    let mut dev = 0.0f64;
    for r in 0..dim {
        for col in 0..dim {
            let expect = if r == col { c(1.0, 0.0) } else { c(0.0, 0.0) };
            dev = dev.max((prod[[r, col]] - expect).norm());
        }
    }
    Ok(dev)
}

/// The standard-basis process matrix of a unitary: `U ⊗ conj(U)`.
pub fn unitary_to_process_mx(u: &Array2<Complex64>) -> OpsResult<Array2<Complex64>> {
    square_dim(u)?;
    Ok(kron(u, &u.mapv(|x| x.conj())))
}

/// Row-major vectorization of a square matrix.
fn vec_row_major(m: &Array2<Complex64>) -> Array1<Complex64> {
    Array1::from_iter(m.iter().copied())
}

/// The unitary change-of-basis matrix from the pp basis to the standard
/// basis; columns are row-major vectorizations of the normalized Pauli
/// products.
fn pp_basis_matrix(n_qubits: usize) -> Array2<Complex64> {
    let dim = 4usize.pow(n_qubits as u32);
    let norm = c(INV_SQRT2.powi(n_qubits as i32), 0.0);
    let mut b = Array2::zeros((dim, dim));
    for (col, p) in pauli_product_basis(n_qubits).iter().enumerate() {
        let v = vec_row_major(p);
        for (row, val) in v.iter().enumerate() {
            b[[row, col]] = val * norm;
        }
    }
    b
}

/// Change a standard-basis process matrix into the pp basis: `B† M B`.
pub fn std_to_pp(m: &Array2<Complex64>, n_qubits: usize) -> OpsResult<Array2<Complex64>> {
    let dim = square_dim(m)?;
    let expected = 4usize.pow(n_qubits as u32);
    if dim != expected {
        return Err(OpsError::InvalidOperatorDimension { dim, qudit_dim: 4 });
    }
    let b = pp_basis_matrix(n_qubits);
    let b_dag = b.t().mapv(|x| x.conj());
    Ok(b_dag.dot(m).dot(&b))
}

/// Convert a unitary straight to its pp-basis process matrix.
pub fn unitary_to_pp(u: &Array2<Complex64>, n_qubits: usize) -> OpsResult<Array2<Complex64>> {
    std_to_pp(&unitary_to_process_mx(u)?, n_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn pauli_basis_is_orthogonal() {
        // tr(P_i† P_j) = 2ⁿ δ_ij for the unnormalized products.
        let basis = pauli_product_basis(1);
        for (i, p) in basis.iter().enumerate() {
            for (j, q) in basis.iter().enumerate() {
                let tr: Complex64 = p.t().mapv(|x| x.conj()).dot(q).diag().sum();
                let expect = if i == j { c(2.0, 0.0) } else { c(0.0, 0.0) };
                assert!(approx(tr, expect), "tr mismatch at ({i},{j})");
            }
        }
    }

    #[test]
    fn x_process_matrix_in_pp_basis_is_diagonal() {
        // XρX in the pp basis: I→I, X→X, Y→−Y, Z→−Z.
        let x = pauli_1q()[1].clone();
        let pp = unitary_to_pp(&x, 1).unwrap();
        let expect = [1.0, 1.0, -1.0, -1.0];
        for r in 0..4 {
            for col in 0..4 {
                let want = if r == col { c(expect[r], 0.0) } else { c(0.0, 0.0) };
                assert!(approx(pp[[r, col]], want), "entry ({r},{col})");
            }
        }
    }

    #[test]
    fn identity_process_matrix_is_identity() {
        let id = pauli_1q()[0].clone();
        let pp = unitary_to_pp(&id, 1).unwrap();
        for r in 0..4 {
            for col in 0..4 {
                let want = if r == col { c(1.0, 0.0) } else { c(0.0, 0.0) };
                assert!(approx(pp[[r, col]], want));
            }
        }
    }

    #[test]
    fn process_matrix_is_trace_preserving() {
        // First row of a unitary channel's pp process matrix is (1, 0, 0, 0).
        let h = ndarray::array![
            [c(INV_SQRT2, 0.0), c(INV_SQRT2, 0.0)],
            [c(INV_SQRT2, 0.0), c(-INV_SQRT2, 0.0)]
        ];
        let pp = unitary_to_pp(&h, 1).unwrap();
        assert!(approx(pp[[0, 0]], c(1.0, 0.0)));
        for col in 1..4 {
            assert!(approx(pp[[0, col]], c(0.0, 0.0)));
        }
    }

    #[test]
    fn non_square_rejected() {
        let m = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            unitary_to_process_mx(&m),
            Err(OpsError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn unitarity_check() {
        let x = pauli_1q()[1].clone();
        assert!(unitarity_deviation(&x).unwrap() < 1e-12);
        let not_u = ndarray::array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]];
        assert!(unitarity_deviation(&not_u).unwrap() > 0.1);
    }
}
