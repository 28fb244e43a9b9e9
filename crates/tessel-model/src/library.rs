//! Built-in gate unitaries.
//!
//! Names follow the usual gate-set tomography conventions: `Gx`/`Gy`/`Gz`
//! are π/2 rotations, `Gxpi`/`Gypi`/`Gzpi` are π rotations (the Pauli
//! matrices up to global phase), `Gp` is the S gate.

use ndarray::{array, Array2};
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

use crate::error::{ModelError, ModelResult};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn rotation(axis: [f64; 3], theta: f64) -> Array2<Complex64> {
    let (cos, sin) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    let [x, y, z] = axis;
    // exp(-i θ/2 n·σ) = cos I − i sin (n·σ)
    array![
        [c(cos, -sin * z), c(-sin * y, -sin * x)],
        [c(sin * y, -sin * x), c(cos, sin * z)]
    ]
}

/// The unitary for a standard gate name.
///
/// Fails with [`ModelError::UnknownGateName`] for anything not in the table.
pub fn standard_gate_unitary(name: &str) -> ModelResult<Array2<Complex64>> {
    let z = c(0.0, 0.0);
    let o = c(1.0, 0.0);
    let s = FRAC_1_SQRT_2;
    Ok(match name {
        "Gi" => Array2::eye(2),
        "Gx" => rotation([1.0, 0.0, 0.0], FRAC_PI_2),
        "Gy" => rotation([0.0, 1.0, 0.0], FRAC_PI_2),
        "Gz" => rotation([0.0, 0.0, 1.0], FRAC_PI_2),
        "Gxpi" => array![[z, o], [o, z]],
        "Gypi" => array![[z, c(0.0, -1.0)], [c(0.0, 1.0), z]],
        "Gzpi" => array![[o, z], [z, -o]],
        "Gh" => array![[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]],
        "Gp" => array![[o, z], [z, c(0.0, 1.0)]],
        "Gcphase" => array![
            [o, z, z, z],
            [z, o, z, z],
            [z, z, o, z],
            [z, z, z, -o]
        ],
        "Gcnot" => array![
            [o, z, z, z],
            [z, o, z, z],
            [z, z, z, o],
            [z, z, o, z]
        ],
        "Gswap" => array![
            [o, z, z, z],
            [z, z, o, z],
            [z, o, z, z],
            [z, z, z, o]
        ],
        other => return Err(ModelError::UnknownGateName(other.to_string())),
    })
}

/// All built-in gate names, single-qubit gates first.
pub fn standard_gate_names() -> &'static [&'static str] {
    &[
        "Gi", "Gx", "Gy", "Gz", "Gxpi", "Gypi", "Gzpi", "Gh", "Gp", "Gcphase", "Gcnot", "Gswap",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_ops::basis::unitarity_deviation;

    #[test]
    fn every_standard_gate_is_unitary() {
        for name in standard_gate_names() {
            let u = standard_gate_unitary(name).unwrap();
            assert!(
                unitarity_deviation(&u).unwrap() < 1e-12,
                "{name} is not unitary"
            );
        }
    }

    #[test]
    fn pi_rotations_square_to_identity() {
        for name in ["Gxpi", "Gypi", "Gzpi"] {
            let u = standard_gate_unitary(name).unwrap();
            let sq = u.dot(&u);
            assert!((sq[[0, 0]] - c(1.0, 0.0)).norm() < 1e-12);
            assert!(sq[[0, 1]].norm() < 1e-12);
        }
    }

    #[test]
    fn gx_squared_is_x_up_to_phase() {
        let gx = standard_gate_unitary("Gx").unwrap();
        let sq = gx.dot(&gx);
        // (Gx)² = exp(-iπ/2 X) = -iX.
        assert!((sq[[0, 1]] - c(0.0, -1.0)).norm() < 1e-12);
        assert!(sq[[0, 0]].norm() < 1e-12);
    }

    #[test]
    fn widths() {
        assert_eq!(standard_gate_unitary("Gh").unwrap().nrows(), 2);
        assert_eq!(standard_gate_unitary("Gcnot").unwrap().nrows(), 4);
    }

    #[test]
    fn unknown_name_rejected() {
        assert!(matches!(
            standard_gate_unitary("Gnope"),
            Err(ModelError::UnknownGateName(_))
        ));
    }
}
