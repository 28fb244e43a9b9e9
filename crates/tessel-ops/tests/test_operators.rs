//! Cross-module tests for operator conversion, composition and embedding.

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;
use std::sync::Arc;
use tessel_ops::{
    convert, embed, unitary_to_pp, ComposedOp, EvoType, LinearOperator, OpHandle,
    Parameterization, Povm, Prep, SimMode,
};

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn x_unitary() -> Array2<Complex64> {
    array![[c(0.0), c(1.0)], [c(1.0), c(0.0)]]
}

fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    ndarray::linalg::kron(a, b)
}

// ---------------------------------------------------------------------------
// Conversion + embedding
// ---------------------------------------------------------------------------

#[test]
fn embedded_superoperator_matches_kron_of_channels() {
    // X on qubit 0 of 2, density-matrix evolution: the embedded pp-basis
    // superoperator must equal the pp superoperator of X ⊗ I.
    let x_pp = unitary_to_pp(&x_unitary(), 1).unwrap();
    let op = convert(&x_pp, Parameterization::Static, EvoType::DensityMatrix).unwrap();
    let embedded = embed(op, &[0], 2, SimMode::Matrix).unwrap();

    let eye = Array2::eye(2);
    let full = unitary_to_pp(&kron(&x_unitary(), &eye), 2).unwrap();
    let got = embedded.to_dense();
    assert_eq!(got.nrows(), 16);
    for i in 0..16 {
        for j in 0..16 {
            assert!((got[[i, j]] - full[[i, j]]).norm() < 1e-10, "({i},{j})");
        }
    }
}

#[test]
fn statevec_embedding_matches_kron_of_unitaries() {
    let op = convert(&x_unitary(), Parameterization::StaticUnitary, EvoType::StateVector).unwrap();
    let embedded = embed(op, &[1], 2, SimMode::Matrix).unwrap();

    let eye = Array2::eye(2);
    let full = kron(&eye, &x_unitary());
    let got = embedded.to_dense();
    for i in 0..4 {
        for j in 0..4 {
            assert!((got[[i, j]] - full[[i, j]]).norm() < 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// Shared composition through embeddings
// ---------------------------------------------------------------------------

#[test]
fn noise_appended_after_embedding_is_seen_by_all_placements() {
    // One shared ideal+noise composition embedded at two placements; a noise
    // factor appended afterwards must affect both embeddings.
    let x_pp = unitary_to_pp(&x_unitary(), 1).unwrap();
    let ideal = convert(&x_pp, Parameterization::Static, EvoType::DensityMatrix).unwrap();
    let shared = ComposedOp::from_factors(vec![ideal]).unwrap();
    let handle: OpHandle = Arc::new(shared.clone());

    let at0 = embed(handle.clone(), &[0], 2, SimMode::Map).unwrap();
    let at1 = embed(handle, &[1], 2, SimMode::Map).unwrap();
    assert_eq!(at0.num_params(), 0);

    // Undo the gate: append X again so each placement becomes identity.
    let undo = convert(&x_pp, Parameterization::Static, EvoType::DensityMatrix).unwrap();
    shared.append(undo).unwrap();

    let eye = Array2::<Complex64>::eye(16);
    for embedded in [&at0, &at1] {
        let m = embedded.to_dense();
        for i in 0..16 {
            for j in 0..16 {
                assert!((m[[i, j]] - eye[[i, j]]).norm() < 1e-10);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SPAM end-to-end probabilities
// ---------------------------------------------------------------------------

#[test]
fn x_gate_flips_measurement_outcome() {
    // p(label) = effect · (gate · prep) in the pp superket picture.
    let prep = Prep::Computational {
        zvals: vec![0],
        evotype: EvoType::DensityMatrix,
    };
    let povm = Povm::Computational {
        n_qubits: 1,
        evotype: EvoType::DensityMatrix,
    };
    let x_pp = unitary_to_pp(&x_unitary(), 1).unwrap();
    let gate = convert(&x_pp, Parameterization::Static, EvoType::DensityMatrix).unwrap();

    let rho = gate.apply(prep.to_dense().view());
    let p0: Complex64 = povm.effect("0").unwrap().dot(&rho);
    let p1: Complex64 = povm.effect("1").unwrap().dot(&rho);
    assert!(p0.norm() < 1e-10);
    assert!((p1 - c(1.0)).norm() < 1e-10);
}

#[test]
fn idle_two_qubit_model_measures_all_zeros() {
    let prep = Prep::Computational {
        zvals: vec![0, 0],
        evotype: EvoType::DensityMatrix,
    };
    let povm = Povm::Computational {
        n_qubits: 2,
        evotype: EvoType::DensityMatrix,
    };
    let rho = prep.to_dense();
    let probs: Vec<f64> = povm
        .effect_labels()
        .iter()
        .map(|l| povm.effect(l).unwrap().dot(&rho).re)
        .collect();
    assert!((probs[0] - 1.0).abs() < 1e-10);
    assert!(probs[1..].iter().all(|p| p.abs() < 1e-10));
    let total: f64 = probs.iter().sum();
    assert!((total - 1.0).abs() < 1e-10);
}

// ---------------------------------------------------------------------------
// Map-mode propagation of a small circuit
// ---------------------------------------------------------------------------

#[test]
fn map_mode_pipeline_matches_dense_pipeline() {
    let z = c(0.0);
    let o = c(1.0);
    let cnot = array![
        [o, z, z, z],
        [z, o, z, z],
        [z, z, z, o],
        [z, z, o, z]
    ];
    let x01 = convert(&x_unitary(), Parameterization::StaticUnitary, EvoType::StateVector).unwrap();
    let cnot01 =
        convert(&cnot, Parameterization::StaticUnitary, EvoType::StateVector).unwrap();

    let n = 3;
    let layer_map = ComposedOp::from_factors(vec![
        embed(x01.clone(), &[0], n, SimMode::Map).unwrap(),
        embed(cnot01.clone(), &[0, 1], n, SimMode::Map).unwrap(),
    ])
    .unwrap();
    let layer_dense = ComposedOp::from_factors(vec![
        embed(x01, &[0], n, SimMode::Matrix).unwrap(),
        embed(cnot01, &[0, 1], n, SimMode::Matrix).unwrap(),
    ])
    .unwrap();

    let mut state = Array1::zeros(1 << n);
    state[0] = o;
    let a = layer_map.apply(state.view());
    let b = layer_dense.apply(state.view());
    for i in 0..(1 << n) {
        assert!((a[i] - b[i]).norm() < 1e-12);
    }
    // X then CNOT on |000⟩ gives |110⟩ = index 6.
    assert!((a[6] - o).norm() < 1e-12);
}
