//! Property-based tests for operator embedding.
//!
//! Checks that embedding a single-qubit X acts as the expected index
//! permutation and that the dense and lazy application strategies agree on
//! arbitrary states and placements.

use ndarray::{array, Array1};
use num_complex::Complex64;
use proptest::prelude::*;
use std::sync::Arc;
use tessel_ops::{embed, EvoType, LinearOperator, OpHandle, SimMode, StaticDenseOp};

fn x_op() -> OpHandle {
    let z = Complex64::new(0.0, 0.0);
    let o = Complex64::new(1.0, 0.0);
    let m = array![[z, o], [o, z]];
    Arc::new(StaticDenseOp::new(m, EvoType::StateVector).unwrap())
}

fn arb_state(dim: usize) -> impl Strategy<Value = Array1<Complex64>> {
    prop::collection::vec((-1.0_f64..1.0, -1.0_f64..1.0), dim..=dim)
        .prop_map(|parts| parts.into_iter().map(|(re, im)| Complex64::new(re, im)).collect())
}

fn arb_placement() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..=6).prop_flat_map(|n| (Just(n), 0..n))
}

proptest! {
    /// X embedded at position p flips the bit with stride 2^(n−1−p).
    #[test]
    fn embedded_x_is_a_bit_flip((n, p) in arb_placement(), state in arb_state(64)) {
        let dim = 1usize << n;
        let state = state.slice(ndarray::s![..dim]).to_owned();
        let embedded = embed(x_op(), &[p], n, SimMode::Map).unwrap();
        let out = embedded.apply(state.view());

        let stride = 1usize << (n - 1 - p);
        for i in 0..dim {
            let src = i ^ stride;
            prop_assert!((out[i] - state[src]).norm() < 1e-12,
                "index {} should come from {}", i, src);
        }
    }

    /// Dense and lazy strategies produce the same action.
    #[test]
    fn map_and_matrix_agree((n, p) in arb_placement(), state in arb_state(64)) {
        let dim = 1usize << n;
        let state = state.slice(ndarray::s![..dim]).to_owned();
        let lazy = embed(x_op(), &[p], n, SimMode::Map).unwrap();
        let dense = embed(x_op(), &[p], n, SimMode::Matrix).unwrap();

        let a = lazy.apply(state.view());
        let b = dense.apply(state.view());
        for i in 0..dim {
            prop_assert!((a[i] - b[i]).norm() < 1e-12);
        }
    }

    /// Embedding preserves the factor's parameter count and widens its dim.
    #[test]
    fn embedding_preserves_params((n, p) in arb_placement()) {
        let embedded = embed(x_op(), &[p], n, SimMode::Map).unwrap();
        prop_assert_eq!(embedded.dim(), 1usize << n);
        prop_assert_eq!(embedded.num_params(), 0);
    }
}
