//! Operator composition.
//!
//! A [`ComposedOp`] is an ordered sequence of same-shaped factors whose
//! action is their sequential application: `apply([A, B], x) = B(A(x))` and
//! `to_dense([A, B]) = B·A`. The factor list order is a caller contract
//! (typically ideal gate first, then noise channels).
//!
//! Composed operators are cheap-clone shared handles: every clone (and every
//! embedding built from one) observes factors appended later. `append` is
//! the only permitted post-construction mutation and is not a substitute for
//! external serialization; callers append during a single-threaded
//! finalize-noise phase.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use std::sync::{Arc, RwLock};

use crate::error::{OpsError, OpsResult};
use crate::linop::{LinearOperator, OpHandle};
use crate::param::EvoType;

/// An ordered product of same-dimension, same-evotype operators.
#[derive(Debug, Clone)]
pub struct ComposedOp {
    dim: usize,
    evotype: EvoType,
    factors: Arc<RwLock<Vec<OpHandle>>>,
}

impl ComposedOp {
    /// An identity-acting composition with zero factors.
    ///
    /// Useful as an attachment point for later [`append`](Self::append)
    /// calls.
    pub fn identity(dim: usize, evotype: EvoType) -> Self {
        Self {
            dim,
            evotype,
            factors: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Compose a non-empty list of factors.
    ///
    /// The first factor fixes the dimension and evolution type; every other
    /// factor must match.
    pub fn from_factors(factors: Vec<OpHandle>) -> OpsResult<Self> {
        let first = factors.first().ok_or(OpsError::EmptyComposition)?;
        let composed = Self::identity(first.dim(), first.evotype());
        for f in factors {
            composed.append(f)?;
        }
        Ok(composed)
    }

    /// Append a factor to the end of the composition.
    ///
    /// The appended factor becomes visible through every handle and
    /// embedding already sharing this composition.
    pub fn append(&self, factor: OpHandle) -> OpsResult<()> {
        if factor.dim() != self.dim {
            return Err(OpsError::OperatorDimensionMismatch {
                expected: self.dim,
                got: factor.dim(),
            });
        }
        if factor.evotype() != self.evotype {
            return Err(OpsError::EvoTypeMismatch {
                expected: self.evotype,
                got: factor.evotype(),
            });
        }
        self.factors
            .write()
            .expect("composed-op factor list lock poisoned")
            .push(factor);
        Ok(())
    }

    /// Snapshot of the current factor handles, in application order.
    pub fn factors(&self) -> Vec<OpHandle> {
        self.factors
            .read()
            .expect("composed-op factor list lock poisoned")
            .clone()
    }

    /// Number of factors currently composed.
    pub fn num_factors(&self) -> usize {
        self.factors
            .read()
            .expect("composed-op factor list lock poisoned")
            .len()
    }
}

impl LinearOperator for ComposedOp {
    fn dim(&self) -> usize {
        self.dim
    }

    fn evotype(&self) -> EvoType {
        self.evotype
    }

    fn num_params(&self) -> usize {
        self.factors().iter().map(|f| f.num_params()).sum()
    }

    fn to_dense(&self) -> Array2<Complex64> {
        let mut m = Array2::eye(self.dim);
        for f in self.factors() {
            m = f.to_dense().dot(&m);
        }
        m
    }

    fn apply(&self, state: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
        let mut v = state.to_owned();
        for f in self.factors() {
            v = f.apply(v.view());
        }
        v
    }

    fn as_composed(&self) -> Option<&ComposedOp> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::StaticDenseOp;
    use ndarray::array;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    fn x_op() -> OpHandle {
        let m = array![[c(0.0), c(1.0)], [c(1.0), c(0.0)]];
        Arc::new(StaticDenseOp::new(m, EvoType::StateVector).unwrap())
    }

    fn z_op() -> OpHandle {
        let m = array![[c(1.0), c(0.0)], [c(0.0), c(-1.0)]];
        Arc::new(StaticDenseOp::new(m, EvoType::StateVector).unwrap())
    }

    #[test]
    fn identity_has_no_factors() {
        let comp = ComposedOp::identity(4, EvoType::StateVector);
        assert_eq!(comp.num_factors(), 0);
        let m = comp.to_dense();
        assert_eq!(m[[0, 0]], c(1.0));
        assert_eq!(m[[0, 1]], c(0.0));
    }

    #[test]
    fn empty_composition_rejected() {
        assert!(matches!(
            ComposedOp::from_factors(vec![]),
            Err(OpsError::EmptyComposition)
        ));
    }

    #[test]
    fn ordered_product() {
        // [X, Z] applies X first, then Z: dense = Z·X = [[0,1],[-1,0]].
        let comp = ComposedOp::from_factors(vec![x_op(), z_op()]).unwrap();
        let m = comp.to_dense();
        assert_eq!(m[[0, 1]], c(1.0));
        assert_eq!(m[[1, 0]], c(-1.0));
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let comp = ComposedOp::identity(4, EvoType::StateVector);
        let err = comp.append(x_op()).unwrap_err();
        assert!(matches!(
            err,
            OpsError::OperatorDimensionMismatch {
                expected: 4,
                got: 2
            }
        ));
    }

    #[test]
    fn evotype_mismatch_rejected() {
        let comp = ComposedOp::identity(2, EvoType::Stabilizer);
        assert!(matches!(
            comp.append(x_op()),
            Err(OpsError::EvoTypeMismatch { .. })
        ));
    }

    #[test]
    fn append_visible_through_clones() {
        let comp = ComposedOp::from_factors(vec![x_op()]).unwrap();
        let alias = comp.clone();
        comp.append(z_op()).unwrap();
        assert_eq!(alias.num_factors(), 2);
    }

    #[test]
    fn associative_in_effect() {
        let (a, b, cc) = (x_op(), z_op(), x_op());
        let flat = ComposedOp::from_factors(vec![a.clone(), b.clone(), cc.clone()]).unwrap();
        let ab: OpHandle = Arc::new(ComposedOp::from_factors(vec![a, b]).unwrap());
        let nested = ComposedOp::from_factors(vec![ab, cc]).unwrap();
        let (mf, mn) = (flat.to_dense(), nested.to_dense());
        for r in 0..2 {
            for col in 0..2 {
                assert!((mf[[r, col]] - mn[[r, col]]).norm() < 1e-12);
            }
        }
    }
}
