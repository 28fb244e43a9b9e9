//! The linear-operator trait seam.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use std::fmt::Debug;
use std::sync::Arc;

use crate::compose::ComposedOp;
use crate::param::EvoType;

/// A fully-parameterized operator acting on a (possibly embedded) state
/// space.
///
/// Every operator in an assembled model implements this trait: static and
/// parameterized dense operators, Clifford operations, compositions and
/// embeddings. Dense and lazy representations of the same operator must be
/// numerically equivalent; `to_dense` is always available while `apply` may
/// avoid materializing the full matrix.
pub trait LinearOperator: Debug + Send + Sync {
    /// Total dimension of the space the operator acts on.
    fn dim(&self) -> usize;

    /// The evolution type this operator participates in.
    fn evotype(&self) -> EvoType;

    /// Number of free parameters.
    fn num_params(&self) -> usize;

    /// Dense matrix representation.
    fn to_dense(&self) -> Array2<Complex64>;

    /// Apply the operator to a state/process vector.
    fn apply(&self, state: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
        self.to_dense().dot(&state)
    }

    /// Downcast hook for the narrow factor-append API on composed operators.
    fn as_composed(&self) -> Option<&ComposedOp> {
        None
    }
}

/// Shared-ownership handle to an operator.
///
/// Handles are cloned freely: the same underlying operator may be referenced
/// by several embeddings and by the model dictionary at once.
pub type OpHandle = Arc<dyn LinearOperator>;
