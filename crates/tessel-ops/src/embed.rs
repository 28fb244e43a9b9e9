//! Operator embedding.
//!
//! [`embed`] lifts a k-qudit operator into an n-qudit space so that it acts
//! on the addressed positions (in the order given, which may permute qubits
//! relative to the operator's native definition) and as identity elsewhere.
//!
//! Index convention: the qudit at position p carries stride d^(n−1−p), i.e.
//! the first qudit in the full ordering is the most significant digit.
//!
//! The embedded operator never caches its dense matrix: if the wrapped
//! factor is a shared [`ComposedOp`](crate::compose::ComposedOp), factors
//! appended after embedding stay visible. The simulation mode only selects
//! the `apply` strategy: a dense full-space mat-vec for `Matrix`, a strided
//! gather/scatter that never materializes the full matrix for `Map`. Both
//! are numerically identical.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use std::sync::Arc;

use crate::error::{OpsError, OpsResult};
use crate::linop::{LinearOperator, OpHandle};
use crate::param::{EvoType, SimMode};

/// A k-qudit operator lifted into an n-qudit space.
#[derive(Debug)]
pub struct EmbeddedOp {
    factor: OpHandle,
    positions: Vec<usize>,
    n_qudits: usize,
    qudit_dim: usize,
    dim: usize,
    sub_dim: usize,
    mode: SimMode,
    /// Full-space index offset of each sub-space basis index.
    offsets: Vec<usize>,
    /// Positions not targeted, ascending.
    others: Vec<usize>,
}

/// Embed `op` at the given positions of an `n_qudits`-wide space.
///
/// Targeting every position in natural order is the identity wrapping: the
/// input handle is returned unchanged (pointer-equal), so no work is wasted
/// when the operator already spans the full space in order.
pub fn embed(
    op: OpHandle,
    positions: &[usize],
    n_qudits: usize,
    mode: SimMode,
) -> OpsResult<OpHandle> {
    let qudit_dim = op.evotype().qudit_dim();
    let k = positions.len();

    for &p in positions {
        if p >= n_qudits {
            return Err(OpsError::PositionOutOfRange {
                position: p,
                n_qudits,
            });
        }
    }
    let mut seen = vec![false; n_qudits];
    for &p in positions {
        if seen[p] {
            return Err(OpsError::DuplicatePosition);
        }
        seen[p] = true;
    }

    let expected = qudit_dim.pow(k as u32);
    if op.dim() != expected {
        return Err(OpsError::EmbeddingDimensionMismatch {
            op_dim: op.dim(),
            expected,
            n_qudits: k,
            qudit_dim,
        });
    }

    // Identity optimization: the target tuple equals the full ordering.
    if k == n_qudits && positions.iter().copied().eq(0..n_qudits) {
        return Ok(op);
    }

    let dim = qudit_dim.pow(n_qudits as u32);
    let strides: Vec<usize> = (0..n_qudits)
        .map(|p| qudit_dim.pow((n_qudits - 1 - p) as u32))
        .collect();
    let mut offsets = vec![0usize; expected];
    for (i, offset) in offsets.iter_mut().enumerate() {
        let mut rem = i;
        for t in (0..k).rev() {
            *offset += (rem % qudit_dim) * strides[positions[t]];
            rem /= qudit_dim;
        }
    }
    let others: Vec<usize> = (0..n_qudits).filter(|p| !seen[*p]).collect();

    Ok(Arc::new(EmbeddedOp {
        factor: op,
        positions: positions.to_vec(),
        n_qudits,
        qudit_dim,
        dim,
        sub_dim: expected,
        mode,
        offsets,
        others,
    }))
}

impl EmbeddedOp {
    /// The target positions within the full ordering.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// The wrapped operator.
    pub fn factor(&self) -> &OpHandle {
        &self.factor
    }

    /// Base offsets of every assignment of the non-target qudits.
    fn bases(&self) -> Vec<usize> {
        let n_other = self.others.len();
        let count = self.qudit_dim.pow(n_other as u32);
        let stride_of = |p: usize| self.qudit_dim.pow((self.n_qudits - 1 - p) as u32);
        let mut out = Vec::with_capacity(count);
        for a in 0..count {
            let mut base = 0usize;
            let mut rem = a;
            for m in (0..n_other).rev() {
                base += (rem % self.qudit_dim) * stride_of(self.others[m]);
                rem /= self.qudit_dim;
            }
            out.push(base);
        }
        out
    }
}

impl LinearOperator for EmbeddedOp {
    fn dim(&self) -> usize {
        self.dim
    }

    fn evotype(&self) -> EvoType {
        self.factor.evotype()
    }

    fn num_params(&self) -> usize {
        self.factor.num_params()
    }

    fn to_dense(&self) -> Array2<Complex64> {
        let f = self.factor.to_dense();
        let mut m = Array2::zeros((self.dim, self.dim));
        for base in self.bases() {
            for i in 0..self.sub_dim {
                for j in 0..self.sub_dim {
                    m[[base + self.offsets[i], base + self.offsets[j]]] = f[[i, j]];
                }
            }
        }
        m
    }

    fn apply(&self, state: ArrayView1<'_, Complex64>) -> Array1<Complex64> {
        match self.mode {
            SimMode::Matrix => self.to_dense().dot(&state),
            SimMode::Map => {
                let f = self.factor.to_dense();
                let mut out = Array1::zeros(self.dim);
                for base in self.bases() {
                    for i in 0..self.sub_dim {
                        let mut acc = Complex64::new(0.0, 0.0);
                        for j in 0..self.sub_dim {
                            acc += f[[i, j]] * state[base + self.offsets[j]];
                        }
                        out[base + self.offsets[i]] = acc;
                    }
                }
                out
            }
        }
    }
}
