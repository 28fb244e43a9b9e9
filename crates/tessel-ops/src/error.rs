//! Error types for the operator-algebra crate.

use crate::param::{EvoType, Parameterization};
use thiserror::Error;

/// Errors produced by operator construction, conversion, embedding and
/// composition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    /// A matrix that must be square is not.
    #[error("operator is {rows}x{cols}, expected a square matrix")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Operator dimension does not match the targeted qudit positions.
    #[error(
        "operator dimension {op_dim} does not match {expected} for {n_qudits} \
         target qudit(s) of dimension {qudit_dim}"
    )]
    EmbeddingDimensionMismatch {
        /// Dimension of the operator being embedded.
        op_dim: usize,
        /// Expected dimension given the target tuple.
        expected: usize,
        /// Number of targeted qudits.
        n_qudits: usize,
        /// Per-qudit dimension of the evolution type.
        qudit_dim: usize,
    },

    /// Composed factors must share a total dimension.
    #[error("cannot compose an operator of dimension {got} with dimension {expected}")]
    OperatorDimensionMismatch {
        /// Dimension of the composition.
        expected: usize,
        /// Dimension of the offending factor.
        got: usize,
    },

    /// Composed factors must share an evolution type.
    #[error("cannot compose {got} evolution with {expected} evolution")]
    EvoTypeMismatch {
        /// Evolution type of the composition.
        expected: EvoType,
        /// Evolution type of the offending factor.
        got: EvoType,
    },

    /// Operator dimension is not an exact power of the per-qudit dimension.
    #[error(
        "operator dimension {dim} is not an integer power of the per-qudit \
         dimension {qudit_dim}"
    )]
    InvalidOperatorDimension {
        /// The operator dimension.
        dim: usize,
        /// Per-qudit dimension of the evolution type.
        qudit_dim: usize,
    },

    /// Parameterization scheme is incompatible with the evolution type.
    #[error("parameterization '{param}' is not supported for {evotype} evolution")]
    UnsupportedParameterization {
        /// The requested parameterization.
        param: Parameterization,
        /// The evolution type it was requested for.
        evotype: EvoType,
    },

    /// Matrix fails the unitarity check.
    #[error("matrix is not unitary (deviation {deviation:.2e})")]
    NotUnitary {
        /// Largest deviation of U·U† from the identity.
        deviation: f64,
    },

    /// Superoperator fails the trace-preservation check.
    #[error("superoperator is not trace-preserving (first row deviates by {deviation:.2e})")]
    NotTracePreserving {
        /// Largest deviation of the first row from (1, 0, ..., 0).
        deviation: f64,
    },

    /// Unitary does not normalize the Pauli group.
    #[error("unitary does not map Pauli operators to Pauli operators, so it is not a Clifford")]
    NotClifford,

    /// Composition with no factors has no inferrable dimension.
    #[error("cannot infer the dimension of an empty composition; use ComposedOp::identity")]
    EmptyComposition,

    /// An embedding target position is outside the full qudit ordering.
    #[error("embedding target position {position} is out of range for {n_qudits} qudit(s)")]
    PositionOutOfRange {
        /// The offending position.
        position: usize,
        /// Number of qudits in the full space.
        n_qudits: usize,
    },

    /// The embedding target tuple repeats a position.
    #[error("embedding target positions contain a duplicate")]
    DuplicatePosition,

    /// A POVM effect label was not recognized.
    #[error("unknown effect label '{0}'")]
    UnknownEffectLabel(String),
}

/// Result type for operator-algebra operations.
pub type OpsResult<T> = Result<T, OpsError>;
