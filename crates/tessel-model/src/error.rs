//! Error types for model assembly.

use tessel_ops::OpsError;
use thiserror::Error;

/// Errors that can occur while assembling or querying a model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Geometry name not recognized.
    #[error("Unknown geometry '{0}' (expected line, ring, full or star)")]
    UnknownGeometry(String),

    /// Edge endpoint is not a member of the qubit-label set.
    #[error("Edge endpoint '{0}' is not a qubit of this topology")]
    UnknownEdgeEndpoint(String),

    /// Supplied qubit labels do not match the qubit count.
    #[error("Expected {expected} qubit labels, got {got}")]
    QubitLabelCountMismatch {
        /// Number of labels the topology requires.
        expected: usize,
        /// Number of labels supplied.
        got: usize,
    },

    /// A qubit label appears more than once.
    #[error("Duplicate qubit label '{0}'")]
    DuplicateQubitLabel(String),

    /// The all-edges placement policy is undefined for this gate width.
    #[error("Gate '{gate}' has width {width}; the all-edges policy only covers widths 1 and 2")]
    UnsupportedPlacementWidth {
        /// Name of the gate.
        gate: String,
        /// Native width of the gate.
        width: usize,
    },

    /// An explicit placement tuple has the wrong length.
    #[error("Gate '{gate}' requires {expected}-qubit placements, got one of length {got}")]
    PlacementWidthMismatch {
        /// Name of the gate.
        gate: String,
        /// Native width of the gate.
        expected: usize,
        /// Length of the offending tuple.
        got: usize,
    },

    /// A placement references a label outside the model's qubit set.
    #[error("Placement for gate '{gate}' references unknown qubit '{label}'")]
    UnknownPlacementLabel {
        /// Name of the gate.
        gate: String,
        /// The unrecognized label.
        label: String,
    },

    /// Standard-gate name not in the library.
    #[error("Unknown standard gate name '{0}'")]
    UnknownGateName(String),

    /// Layer-resolution lookup failed.
    #[error("Unknown layer label '{0}'")]
    UnknownLayerLabel(String),

    /// Operation lookup failed.
    #[error("Unknown operation label '{0}'")]
    UnknownOperation(String),

    /// The operation exists but is not a composed operator.
    #[error("Operation '{0}' is not a composed operator; noise cannot be appended")]
    NotComposed(String),

    /// A per-gate conversion or embedding failure, governed by the error
    /// policy.
    #[error("Failed to construct gate '{gate}'")]
    GateConstructionFailure {
        /// Name of the gate that failed.
        gate: String,
        /// The underlying operator-layer failure.
        #[source]
        source: OpsError,
    },

    /// Operator-layer error outside the per-gate construction path.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
