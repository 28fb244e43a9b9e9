//! `tessel-ops`: linear-operator algebra for qubit device models.
//!
//! Provides the operator layer that `tessel-model` assembles models from:
//!
//! - **Parameterized operators** (static, full, TP, Lindblad, Clifford)
//!   built from raw matrices via [`convert`]
//! - **Composition** ([`ComposedOp`]): ordered factor products with shared,
//!   append-visible factor lists
//! - **Embedding** ([`embed`]): lifting a k-qubit operator into an n-qubit
//!   space with identity action elsewhere
//! - **SPAM** ([`Prep`], [`Povm`]): state preparations and measurements
//!   addressed by bit-string effect labels
//! - **Basis math**: Pauli-product bases and unitary-to-superoperator
//!   conversion
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use ndarray::array;
//! use num_complex::Complex64;
//! use tessel_ops::{embed, EvoType, LinearOperator, OpHandle, SimMode, StaticDenseOp};
//!
//! let z = Complex64::new(0.0, 0.0);
//! let o = Complex64::new(1.0, 0.0);
//! let x = array![[z, o], [o, z]];
//!
//! let op: OpHandle = Arc::new(StaticDenseOp::new(x, EvoType::StateVector).unwrap());
//! let embedded = embed(op, &[1], 3, SimMode::Map).unwrap();
//! assert_eq!(embedded.dim(), 8);
//! ```

pub mod basis;
pub mod clifford;
pub mod compose;
pub mod dense;
pub mod embed;
pub mod error;
pub mod linop;
pub mod param;
pub mod spam;

pub use basis::{pauli_1q, pauli_product_basis, unitary_to_pp, unitary_to_process_mx};
pub use clifford::{CliffordOp, PauliImage};
pub use compose::ComposedOp;
pub use dense::{
    convert, FullDenseOp, LindbladDenseOp, StaticDenseOp, StaticUnitaryOp, TpDenseOp,
};
pub use embed::{embed, EmbeddedOp};
pub use error::{OpsError, OpsResult};
pub use linop::{LinearOperator, OpHandle};
pub use param::{
    infer_width, EvoType, EvoTypeChoice, Parameterization, SimMode, SimModeChoice,
};
pub use spam::{Povm, PovmFactor, Prep, PrepFactor};
