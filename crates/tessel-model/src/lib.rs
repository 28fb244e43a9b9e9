//! `tessel-model`: n-qubit device model assembly.
//!
//! Expands a compact device description (a small library of local gates, a
//! connectivity geometry, an error-parameterization scheme) into a fully
//! specified operator model:
//!
//! - **Topology** ([`Topology`]): named or custom qubit connectivity
//! - **Availability** ([`AvailabilityPolicy`]): where each gate may be placed
//! - **Assembly** ([`LocalNoiseModelBuilder`]): SPAM operators plus one
//!   embedded, composed operator per gate placement
//! - **Layer resolution** ([`SimpleLayerResolver`]): simulation-time lookup
//!   and on-demand composition
//!
//! # Quick start
//!
//! ```rust
//! use tessel_model::{LocalNoiseModelBuilder, OpLabel};
//!
//! let model = LocalNoiseModelBuilder::new(2)
//!     .with_geometry("line")
//!     .with_standard_gate("Gx")
//!     .with_standard_gate("Gcnot")
//!     .build()
//!     .unwrap();
//!
//! // Gx on each qubit, Gcnot on each orientation of the single edge.
//! assert_eq!(model.primitive_op_labels().len(), 4);
//! assert_eq!(model.dim(), 16); // density-matrix evolution: 4^2
//! assert!(model.operation(&OpLabel::new("Gcnot", [1u32, 0])).is_some());
//! ```

pub mod availability;
pub mod builder;
pub mod error;
pub mod labels;
pub mod layer;
pub mod library;
pub mod model;
pub mod noise;
pub mod topology;

pub use availability::AvailabilityPolicy;
pub use builder::{ErrorPolicy, GateSpec, Geometry, LocalNoiseModelBuilder};
pub use error::{ModelError, ModelResult};
pub use labels::{LayerLabel, OpLabel, QubitLabel, QubitTuple, POVM_LABEL, PREP_LABEL};
pub use layer::SimpleLayerResolver;
pub use library::{standard_gate_names, standard_gate_unitary};
pub use model::LocalNoiseModel;
pub use noise::{GlobalNoiseBuilder, WeightOneGlobalNoise};
pub use topology::Topology;
