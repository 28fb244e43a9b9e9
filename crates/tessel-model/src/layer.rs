//! Layer resolution.
//!
//! Maps circuit-layer labels onto the operators of a built model. Multi-gate
//! layers are composed on demand and never cached back into the model.

use std::sync::Arc;

use tessel_ops::{ComposedOp, OpHandle, Povm, Prep};

use crate::error::{ModelError, ModelResult};
use crate::labels::LayerLabel;
use crate::model::LocalNoiseModel;

/// Resolves prep, measurement and gate-layer labels against a model.
#[derive(Debug, Clone, Copy)]
pub struct SimpleLayerResolver<'a> {
    model: &'a LocalNoiseModel,
}

impl<'a> SimpleLayerResolver<'a> {
    /// Wrap a built model.
    pub fn new(model: &'a LocalNoiseModel) -> Self {
        Self { model }
    }

    /// The state preparation for a prep label.
    pub fn prep(&self, label: &str) -> ModelResult<&'a Prep> {
        self.model
            .prep(label)
            .ok_or_else(|| ModelError::UnknownLayerLabel(label.to_string()))
    }

    /// The measurement for a POVM label.
    pub fn povm(&self, label: &str) -> ModelResult<&'a Povm> {
        self.model
            .povm(label)
            .ok_or_else(|| ModelError::UnknownLayerLabel(label.to_string()))
    }

    /// The operator for one circuit layer.
    ///
    /// A single-component layer returns the primitive handle itself (no
    /// allocation); an empty layer returns an identity-acting composition;
    /// several components compose in the given order into a transient
    /// operator.
    pub fn operation(&self, layer: &LayerLabel) -> ModelResult<OpHandle> {
        let components = layer.components();
        match components {
            [] => Ok(Arc::new(ComposedOp::identity(
                self.model.dim(),
                self.model.evotype(),
            ))),
            [single] => self
                .model
                .operation(single)
                .cloned()
                .ok_or_else(|| ModelError::UnknownLayerLabel(single.to_string())),
            several => {
                let mut factors = Vec::with_capacity(several.len());
                for label in several {
                    let op = self
                        .model
                        .operation(label)
                        .cloned()
                        .ok_or_else(|| ModelError::UnknownLayerLabel(label.to_string()))?;
                    factors.push(op);
                }
                let composed = ComposedOp::from_factors(factors)?;
                Ok(Arc::new(composed))
            }
        }
    }
}
