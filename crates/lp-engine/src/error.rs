//! Error types for propagation.

use lp_core::{ElementId, ElementKind, LpError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Path must start with a Transceiver, found {kind} '{id}'")]
    InvalidPathStart { id: ElementId, kind: ElementKind },

    #[error("Amplifier '{id}' has no usable model: {reason}")]
    MissingAmplifierModel { id: ElementId, reason: String },

    #[error("ROADM '{id}' references unknown equipment variety '{variety}'")]
    MissingRoadmModel { id: ElementId, variety: String },

    #[error("Path has no element to propagate through after the launch transceiver")]
    EmptyPropagation,

    #[error("Internal engine error: {what}")]
    Internal { what: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<LpError> for EngineError {
    fn from(e: LpError) -> Self {
        EngineError::Internal {
            what: e.to_string(),
        }
    }
}
