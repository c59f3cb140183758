//! Equipment library errors.

use lp_core::LpError;
use thiserror::Error;

pub type EquipmentResult<T> = Result<T, EquipmentError>;

#[derive(Error, Debug)]
pub enum EquipmentError {
    #[error("Duplicate {kind} variety: {variety}")]
    DuplicateVariety { kind: &'static str, variety: String },

    #[error("Invalid {kind} model '{variety}': {reason}")]
    InvalidModel {
        kind: &'static str,
        variety: String,
        reason: String,
    },

    #[error("Core error: {0}")]
    Core(#[from] LpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
