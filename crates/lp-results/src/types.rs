//! Result data types.

use lp_core::{ElementId, ElementKind, NetworkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RunId = String;

/// Measured effect of one element, as reported to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationStepResult {
    pub element_id: ElementId,
    pub element_type: ElementKind,
    pub input_power_dbm: f64,
    /// `None` while no noise has accumulated.
    pub input_osnr_db: Option<f64>,
    pub output_power_dbm: f64,
    pub output_osnr_db: Option<f64>,
    pub added_noise_mw: f64,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Consecutive path elements with no directed connection between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdjacencyWarning {
    pub from: ElementId,
    pub to: ElementId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResponse {
    pub path_results: Vec<SimulationStepResult>,
    pub final_osnr_db: Option<f64>,
    pub final_power_dbm: f64,
    #[serde(default)]
    pub warnings: Vec<AdjacencyWarning>,
    pub run_id: RunId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub network_id: NetworkId,
    pub network_name: String,
    pub path: Vec<ElementId>,
    pub input_power_dbm: f64,
    /// RFC 3339 UTC.
    pub timestamp: String,
    pub engine_version: String,
}
