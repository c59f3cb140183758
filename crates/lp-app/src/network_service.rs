//! Network file loading, saving and introspection.

use lp_core::{ElementId, ElementKind};
use lp_engine::{EngineConfig, SpectralConfig};
use lp_equipment::Equipment;
use lp_topology::Network;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of an element for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSummary {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
    pub type_variety: Option<String>,
}

/// Load, migrate and validate a network file (`.json`, otherwise YAML).
pub fn load_network(path: &Path) -> AppResult<Network> {
    lp_topology::load_network(path).map_err(|source| AppError::NetworkFileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a network, choosing the format from the extension.
pub fn save_network(path: &Path, network: &Network) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => lp_topology::save_json(path, network)?,
        _ => lp_topology::save_yaml(path, network)?,
    }
    Ok(())
}

pub fn list_elements(network: &Network) -> Vec<ElementSummary> {
    network
        .elements
        .iter()
        .map(|e| ElementSummary {
            id: e.element_id.clone(),
            name: e.name.clone(),
            kind: e.kind(),
            type_variety: e.type_variety.clone(),
        })
        .collect()
}

/// Equipment library from `path`, or the built-in library.
pub fn load_equipment(path: Option<&Path>) -> AppResult<Equipment> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading equipment library");
            Ok(Equipment::load(path)?)
        }
        None => Ok(Equipment::builtin()),
    }
}

/// Engine configuration derived from the network's SI and span settings.
pub fn engine_config(network: &Network) -> EngineConfig {
    let si = &network.si;
    EngineConfig {
        spectral: SpectralConfig {
            f_min: si.f_min,
            f_max: si.f_max,
            spacing: si.spacing,
            baud_rate: si.baud_rate,
            roll_off: si.roll_off,
            tx_osnr_db: si.tx_osnr,
        },
        con_in_db: network.span.con_in,
        con_out_db: network.span.con_out,
    }
}
