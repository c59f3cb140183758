//! lp-topology: optical network records, file format and storage.

pub mod edit;
pub mod migrate;
pub mod schema;
pub mod store;
pub mod validate;

pub use edit::{
    ConnectionCreate, ElementCreate, ElementUpdate, ImportStrategy, ImportSummary, NetworkImport,
    ServiceCreate, SubTopologyImport,
};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use store::{
    DirStore, MemoryStore, NetworkPage, NetworkQuery, NetworkStore, NetworkSummary, SortKey,
    SortOrder,
};
pub use validate::{ValidationError, validate_network};

use lp_core::ElementKind;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(thiserror::Error, Debug)]
pub enum TopologyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Element not found: {id}")]
    ElementNotFound { id: String },

    #[error("Connection not found: {id}")]
    ConnectionNotFound { id: String },

    #[error("Service not found: {id}")]
    ServiceNotFound { id: String },

    #[error("Element {id} is a {stored}; its kind cannot change to {requested}")]
    KindChange {
        id: String,
        stored: ElementKind,
        requested: ElementKind,
    },

    #[error("Id '{id}' cannot name a stored file")]
    InvalidId { id: String },

    #[error("Conflict: {what}")]
    Conflict { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> TopologyResult<Network> {
    let content = std::fs::read_to_string(path)?;
    let mut network: Network = serde_yaml::from_str(&content)?;
    network = migrate_to_latest(network)?;
    validate_network(&network)?;
    Ok(network)
}

pub fn save_yaml(path: &std::path::Path, network: &Network) -> TopologyResult<()> {
    validate_network(network)?;
    let content = serde_yaml::to_string(network)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> TopologyResult<Network> {
    let content = std::fs::read_to_string(path)?;
    let mut network: Network = serde_json::from_str(&content)?;
    network = migrate_to_latest(network)?;
    validate_network(&network)?;
    Ok(network)
}

pub fn save_json(path: &std::path::Path, network: &Network) -> TopologyResult<()> {
    validate_network(network)?;
    let content = serde_json::to_string_pretty(network)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a network file, picking the format from the extension (`.json` or YAML otherwise).
pub fn load_network(path: &std::path::Path) -> TopologyResult<Network> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
