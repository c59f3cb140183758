//! Shared application service layer for lightpath.
//!
//! Resolves caller paths against stored networks, drives the propagation
//! engine and the run cache, and gives every failure a stable kind and
//! classification a transport can map to its own status vocabulary.

pub mod error;
pub mod network_service;
pub mod path_resolve;
pub mod simulation_service;

pub use error::{AppError, AppResult, Classification, SimulationErrorKind};
pub use network_service::{
    ElementSummary, engine_config, list_elements, load_equipment, load_network, save_network,
};
pub use path_resolve::{ResolvedPath, resolve, to_engine_element};
pub use simulation_service::{
    RunResponse, SimulationOptions, SimulationRequest, list_runs, load_run, run_simulation,
    simulate_single_link,
};
