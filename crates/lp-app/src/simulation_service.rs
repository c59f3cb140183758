//! Single-link simulation and run caching.

use chrono::Utc;
use lp_core::{ElementId, NetworkId};
use lp_engine::ENGINE_VERSION;
use lp_equipment::Equipment;
use lp_results::{RunManifest, RunStore, SimulationResponse, assemble, compute_run_id};
use lp_topology::{Network, NetworkStore};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::network_service::engine_config;
use crate::path_resolve::resolve;

/// Caller input: a network, an ordered path through it and a launch power.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationRequest {
    pub network_id: NetworkId,
    pub path: Vec<ElementId>,
    /// Per-channel launch power in dBm.
    #[serde(default)]
    pub input_power_dbm: f64,
}

/// Options for cached simulation runs.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Response from a cached run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub response: SimulationResponse,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
}

fn fetch_network(store: &dyn NetworkStore, id: &NetworkId) -> AppResult<Network> {
    store
        .get_network(id)?
        .ok_or_else(|| AppError::NetworkNotFound(id.to_string()))
}

fn execute(
    network: &Network,
    equipment: &Equipment,
    request: &SimulationRequest,
    run_id: String,
) -> AppResult<SimulationResponse> {
    if !request.input_power_dbm.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "input_power_dbm must be finite, got {}",
            request.input_power_dbm
        )));
    }

    let resolved = resolve(network, &request.path)?;
    let config = engine_config(network);
    let propagation = lp_engine::simulate(
        &resolved.elements,
        &config,
        equipment,
        request.input_power_dbm,
    )?;
    Ok(assemble(&propagation, resolved.warnings, run_id))
}

/// Resolve and propagate one path without touching the run cache.
pub fn simulate_single_link(
    store: &dyn NetworkStore,
    equipment: &Equipment,
    request: &SimulationRequest,
) -> AppResult<SimulationResponse> {
    let network = fetch_network(store, &request.network_id)?;
    let run_id = compute_run_id(
        &network,
        equipment,
        &request.path,
        request.input_power_dbm,
        ENGINE_VERSION,
    )?;
    execute(&network, equipment, request, run_id)
}

/// Execute a simulation, or load it from `runs` when an identical request
/// was already answered.
pub fn run_simulation(
    store: &dyn NetworkStore,
    equipment: &Equipment,
    request: &SimulationRequest,
    options: &SimulationOptions,
    runs: &RunStore,
) -> AppResult<RunResponse> {
    let network = fetch_network(store, &request.network_id)?;
    let run_id = compute_run_id(
        &network,
        equipment,
        &request.path,
        request.input_power_dbm,
        &options.engine_version,
    )?;

    if options.use_cache && runs.has_run(&run_id) {
        tracing::info!(run_id = %run_id, "loading cached run");
        return Ok(RunResponse {
            manifest: runs.load_manifest(&run_id)?,
            response: runs.load_result(&run_id)?,
            loaded_from_cache: true,
        });
    }

    let response = execute(&network, equipment, request, run_id.clone())?;
    let manifest = RunManifest {
        run_id,
        network_id: network.network_id.clone(),
        network_name: network.network_name.clone(),
        path: request.path.clone(),
        input_power_dbm: request.input_power_dbm,
        timestamp: Utc::now().to_rfc3339(),
        engine_version: options.engine_version.clone(),
    };
    runs.save_run(&manifest, &response)?;
    tracing::info!(
        run_id = %manifest.run_id,
        steps = response.path_results.len(),
        warnings = response.warnings.len(),
        "run saved"
    );

    Ok(RunResponse {
        response,
        manifest,
        loaded_from_cache: false,
    })
}

pub fn list_runs(runs: &RunStore, network_id: &NetworkId) -> AppResult<Vec<RunManifest>> {
    Ok(runs.list_runs(network_id)?)
}

pub fn load_run(runs: &RunStore, run_id: &str) -> AppResult<(RunManifest, SimulationResponse)> {
    Ok((runs.load_manifest(run_id)?, runs.load_result(run_id)?))
}
