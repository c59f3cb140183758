//! Run storage API.

use lp_core::NetworkId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::types::{RunManifest, SimulationResponse};
use crate::{ResultsError, ResultsResult};

const MANIFEST_FILE: &str = "manifest.json";
const RESULT_FILE: &str = "result.json";

/// One directory per run holding `manifest.json` and `result.json`.
#[derive(Debug, Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store kept next to a network file, under `.lightpath/runs`.
    pub fn for_network_file(network_path: &Path) -> ResultsResult<Self> {
        let dir = network_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "network path has no parent directory".to_string(),
            })?;
        Self::new(dir.join(".lightpath").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> ResultsResult<PathBuf> {
        if !lp_core::is_file_safe(run_id) {
            return Err(ResultsError::InvalidRunId {
                run_id: run_id.to_string(),
            });
        }
        Ok(self.root_dir.join(run_id))
    }

    fn read_json<T: DeserializeOwned>(&self, run_id: &str, file: &str) -> ResultsResult<T> {
        let path = self.run_dir(run_id)?.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ResultsError::RunNotFound {
                    run_id: run_id.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> ResultsResult<()> {
        fs::write(dir.join(file), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// A run counts as cached only once both of its documents exist.
    pub fn has_run(&self, run_id: &str) -> bool {
        let Ok(dir) = self.run_dir(run_id) else {
            return false;
        };
        [MANIFEST_FILE, RESULT_FILE]
            .iter()
            .all(|file| dir.join(file).is_file())
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        response: &SimulationResponse,
    ) -> ResultsResult<()> {
        let dir = self.run_dir(&manifest.run_id)?;
        fs::create_dir_all(&dir)?;
        // Result first: a manifest without its result would read as cached.
        Self::write_json(&dir, RESULT_FILE, response)?;
        Self::write_json(&dir, MANIFEST_FILE, manifest)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        self.read_json(run_id, MANIFEST_FILE)
    }

    pub fn load_result(&self, run_id: &str) -> ResultsResult<SimulationResponse> {
        self.read_json(run_id, RESULT_FILE)
    }

    /// Cached runs of one network, oldest first. Directories without a
    /// readable manifest are skipped.
    pub fn list_runs(&self, network_id: &NetworkId) -> ResultsResult<Vec<RunManifest>> {
        if !self.root_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            match self.load_manifest(&run_id) {
                Ok(manifest) if manifest.network_id == *network_id => runs.push(manifest),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(run_id = %run_id, error = %err, "skipping run directory");
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    /// Returns `true` if the run existed.
    pub fn delete_run(&self, run_id: &str) -> ResultsResult<bool> {
        let dir = self.run_dir(run_id)?;
        if !dir.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(dir)?;
        Ok(true)
    }
}
