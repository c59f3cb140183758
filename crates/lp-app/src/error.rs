//! Error types for the lp-app service layer.

use lp_core::ElementId;
use lp_engine::EngineError;
use std::fmt;
use std::path::PathBuf;

/// Stable, enumerable failure kinds of a simulation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationErrorKind {
    NetworkNotFound,
    PathElementNotFound,
    InvalidPathStart,
    MissingAmplifierModel,
    MissingRoadmModel,
    EmptyPropagation,
    InvalidInput,
    EngineInternalError,
}

/// Transport-agnostic status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    NotFound,
    BadRequest,
    Internal,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Classification::NotFound => "not found",
            Classification::BadRequest => "bad request",
            Classification::Internal => "internal",
        })
    }
}

fn join_ids(ids: &[ElementId]) -> String {
    ids.iter()
        .map(ElementId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application error type wrapping the backend crates for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("Path elements not found: {}", join_ids(.missing))]
    PathElementNotFound { missing: Vec<ElementId> },

    #[error("{0}")]
    InvalidPathStart(String),

    #[error("{0}")]
    MissingAmplifierModel(String),

    #[error("{0}")]
    MissingRoadmModel(String),

    #[error("Nothing to propagate: path holds no element after the launch transceiver")]
    EmptyPropagation,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Engine internal error: {0}")]
    EngineInternal(String),

    #[error("Failed to read network file: {path}")]
    NetworkFileRead {
        path: PathBuf,
        #[source]
        source: lp_topology::TopologyError,
    },

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Equipment error: {0}")]
    Equipment(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Simulation failure kind, `None` for errors outside the simulation
    /// request taxonomy.
    pub fn kind(&self) -> Option<SimulationErrorKind> {
        match self {
            AppError::NetworkNotFound(_) => Some(SimulationErrorKind::NetworkNotFound),
            AppError::PathElementNotFound { .. } => Some(SimulationErrorKind::PathElementNotFound),
            AppError::InvalidPathStart(_) => Some(SimulationErrorKind::InvalidPathStart),
            AppError::MissingAmplifierModel(_) => Some(SimulationErrorKind::MissingAmplifierModel),
            AppError::MissingRoadmModel(_) => Some(SimulationErrorKind::MissingRoadmModel),
            AppError::EmptyPropagation => Some(SimulationErrorKind::EmptyPropagation),
            AppError::InvalidInput(_) => Some(SimulationErrorKind::InvalidInput),
            AppError::EngineInternal(_) => Some(SimulationErrorKind::EngineInternalError),
            AppError::NetworkFileRead { .. }
            | AppError::Topology(_)
            | AppError::Equipment(_)
            | AppError::Results(_)
            | AppError::RunNotFound(_)
            | AppError::Io(_) => None,
        }
    }

    pub fn classification(&self) -> Classification {
        match self.kind() {
            Some(SimulationErrorKind::NetworkNotFound)
            | Some(SimulationErrorKind::PathElementNotFound) => Classification::NotFound,
            Some(SimulationErrorKind::EngineInternalError) => Classification::Internal,
            Some(_) => Classification::BadRequest,
            None => match self {
                AppError::RunNotFound(_) => Classification::NotFound,
                AppError::NetworkFileRead { .. }
                | AppError::Topology(_)
                | AppError::Equipment(_) => Classification::BadRequest,
                _ => Classification::Internal,
            },
        }
    }

    /// Human-readable message paired with its classification.
    pub fn report(&self) -> (String, Classification) {
        (self.to_string(), self.classification())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidPathStart { .. } => AppError::InvalidPathStart(err.to_string()),
            EngineError::MissingAmplifierModel { .. } => {
                AppError::MissingAmplifierModel(err.to_string())
            }
            EngineError::MissingRoadmModel { .. } => AppError::MissingRoadmModel(err.to_string()),
            EngineError::EmptyPropagation => AppError::EmptyPropagation,
            EngineError::Internal { what } => AppError::EngineInternal(what),
        }
    }
}

impl From<lp_topology::TopologyError> for AppError {
    fn from(err: lp_topology::TopologyError) -> Self {
        AppError::Topology(err.to_string())
    }
}

impl From<lp_equipment::EquipmentError> for AppError {
    fn from(err: lp_equipment::EquipmentError) -> Self {
        AppError::Equipment(err.to_string())
    }
}

impl From<lp_results::ResultsError> for AppError {
    fn from(err: lp_results::ResultsError) -> Self {
        match err {
            lp_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            lp_results::ResultsError::InvalidRunId { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
