//! Core traits for element transfer functions.

use lp_core::ElementId;
use lp_equipment::{Equipment, RoadmDegree};

use crate::error::EngineResult;
use crate::spectral::{EngineConfig, SpectralState};

/// Immutable inputs shared by every transfer along one path.
#[derive(Clone, Copy)]
pub struct TransferContext<'a> {
    pub config: &'a EngineConfig,
    pub equipment: &'a Equipment,
    /// First element after the launch transceiver.
    pub is_first: bool,
    /// Last element before the receiving transceiver or the path end.
    pub is_last: bool,
}

impl TransferContext<'_> {
    /// ROADM role implied by the position on the path. Add wins over drop
    /// when a ROADM is the only propagated element.
    pub fn roadm_degree(&self) -> RoadmDegree {
        if self.is_first {
            RoadmDegree::Add
        } else if self.is_last {
            RoadmDegree::Drop
        } else {
            RoadmDegree::Express
        }
    }
}

/// Element-specific figures reported alongside a step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepDetails {
    pub latency_ms: f64,
    pub loss_db: Option<f64>,
    pub gain_db: Option<f64>,
    pub noise_figure_db: Option<f64>,
    pub degree: Option<RoadmDegree>,
}

/// An element that transforms the spectral state in place.
///
/// Implementations are deterministic functions of the incoming state, their
/// own parameters and the context.
pub trait Transfer: Send + Sync {
    fn id(&self) -> &ElementId;

    /// Apply the element to every channel of `state`.
    fn apply(
        &self,
        state: &mut SpectralState,
        ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails>;
}
