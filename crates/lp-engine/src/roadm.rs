//! Reconfigurable optical add/drop multiplexer.

use lp_core::{ElementId, db_to_lin, dbm_to_power};

use crate::error::{EngineError, EngineResult};
use crate::spectral::SpectralState;
use crate::traits::{StepDetails, Transfer, TransferContext};

/// ROADM with optional per-channel power leveling and a degree-dependent
/// add/drop impairment.
#[derive(Debug, Clone, PartialEq)]
pub struct Roadm {
    pub id: ElementId,
    pub type_variety: Option<String>,
    /// Per-channel output power in dBm; overrides the catalog target.
    pub target_pch_out_db: Option<f64>,
}

impl Roadm {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            type_variety: None,
            target_pch_out_db: None,
        }
    }
}

impl Transfer for Roadm {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn apply(
        &self,
        state: &mut SpectralState,
        ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails> {
        let model = ctx
            .equipment
            .roadm(self.type_variety.as_deref())
            .ok_or_else(|| EngineError::MissingRoadmModel {
                id: self.id.clone(),
                variety: self
                    .type_variety
                    .clone()
                    .unwrap_or_else(|| lp_equipment::DEFAULT_VARIETY.to_string()),
            })?;

        let mut gain_db = None;
        if let Some(target_dbm) = self.target_pch_out_db.or(model.target_pch_out_db) {
            let target_w = dbm_to_power(target_dbm).value;
            let factors = state
                .signal
                .iter()
                .map(|&p| {
                    if p > 0.0 {
                        Ok(target_w / p)
                    } else {
                        Err(EngineError::Internal {
                            what: format!("ROADM '{}' cannot level a dark channel", self.id),
                        })
                    }
                })
                .collect::<EngineResult<Vec<f64>>>()?;
            gain_db = factors.first().map(|&f| lp_core::lin_to_db(f));
            state.scale_channels(&factors)?;
        }

        let degree = ctx.roadm_degree();
        let osnr_lin = db_to_lin(model.osnr_contribution(degree));
        for (ase, signal) in state.ase.iter_mut().zip(&state.signal) {
            *ase += signal / osnr_lin;
        }

        tracing::debug!(element = %self.id, %degree, leveled = gain_db.is_some(), "roadm applied");

        Ok(StepDetails {
            gain_db,
            degree: Some(degree),
            ..Default::default()
        })
    }
}
