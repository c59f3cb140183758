//! Splices and patch-panel connections.

use lp_core::{ElementId, db_to_lin};

use crate::error::EngineResult;
use crate::spectral::SpectralState;
use crate::traits::{StepDetails, Transfer, TransferContext};

/// Insertion loss of a fused element in dB.
pub const FUSED_LOSS_DB: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Fused {
    pub id: ElementId,
}

impl Transfer for Fused {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn apply(
        &self,
        state: &mut SpectralState,
        _ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails> {
        state.scale_all(db_to_lin(-FUSED_LOSS_DB));
        Ok(StepDetails {
            loss_db: Some(FUSED_LOSS_DB),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::{EngineConfig, SpectralConfig};
    use lp_equipment::Equipment;

    #[test]
    fn half_db_insertion_loss() {
        let config = EngineConfig::default();
        let equipment = Equipment::default();
        let ctx = TransferContext {
            config: &config,
            equipment: &equipment,
            is_first: false,
            is_last: false,
        };
        let mut state = SpectralState::launch(&SpectralConfig::default(), 0.0).unwrap();
        Fused { id: "splice".into() }.apply(&mut state, &ctx).unwrap();
        assert!((lp_core::watts_to_dbm(state.signal[0]) + 0.5).abs() < 1e-12);
    }
}
