//! Passive fiber spans.

use lp_core::{
    ElementId, db_to_lin,
    units::{Length, constants::fiber_delay, to_km, to_ms},
};

use crate::common::check_finite;
use crate::error::EngineResult;
use crate::spectral::SpectralState;
use crate::traits::{StepDetails, Transfer, TransferContext};

/// Fiber span with distributed attenuation and lumped input loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Fiber {
    pub id: ElementId,
    pub length: Length,
    /// Attenuation in dB/km.
    pub loss_coef: f64,
    /// Lumped loss at the input, in dB.
    pub att_in: f64,
}

impl Fiber {
    pub fn new(id: ElementId, length: Length, loss_coef: f64) -> Self {
        Self {
            id,
            length,
            loss_coef,
            att_in: 0.0,
        }
    }

    /// Total span loss in dB including both connectors.
    pub fn loss_db(&self, con_in_db: f64, con_out_db: f64) -> f64 {
        con_in_db + self.att_in + self.loss_coef * to_km(self.length) + con_out_db
    }

    pub fn latency_ms(&self) -> f64 {
        to_ms(fiber_delay(self.length))
    }
}

impl Transfer for Fiber {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn apply(
        &self,
        state: &mut SpectralState,
        ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails> {
        let loss_db = check_finite(
            self.loss_db(ctx.config.con_in_db, ctx.config.con_out_db),
            "fiber loss",
        )?;
        state.scale_all(db_to_lin(-loss_db));
        Ok(StepDetails {
            latency_ms: self.latency_ms(),
            loss_db: Some(loss_db),
            ..Default::default()
        })
    }
}

/// Fiber with Raman pumping. The pump parameters are carried but the span
/// propagates as a plain fiber.
#[derive(Debug, Clone, PartialEq)]
pub struct RamanFiber {
    pub fiber: Fiber,
    pub raman_efficiency: Option<f64>,
    pub noise_figure: Option<f64>,
}

impl Transfer for RamanFiber {
    fn id(&self) -> &ElementId {
        &self.fiber.id
    }

    fn apply(
        &self,
        state: &mut SpectralState,
        ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails> {
        self.fiber.apply(state, ctx)
    }
}
