//! Path propagation driver.

use lp_core::{ElementId, ElementKind};
use lp_equipment::Equipment;

use crate::element::Element;
use crate::error::{EngineError, EngineResult};
use crate::measure::Measurement;
use crate::spectral::{EngineConfig, SpectralState};
use crate::traits::{StepDetails, TransferContext};

/// Identifies the propagation model in run hashes.
pub const ENGINE_VERSION: &str = concat!("lp-engine/", env!("CARGO_PKG_VERSION"));

/// Measured effect of one element on the representative channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub element_id: ElementId,
    pub kind: ElementKind,
    pub input: Measurement,
    pub output: Measurement,
    /// Noise power gained across the element, in mW.
    pub added_noise_mw: f64,
    pub details: StepDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    pub steps: Vec<Step>,
    pub final_osnr_db: Option<f64>,
    pub final_power_dbm: f64,
}

/// Propagate a comb launched at `launch_power_dbm` per channel through
/// `elements`.
///
/// `elements[0]` must be a transceiver. Propagation stops at the next
/// transceiver, which is not recorded, or at the end of the slice.
///
/// An empty slice has nothing to propagate and yields
/// [`EngineError::EmptyPropagation`] rather than `InvalidPathStart`.
pub fn simulate(
    elements: &[Element],
    config: &EngineConfig,
    equipment: &Equipment,
    launch_power_dbm: f64,
) -> EngineResult<Propagation> {
    let launch = match elements.first() {
        Some(Element::Transceiver(t)) => t,
        Some(other) => {
            return Err(EngineError::InvalidPathStart {
                id: other.id().clone(),
                kind: other.kind(),
            });
        }
        None => return Err(EngineError::EmptyPropagation),
    };

    let mut state = SpectralState::launch(&config.spectral, launch_power_dbm)?;
    tracing::debug!(
        launch = %launch.id,
        channels = state.len(),
        power_dbm = launch_power_dbm,
        "launching comb"
    );

    let launch_power = state.snapshot()?.measure()?.power_dbm;
    let mut steps = vec![Step {
        element_id: launch.id.clone(),
        kind: ElementKind::Transceiver,
        input: Measurement {
            power_dbm: launch_power,
            osnr_db: None,
        },
        output: Measurement {
            power_dbm: launch_power,
            osnr_db: Some(state.tx_osnr_db),
        },
        added_noise_mw: 0.0,
        details: StepDetails::default(),
    }];

    let rest = &elements[1..];
    let end = rest
        .iter()
        .position(|e| matches!(e, Element::Transceiver(_)))
        .unwrap_or(rest.len());
    for ignored in rest.get(end + 1..).unwrap_or_default() {
        tracing::debug!(element = %ignored.id(), "ignoring element past receiving transceiver");
    }
    let propagated = &rest[..end];
    if propagated.is_empty() {
        return Err(EngineError::EmptyPropagation);
    }

    for (i, element) in propagated.iter().enumerate() {
        let Some(transfer) = element.transfer() else {
            return Err(EngineError::Internal {
                what: format!("transceiver '{}' inside propagated span", element.id()),
            });
        };
        let ctx = TransferContext {
            config,
            equipment,
            is_first: i == 0,
            is_last: i + 1 == propagated.len(),
        };

        let before = state.snapshot()?;
        let details = transfer.apply(&mut state, &ctx)?;
        state.check()?;
        let after = state.snapshot()?;

        steps.push(Step {
            element_id: element.id().clone(),
            kind: element.kind(),
            input: before.measure()?,
            output: after.measure()?,
            added_noise_mw: (after.noise_w() - before.noise_w()) * 1e3,
            details,
        });
    }

    let last = steps.last().ok_or(EngineError::EmptyPropagation)?;
    let propagation = Propagation {
        final_osnr_db: last.output.osnr_db,
        final_power_dbm: last.output.power_dbm,
        steps,
    };
    tracing::debug!(
        steps = propagation.steps.len(),
        final_power_dbm = propagation.final_power_dbm,
        final_osnr_db = ?propagation.final_osnr_db,
        "propagation complete"
    );
    Ok(propagation)
}
