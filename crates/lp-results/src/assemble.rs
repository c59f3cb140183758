//! Conversion of an engine trace into the response contract.

use lp_core::round_to;
use lp_engine::{Propagation, Step, StepDetails};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::types::{AdjacencyWarning, RunId, SimulationResponse, SimulationStepResult};

/// Decimal digits kept for reported power and OSNR figures.
pub const REPORT_DIGITS: u32 = 2;

fn report(v: f64) -> f64 {
    round_to(v, REPORT_DIGITS)
}

fn details_map(details: &StepDetails) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    map.insert("latency_ms".to_string(), json!(details.latency_ms));
    if let Some(loss) = details.loss_db {
        map.insert("loss_db".to_string(), json!(loss));
    }
    if let Some(gain) = details.gain_db {
        map.insert("gain_db".to_string(), json!(gain));
    }
    if let Some(nf) = details.noise_figure_db {
        map.insert("noise_figure_db".to_string(), json!(nf));
    }
    if let Some(degree) = details.degree {
        map.insert("degree".to_string(), json!(degree.as_str()));
    }
    map
}

pub fn step_result(step: &Step) -> SimulationStepResult {
    SimulationStepResult {
        element_id: step.element_id.clone(),
        element_type: step.kind,
        input_power_dbm: report(step.input.power_dbm),
        input_osnr_db: step.input.osnr_db.map(report),
        output_power_dbm: report(step.output.power_dbm),
        output_osnr_db: step.output.osnr_db.map(report),
        added_noise_mw: step.added_noise_mw,
        details: details_map(&step.details),
    }
}

/// Build the response. Rounding happens here and nowhere upstream.
pub fn assemble(
    propagation: &Propagation,
    warnings: Vec<AdjacencyWarning>,
    run_id: RunId,
) -> SimulationResponse {
    SimulationResponse {
        path_results: propagation.steps.iter().map(step_result).collect(),
        final_osnr_db: propagation.final_osnr_db.map(report),
        final_power_dbm: report(propagation.final_power_dbm),
        warnings,
        run_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::ElementKind;
    use lp_engine::Measurement;

    fn step() -> Step {
        Step {
            element_id: "span".into(),
            kind: ElementKind::Fiber,
            input: Measurement {
                power_dbm: 0.004,
                osnr_db: Some(30.126),
            },
            output: Measurement {
                power_dbm: -16.000000000004,
                osnr_db: Some(30.126),
            },
            added_noise_mw: 1.23456e-9,
            details: StepDetails {
                latency_ms: 0.3917,
                loss_db: Some(16.0),
                ..Default::default()
            },
        }
    }

    #[test]
    fn figures_rounded_noise_kept() {
        let r = step_result(&step());
        assert_eq!(r.input_power_dbm, 0.0);
        assert_eq!(r.output_power_dbm, -16.0);
        assert_eq!(r.output_osnr_db, Some(30.13));
        assert_eq!(r.added_noise_mw, 1.23456e-9);
    }

    #[test]
    fn details_only_carry_known_figures() {
        let r = step_result(&step());
        assert_eq!(r.details["loss_db"], json!(16.0));
        assert!(r.details.contains_key("latency_ms"));
        assert!(!r.details.contains_key("gain_db"));
        assert!(!r.details.contains_key("degree"));
    }

    #[test]
    fn final_figures_come_from_propagation() {
        let propagation = Propagation {
            steps: vec![step()],
            final_osnr_db: None,
            final_power_dbm: -16.004,
        };
        let resp = assemble(&propagation, Vec::new(), "abc".to_string());
        assert_eq!(resp.final_osnr_db, None);
        assert_eq!(resp.final_power_dbm, -16.0);
        assert_eq!(resp.run_id, "abc");
    }
}
