//! Erbium-doped fiber amplifier.

use lp_core::{ElementId, db_to_lin, units::constants::PLANCK_J_S};
use lp_equipment::EdfaModel;

use crate::common::check_finite;
use crate::error::{EngineError, EngineResult};
use crate::spectral::SpectralState;
use crate::traits::{StepDetails, Transfer, TransferContext};

#[derive(Debug, Clone, PartialEq)]
pub struct Edfa {
    pub id: ElementId,
    /// Catalog variety; `None` selects the library default.
    pub type_variety: Option<String>,
    /// Gain in dB at the band center.
    pub gain_target: Option<f64>,
    /// Gain difference in dB between the band edges, positive towards high
    /// frequencies.
    pub tilt_target: Option<f64>,
}

impl Edfa {
    pub fn new(id: ElementId, gain_target: f64) -> Self {
        Self {
            id,
            type_variety: None,
            gain_target: Some(gain_target),
            tilt_target: None,
        }
    }

    fn missing(&self, reason: String) -> EngineError {
        EngineError::MissingAmplifierModel {
            id: self.id.clone(),
            reason,
        }
    }

    fn resolve<'e>(&self, ctx: &TransferContext<'e>) -> EngineResult<(f64, &'e EdfaModel)> {
        let gain = self
            .gain_target
            .ok_or_else(|| self.missing("no gain_target set".to_string()))?;
        let model = ctx
            .equipment
            .edfa(self.type_variety.as_deref())
            .ok_or_else(|| match &self.type_variety {
                Some(v) => self.missing(format!("unknown type_variety '{v}'")),
                None => self.missing("no type_variety and no default model".to_string()),
            })?;
        Ok((check_finite(gain, "amplifier gain")?, model))
    }

    /// Per-channel gain in dB with the tilt spread linearly across the comb.
    fn channel_gains_db(&self, gain: f64, frequency: &[f64]) -> Vec<f64> {
        let tilt = self.tilt_target.unwrap_or(0.0);
        let (Some(&first), Some(&last)) = (frequency.first(), frequency.last()) else {
            return Vec::new();
        };
        let bandwidth = last - first;
        if tilt == 0.0 || bandwidth <= 0.0 {
            return vec![gain; frequency.len()];
        }
        let center = frequency.iter().sum::<f64>() / frequency.len() as f64;
        frequency
            .iter()
            .map(|f| gain + tilt * (f - center) / bandwidth)
            .collect()
    }
}

impl Transfer for Edfa {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn apply(
        &self,
        state: &mut SpectralState,
        ctx: &TransferContext<'_>,
    ) -> EngineResult<StepDetails> {
        let (gain, model) = self.resolve(ctx)?;
        let nf_db = check_finite(model.nf_at_gain(gain), "amplifier noise figure")?;
        let nf_lin = db_to_lin(nf_db);

        let g_lin: Vec<f64> = self
            .channel_gains_db(gain, &state.frequency)
            .into_iter()
            .map(db_to_lin)
            .collect();
        state.scale_channels(&g_lin)?;

        for (i, ase) in state.ase.iter_mut().enumerate() {
            *ase += nf_lin * PLANCK_J_S * state.frequency[i] * state.baud_rate[i] * g_lin[i];
        }

        tracing::debug!(
            element = %self.id,
            variety = %model.type_variety,
            gain_db = gain,
            nf_db,
            "amplifier applied"
        );

        Ok(StepDetails {
            gain_db: Some(gain),
            noise_figure_db: Some(nf_db),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::{EngineConfig, SpectralConfig};
    use lp_equipment::Equipment;
    use proptest::prelude::*;

    fn amplify(edfa: &Edfa, equipment: &Equipment, power_dbm: f64) -> EngineResult<SpectralState> {
        let config = EngineConfig::default();
        let ctx = TransferContext {
            config: &config,
            equipment,
            is_first: false,
            is_last: false,
        };
        let mut state = SpectralState::launch(&SpectralConfig::default(), power_dbm)?;
        edfa.apply(&mut state, &ctx)?;
        Ok(state)
    }

    #[test]
    fn gain_raises_signal_by_target() {
        let state = amplify(&Edfa::new("amp".into(), 20.0), &Equipment::builtin(), -20.0).unwrap();
        assert!((lp_core::watts_to_dbm(state.signal[0])).abs() < 1e-9);
        assert!(state.ase.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn ase_matches_noise_figure_formula() {
        let equipment = Equipment::builtin();
        let state = amplify(&Edfa::new("amp".into(), 26.0), &equipment, 0.0).unwrap();
        // default model sits at nf_min = 6 dB at gain_flatmax
        let expected = db_to_lin(6.0) * PLANCK_J_S * state.frequency[0] * 32e9 * db_to_lin(26.0);
        assert!((state.ase[0] - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn missing_gain_is_rejected() {
        let edfa = Edfa {
            gain_target: None,
            ..Edfa::new("amp".into(), 0.0)
        };
        assert!(matches!(
            amplify(&edfa, &Equipment::builtin(), 0.0),
            Err(EngineError::MissingAmplifierModel { .. })
        ));
    }

    #[test]
    fn unknown_variety_is_rejected() {
        let edfa = Edfa {
            type_variety: Some("no_such_amp".into()),
            ..Edfa::new("amp".into(), 20.0)
        };
        match amplify(&edfa, &Equipment::builtin(), 0.0) {
            Err(EngineError::MissingAmplifierModel { reason, .. }) => {
                assert!(reason.contains("no_such_amp"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_library_has_no_default() {
        assert!(matches!(
            amplify(&Edfa::new("amp".into(), 20.0), &Equipment::default(), 0.0),
            Err(EngineError::MissingAmplifierModel { .. })
        ));
    }

    #[test]
    fn tilt_spreads_around_center() {
        let edfa = Edfa {
            tilt_target: Some(2.0),
            ..Edfa::new("amp".into(), 20.0)
        };
        let freqs = [1.0, 2.0, 3.0];
        let gains = edfa.channel_gains_db(20.0, &freqs);
        assert!((gains[0] - 19.0).abs() < 1e-12);
        assert!((gains[1] - 20.0).abs() < 1e-12);
        assert!((gains[2] - 21.0).abs() < 1e-12);
    }

    #[test]
    fn single_channel_ignores_tilt() {
        let edfa = Edfa {
            tilt_target: Some(3.0),
            ..Edfa::new("amp".into(), 15.0)
        };
        assert_eq!(edfa.channel_gains_db(15.0, &[193e12]), vec![15.0]);
    }

    proptest! {
        #[test]
        fn more_gain_more_power(g in 0.0f64..30.0, dg in 0.1f64..10.0) {
            let equipment = Equipment::builtin();
            let low = amplify(&Edfa::new("a".into(), g), &equipment, -10.0).unwrap();
            let high = amplify(&Edfa::new("a".into(), g + dg), &equipment, -10.0).unwrap();
            prop_assert!(high.signal[0] > low.signal[0]);
        }

        #[test]
        fn amplifier_only_adds_noise(g in 0.0f64..35.0) {
            let state = amplify(&Edfa::new("a".into(), g), &Equipment::builtin(), 0.0).unwrap();
            prop_assert!(state.ase.iter().all(|&p| p >= 0.0));
        }
    }
}
