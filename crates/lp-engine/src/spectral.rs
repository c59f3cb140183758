//! Spectral configuration and the per-channel propagation state.

use lp_core::{dbm_to_power, units::Power, units::constants::MAX_CHANNELS};

use crate::common::{check_finite, scale_each};
use crate::error::{EngineError, EngineResult};
use crate::measure::ChannelSnapshot;

/// Channel grid and transmitter characteristics.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralConfig {
    /// Lower grid edge in Hz.
    pub f_min: f64,
    /// Upper grid edge in Hz.
    pub f_max: f64,
    /// Channel spacing in Hz.
    pub spacing: f64,
    /// Symbol rate in Bd.
    pub baud_rate: f64,
    pub roll_off: f64,
    /// Transmitter OSNR in dB.
    pub tx_osnr_db: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            f_min: 190.3e12,
            f_max: 196.1e12,
            spacing: 50e9,
            baud_rate: 32e9,
            roll_off: 0.15,
            tx_osnr_db: 35.0,
        }
    }
}

impl SpectralConfig {
    /// Number of channels on the grid: `floor((f_max - f_min) / spacing)`,
    /// between one and [`MAX_CHANNELS`].
    pub fn channel_count(&self) -> EngineResult<usize> {
        let slots = (self.f_max - self.f_min) / self.spacing;
        if !slots.is_finite() || slots < 1.0 {
            return Err(EngineError::Internal {
                what: format!(
                    "spectral grid [{}, {}] Hz with spacing {} Hz holds no channel",
                    self.f_min, self.f_max, self.spacing
                ),
            });
        }
        if slots >= (MAX_CHANNELS + 1) as f64 {
            return Err(EngineError::Internal {
                what: format!(
                    "spectral grid [{}, {}] Hz with spacing {} Hz exceeds {} channels",
                    self.f_min, self.f_max, self.spacing, MAX_CHANNELS
                ),
            });
        }
        Ok(slots.floor() as usize)
    }

    /// Carrier frequencies at `f_min + spacing * k` for `k = 1..=n`.
    pub fn frequencies(&self) -> EngineResult<Vec<f64>> {
        Ok((1..=self.channel_count()?)
            .map(|k| self.f_min + self.spacing * k as f64)
            .collect())
    }
}

/// Everything the engine needs besides the element list and equipment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub spectral: SpectralConfig,
    /// Connector loss at each fiber input, in dB.
    pub con_in_db: f64,
    /// Connector loss at each fiber output, in dB.
    pub con_out_db: f64,
}

/// Parallel per-channel arrays, all powers in linear watts.
///
/// Created once per simulation and mutated in place by each element.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralState {
    pub frequency: Vec<f64>,
    pub signal: Vec<f64>,
    pub ase: Vec<f64>,
    pub nli: Vec<f64>,
    pub baud_rate: Vec<f64>,
    pub roll_off: Vec<f64>,
    pub tx_osnr_db: f64,
}

impl SpectralState {
    /// Launch a flat comb at `power_dbm` per channel with no accumulated noise.
    pub fn launch(config: &SpectralConfig, power_dbm: f64) -> EngineResult<Self> {
        check_finite(power_dbm, "launch power")?;
        let frequency = config.frequencies()?;
        let n = frequency.len();

        let launch: Power = dbm_to_power(power_dbm);
        Ok(Self {
            frequency,
            signal: vec![launch.value; n],
            ase: vec![0.0; n],
            nli: vec![0.0; n],
            baud_rate: vec![config.baud_rate; n],
            roll_off: vec![config.roll_off; n],
            tx_osnr_db: config.tx_osnr_db,
        })
    }

    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Copy of the representative reporting channel (channel 0).
    pub fn snapshot(&self) -> EngineResult<ChannelSnapshot> {
        self.check_shape()?;
        match (self.signal.first(), self.ase.first(), self.nli.first()) {
            (Some(&signal_w), Some(&ase_w), Some(&nli_w)) => Ok(ChannelSnapshot {
                signal_w,
                ase_w,
                nli_w,
            }),
            _ => Err(EngineError::Internal {
                what: "spectral state holds no channel".to_string(),
            }),
        }
    }

    /// Multiply signal and both noise terms of every channel by the same
    /// linear factor.
    pub fn scale_all(&mut self, factor: f64) {
        for v in self
            .signal
            .iter_mut()
            .chain(self.ase.iter_mut())
            .chain(self.nli.iter_mut())
        {
            *v *= factor;
        }
    }

    /// Per-channel version of [`scale_all`](Self::scale_all).
    pub fn scale_channels(&mut self, factors: &[f64]) -> EngineResult<()> {
        scale_each(&mut self.signal, factors)?;
        scale_each(&mut self.ase, factors)?;
        scale_each(&mut self.nli, factors)?;
        Ok(())
    }

    /// Verify array shapes agree and every power is finite and non-negative.
    pub fn check(&self) -> EngineResult<()> {
        self.check_shape()?;
        for (what, values) in [
            ("signal power", &self.signal),
            ("ASE power", &self.ase),
            ("NLI power", &self.nli),
        ] {
            for &v in values {
                check_finite(v, what)?;
                if v < 0.0 {
                    return Err(EngineError::Internal {
                        what: format!("negative {what}: {v}"),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_shape(&self) -> EngineResult<()> {
        let n = self.frequency.len();
        let lens = [
            self.signal.len(),
            self.ase.len(),
            self.nli.len(),
            self.baud_rate.len(),
            self.roll_off.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(EngineError::Internal {
                what: format!("spectral arrays disagree in length: {n} carriers, {lens:?}"),
            });
        }
        Ok(())
    }
}
