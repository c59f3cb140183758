//! Power and OSNR measurement of the representative channel.

use lp_core::{lin_to_db, watts_to_dbm};

use crate::common::check_finite;
use crate::error::EngineResult;

/// Scalar copy of one channel's powers, in watts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSnapshot {
    pub signal_w: f64,
    pub ase_w: f64,
    pub nli_w: f64,
}

impl ChannelSnapshot {
    pub fn noise_w(&self) -> f64 {
        self.ase_w + self.nli_w
    }

    pub fn measure(&self) -> EngineResult<Measurement> {
        let power_dbm = check_finite(watts_to_dbm(self.signal_w), "channel power")?;
        let noise = self.noise_w();
        let osnr_db = if noise > 0.0 {
            Some(check_finite(lin_to_db(self.signal_w / noise), "channel OSNR")?)
        } else {
            None
        };
        Ok(Measurement { power_dbm, osnr_db })
    }
}

/// Channel power and OSNR. OSNR is `None` while no noise has accumulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub power_dbm: f64,
    pub osnr_db: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_channel_has_no_osnr() {
        let m = ChannelSnapshot {
            signal_w: 1e-3,
            ase_w: 0.0,
            nli_w: 0.0,
        }
        .measure()
        .unwrap();
        assert!(m.power_dbm.abs() < 1e-12);
        assert_eq!(m.osnr_db, None);
    }

    #[test]
    fn osnr_counts_both_noise_terms() {
        let m = ChannelSnapshot {
            signal_w: 1e-3,
            ase_w: 5e-7,
            nli_w: 5e-7,
        }
        .measure()
        .unwrap();
        assert!((m.osnr_db.unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn dark_channel_is_an_error() {
        let snap = ChannelSnapshot {
            signal_w: 0.0,
            ase_w: 0.0,
            nli_w: 0.0,
        };
        assert!(snap.measure().is_err());
    }
}
