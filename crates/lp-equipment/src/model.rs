//! Equipment model definitions.

use lp_core::ensure_finite;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EquipmentError, EquipmentResult};

/// Noise-figure behaviour of an amplifier over its gain range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type_def", rename_all = "snake_case")]
pub enum NoiseFigure {
    /// NF degrades linearly from `nf_min` at `gain_flatmax` to `nf_max` at
    /// `gain_min`, and is clamped outside that range.
    VariableGain { nf_min: f64, nf_max: f64 },
    /// Constant NF regardless of operating gain.
    FixedGain { nf0: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdfaModel {
    pub type_variety: String,
    /// Lowest supported gain in dB.
    pub gain_min: f64,
    /// Highest gain with a flat spectral response, in dB.
    pub gain_flatmax: f64,
    /// Total output power limit in dBm.
    pub p_max: f64,
    #[serde(flatten)]
    pub nf: NoiseFigure,
}

impl EdfaModel {
    pub fn variable_gain(
        type_variety: &str,
        gain_min: f64,
        gain_flatmax: f64,
        nf_min: f64,
        nf_max: f64,
    ) -> Self {
        Self {
            type_variety: type_variety.to_string(),
            gain_min,
            gain_flatmax,
            p_max: 21.0,
            nf: NoiseFigure::VariableGain { nf_min, nf_max },
        }
    }

    pub fn fixed_gain(type_variety: &str, gain_min: f64, gain_flatmax: f64, nf0: f64) -> Self {
        Self {
            type_variety: type_variety.to_string(),
            gain_min,
            gain_flatmax,
            p_max: 21.0,
            nf: NoiseFigure::FixedGain { nf0 },
        }
    }

    /// Noise figure in dB when operated at `gain_db`.
    pub fn nf_at_gain(&self, gain_db: f64) -> f64 {
        match self.nf {
            NoiseFigure::FixedGain { nf0 } => nf0,
            NoiseFigure::VariableGain { nf_min, nf_max } => {
                let span = self.gain_flatmax - self.gain_min;
                if span <= 0.0 {
                    return nf_min;
                }
                let backoff = ((self.gain_flatmax - gain_db) / span).clamp(0.0, 1.0);
                nf_min + backoff * (nf_max - nf_min)
            }
        }
    }

    pub fn validate(&self) -> EquipmentResult<()> {
        ensure_finite(self.gain_min, "edfa gain_min")?;
        ensure_finite(self.gain_flatmax, "edfa gain_flatmax")?;
        ensure_finite(self.p_max, "edfa p_max")?;
        if self.gain_min > self.gain_flatmax {
            return Err(self.invalid("gain_min exceeds gain_flatmax"));
        }
        match self.nf {
            NoiseFigure::VariableGain { nf_min, nf_max } => {
                ensure_finite(nf_min, "edfa nf_min")?;
                ensure_finite(nf_max, "edfa nf_max")?;
                if nf_min > nf_max {
                    return Err(self.invalid("nf_min exceeds nf_max"));
                }
            }
            NoiseFigure::FixedGain { nf0 } => {
                ensure_finite(nf0, "edfa nf0")?;
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> EquipmentError {
        EquipmentError::InvalidModel {
            kind: "edfa",
            variety: self.type_variety.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Role a ROADM plays for the channel being followed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoadmDegree {
    Add,
    Drop,
    Express,
}

impl RoadmDegree {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmDegree::Add => "add",
            RoadmDegree::Drop => "drop",
            RoadmDegree::Express => "express",
        }
    }
}

impl fmt::Display for RoadmDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmModel {
    pub type_variety: String,
    /// Per-channel output power the ROADM equalises to, in dBm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pch_out_db: Option<f64>,
    /// OSNR contribution in dB of the add, drop and express structures.
    pub add_osnr_db: f64,
    pub drop_osnr_db: f64,
    pub express_osnr_db: f64,
}

impl RoadmModel {
    pub fn osnr_contribution(&self, degree: RoadmDegree) -> f64 {
        match degree {
            RoadmDegree::Add => self.add_osnr_db,
            RoadmDegree::Drop => self.drop_osnr_db,
            RoadmDegree::Express => self.express_osnr_db,
        }
    }

    pub fn validate(&self) -> EquipmentResult<()> {
        if let Some(target) = self.target_pch_out_db {
            ensure_finite(target, "roadm target_pch_out_db")?;
        }
        for (what, osnr) in [
            ("roadm add_osnr_db", self.add_osnr_db),
            ("roadm drop_osnr_db", self.drop_osnr_db),
            ("roadm express_osnr_db", self.express_osnr_db),
        ] {
            ensure_finite(osnr, what)?;
        }
        Ok(())
    }
}
