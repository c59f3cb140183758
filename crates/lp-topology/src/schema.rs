//! Network schema definitions.

use chrono::{DateTime, Utc};
use lp_core::{ConnectionId, ElementId, ElementKind, NetworkId, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Metadata = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Network {
    #[serde(default)]
    pub version: u32,
    pub network_id: NetworkId,
    pub network_name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
    #[serde(default)]
    pub services: Vec<ServiceDef>,
    #[serde(default, rename = "SI", alias = "si")]
    pub si: SiConfig,
    #[serde(default, rename = "Span", alias = "span")]
    pub span: SpanConfig,
    #[serde(default)]
    pub simulation_config: SimulationConfig,
}

impl Network {
    /// Create an empty network with a fresh identifier at the latest schema version.
    pub fn new(network_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: crate::migrate::LATEST_VERSION,
            network_id: NetworkId::new(uuid::Uuid::new_v4().to_string()),
            network_name: network_name.into(),
            created_at: now,
            updated_at: now,
            elements: Vec::new(),
            connections: Vec::new(),
            services: Vec::new(),
            si: SiConfig::default(),
            span: SpanConfig::default(),
            simulation_config: SimulationConfig::default(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&ElementDef> {
        self.elements.iter().find(|e| e.element_id == id)
    }

    pub fn contains_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// True if a directed connection `from -> to` exists.
    pub fn has_connection(&self, from: &str, to: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.from_node == from && c.to_node == to)
    }

    pub fn service(&self, id: &str) -> Option<&ServiceDef> {
        self.services.iter().find(|s| s.service_id == id)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub element_id: ElementId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_variety: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub params: ElementParams,
}

impl ElementDef {
    pub fn kind(&self) -> ElementKind {
        self.params.kind()
    }
}

/// Kind-specific element parameters.
///
/// Serialized as `type: <Kind>` next to a `params:` mapping, so a stored
/// parameter record can never disagree with its kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "params")]
pub enum ElementParams {
    Transceiver,
    Fiber(FiberParams),
    RamanFiber(RamanFiberParams),
    Edfa(EdfaParams),
    Roadm(RoadmParams),
    Fused,
}

impl ElementParams {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementParams::Transceiver => ElementKind::Transceiver,
            ElementParams::Fiber(_) => ElementKind::Fiber,
            ElementParams::RamanFiber(_) => ElementKind::RamanFiber,
            ElementParams::Edfa(_) => ElementKind::Edfa,
            ElementParams::Roadm(_) => ElementKind::Roadm,
            ElementParams::Fused => ElementKind::Fused,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnits {
    #[default]
    Km,
    M,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiberParams {
    #[serde(default = "default_fiber_length")]
    pub length: f64,
    /// Attenuation in dB/km.
    #[serde(default = "default_loss_coef")]
    pub loss_coef: f64,
    #[serde(default)]
    pub length_units: LengthUnits,
    /// Extra lumped loss at the fiber input, in dB.
    #[serde(default)]
    pub att_in: f64,
}

impl Default for FiberParams {
    fn default() -> Self {
        Self {
            length: default_fiber_length(),
            loss_coef: default_loss_coef(),
            length_units: LengthUnits::Km,
            att_in: 0.0,
        }
    }
}

fn default_fiber_length() -> f64 {
    80.0
}

fn default_loss_coef() -> f64 {
    0.2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RamanFiberParams {
    #[serde(flatten)]
    pub fiber: FiberParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raman_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_figure: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EdfaParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_target: Option<f64>,
    /// Gain difference across the band in dB, positive towards high frequencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_target: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RoadmParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pch_out_db: Option<f64>,
    /// Restriction lists keyed by name, e.g. `preamp_variety_list`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub restrictions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionDef {
    #[serde(default = "ConnectionDef::unassigned_id")]
    pub connection_id: ConnectionId,
    pub from_node: ElementId,
    pub to_node: ElementId,
}

impl ConnectionDef {
    pub(crate) fn unassigned_id() -> ConnectionId {
        ConnectionId::new("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRequirements {
    /// Requested bandwidth in Gbit/s.
    pub bandwidth: f64,
    /// Latency budget in ms.
    pub latency: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Provisioning,
    Active,
    Failed,
    Decommissioned,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDef {
    pub service_id: ServiceId,
    pub name: String,
    /// Element ids forming the logical path of the service.
    pub path: Vec<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_requirements: Option<ServiceRequirements>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Spectral information: the channel grid launched at every transceiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiConfig {
    /// Lower edge of the grid in Hz.
    pub f_min: f64,
    /// Upper edge of the grid in Hz.
    pub f_max: f64,
    /// Channel spacing in Hz.
    pub spacing: f64,
    /// Symbol rate in Bd.
    pub baud_rate: f64,
    pub roll_off: f64,
    /// Transmitter OSNR in dB.
    pub tx_osnr: f64,
    /// Nominal per-channel launch power in dBm.
    pub power_dbm: f64,
    pub power_range_db: [f64; 3],
    pub sys_margins: f64,
}

impl Default for SiConfig {
    fn default() -> Self {
        Self {
            f_min: 190.3e12,
            f_max: 196.1e12,
            spacing: 50e9,
            baud_rate: 32e9,
            roll_off: 0.15,
            tx_osnr: 35.0,
            power_dbm: 2.0,
            power_range_db: [0.0, 0.0, 1.0],
            sys_margins: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpanConfig {
    pub power_mode: bool,
    pub delta_power_range_db: [f64; 3],
    pub max_fiber_lineic_loss_for_raman: f64,
    pub target_extended_gain: f64,
    /// Longest allowed span, in `length_units`.
    pub max_length: f64,
    pub length_units: LengthUnits,
    pub max_loss: f64,
    pub padding: f64,
    #[serde(rename = "EOL", alias = "eol")]
    pub eol: f64,
    /// Connector loss at each fiber input, in dB.
    pub con_in: f64,
    /// Connector loss at each fiber output, in dB.
    pub con_out: f64,
}

impl Default for SpanConfig {
    fn default() -> Self {
        Self {
            power_mode: true,
            delta_power_range_db: [0.0, 0.0, 0.0],
            max_fiber_lineic_loss_for_raman: 0.25,
            target_extended_gain: 0.0,
            max_length: 135.0,
            length_units: LengthUnits::Km,
            max_loss: 28.0,
            padding: 11.0,
            eol: 0.0,
            con_in: 0.0,
            con_out: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub raman_params: RamanParams,
    pub nli_params: NliParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RamanParams {
    pub flag: bool,
    pub result_spatial_resolution: u32,
    pub solver_spatial_resolution: u32,
}

impl Default for RamanParams {
    fn default() -> Self {
        Self {
            flag: true,
            result_spatial_resolution: 10,
            solver_spatial_resolution: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NliParams {
    pub method: String,
    pub dispersion_tolerance: f64,
    pub phase_shift_tolerance: f64,
    pub computed_channels: Vec<u32>,
}

impl Default for NliParams {
    fn default() -> Self {
        Self {
            method: "ggn_spectrally_separated".to_string(),
            dispersion_tolerance: 1.0,
            phase_shift_tolerance: 0.1,
            computed_channels: Vec::new(),
        }
    }
}
