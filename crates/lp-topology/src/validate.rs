//! Network validation logic.

use crate::schema::{ElementDef, ElementParams, FiberParams, Network, SiConfig, SpanConfig};
use lp_core::units::constants::MAX_CHANNELS;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_network(network: &Network) -> Result<(), ValidationError> {
    if network.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: network.version,
        });
    }

    validate_si(&network.si)?;
    validate_span(&network.span)?;

    let mut element_ids = HashSet::new();
    for element in &network.elements {
        if !element_ids.insert(element.element_id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: element.element_id.to_string(),
                context: format!("network '{}' elements", network.network_name),
            });
        }
        validate_element(element)?;
    }

    let mut connection_ids = HashSet::new();
    for connection in &network.connections {
        if !connection_ids.insert(connection.connection_id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: connection.connection_id.to_string(),
                context: format!("network '{}' connections", network.network_name),
            });
        }
        for endpoint in [&connection.from_node, &connection.to_node] {
            if !element_ids.contains(endpoint.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: endpoint.to_string(),
                    context: format!("connection '{}'", connection.connection_id),
                });
            }
        }
    }

    let mut service_ids = HashSet::new();
    for service in &network.services {
        if !service_ids.insert(service.service_id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: service.service_id.to_string(),
                context: format!("network '{}' services", network.network_name),
            });
        }
        for hop in &service.path {
            if !element_ids.contains(hop.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: hop.to_string(),
                    context: format!("service '{}' path", service.name),
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn validate_element(element: &ElementDef) -> Result<(), ValidationError> {
    match &element.params {
        ElementParams::Transceiver | ElementParams::Fused => Ok(()),
        ElementParams::Fiber(fiber) => validate_fiber(element, fiber),
        ElementParams::RamanFiber(raman) => {
            validate_fiber(element, &raman.fiber)?;
            if let Some(eff) = raman.raman_efficiency
                && (!eff.is_finite() || eff < 0.0)
            {
                return Err(invalid(
                    element,
                    "raman_efficiency",
                    eff,
                    "must be non-negative and finite",
                ));
            }
            if let Some(nf) = raman.noise_figure
                && !nf.is_finite()
            {
                return Err(invalid(element, "noise_figure", nf, "must be finite"));
            }
            Ok(())
        }
        ElementParams::Edfa(edfa) => {
            if let Some(gain) = edfa.gain_target
                && !gain.is_finite()
            {
                return Err(invalid(element, "gain_target", gain, "must be finite"));
            }
            if let Some(tilt) = edfa.tilt_target
                && !tilt.is_finite()
            {
                return Err(invalid(element, "tilt_target", tilt, "must be finite"));
            }
            Ok(())
        }
        ElementParams::Roadm(roadm) => {
            if let Some(target) = roadm.target_pch_out_db
                && !target.is_finite()
            {
                return Err(invalid(element, "target_pch_out_db", target, "must be finite"));
            }
            Ok(())
        }
    }
}

fn validate_fiber(element: &ElementDef, fiber: &FiberParams) -> Result<(), ValidationError> {
    if !fiber.length.is_finite() || fiber.length < 0.0 {
        return Err(invalid(element, "length", fiber.length, "must be non-negative and finite"));
    }
    if !fiber.loss_coef.is_finite() || fiber.loss_coef < 0.0 {
        return Err(invalid(
            element,
            "loss_coef",
            fiber.loss_coef,
            "must be non-negative and finite",
        ));
    }
    if !fiber.att_in.is_finite() || fiber.att_in < 0.0 {
        return Err(invalid(element, "att_in", fiber.att_in, "must be non-negative and finite"));
    }
    Ok(())
}

fn validate_si(si: &SiConfig) -> Result<(), ValidationError> {
    for (field, value) in [
        ("SI f_min", si.f_min),
        ("SI f_max", si.f_max),
        ("SI spacing", si.spacing),
        ("SI baud_rate", si.baud_rate),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: "must be positive and finite".to_string(),
            });
        }
    }
    if si.f_max <= si.f_min {
        return Err(ValidationError::InvalidValue {
            field: "SI f_max".to_string(),
            value: si.f_max.to_string(),
            reason: format!("must exceed f_min ({})", si.f_min),
        });
    }
    let slots = (si.f_max - si.f_min) / si.spacing;
    if !(1.0..(MAX_CHANNELS + 1) as f64).contains(&slots) {
        return Err(ValidationError::InvalidValue {
            field: "SI spacing".to_string(),
            value: si.spacing.to_string(),
            reason: format!(
                "grid must hold between 1 and {} channels, holds {}",
                MAX_CHANNELS,
                slots.floor()
            ),
        });
    }
    if !(0.0..=1.0).contains(&si.roll_off) {
        return Err(ValidationError::InvalidValue {
            field: "SI roll_off".to_string(),
            value: si.roll_off.to_string(),
            reason: "must lie in [0, 1]".to_string(),
        });
    }
    if !si.tx_osnr.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: "SI tx_osnr".to_string(),
            value: si.tx_osnr.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_span(span: &SpanConfig) -> Result<(), ValidationError> {
    for (field, value) in [("Span con_in", span.con_in), ("Span con_out", span.con_out)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }
    Ok(())
}

fn invalid(element: &ElementDef, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("element '{}' {}", element.name, field),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
