//! Resolution of caller paths against a stored network.

use lp_core::{ElementId, km, m};
use lp_engine::{Edfa, Element, Fiber, Fused, RamanFiber, Roadm, Transceiver};
use lp_results::AdjacencyWarning;
use lp_topology::{ElementDef, ElementParams, FiberParams, LengthUnits, Network};
use std::collections::{HashMap, HashSet};

use crate::error::{AppError, AppResult};

/// Typed elements in caller order plus any adjacency findings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub elements: Vec<Element>,
    pub warnings: Vec<AdjacencyWarning>,
}

fn fiber(id: &ElementId, params: &FiberParams) -> Fiber {
    let length = match params.length_units {
        LengthUnits::Km => km(params.length),
        LengthUnits::M => m(params.length),
    };
    Fiber {
        id: id.clone(),
        length,
        loss_coef: params.loss_coef,
        att_in: params.att_in,
    }
}

/// Convert a stored element into its engine counterpart.
pub fn to_engine_element(def: &ElementDef) -> Element {
    let id = def.element_id.clone();
    match &def.params {
        ElementParams::Transceiver => Element::Transceiver(Transceiver { id }),
        ElementParams::Fiber(p) => Element::Fiber(fiber(&id, p)),
        ElementParams::RamanFiber(p) => Element::RamanFiber(RamanFiber {
            fiber: fiber(&id, &p.fiber),
            raman_efficiency: p.raman_efficiency,
            noise_figure: p.noise_figure,
        }),
        ElementParams::Edfa(p) => Element::Edfa(Edfa {
            id,
            type_variety: def.type_variety.clone(),
            gain_target: p.gain_target,
            tilt_target: p.tilt_target,
        }),
        ElementParams::Roadm(p) => Element::Roadm(Roadm {
            id,
            type_variety: def.type_variety.clone(),
            target_pch_out_db: p.target_pch_out_db,
        }),
        ElementParams::Fused => Element::Fused(Fused { id }),
    }
}

/// Resolve `path` against `network`, preserving caller order.
///
/// Every unknown id is reported at once. Consecutive elements without a
/// directed connection produce warnings, not errors, up to the receiving
/// transceiver.
pub fn resolve(network: &Network, path: &[ElementId]) -> AppResult<ResolvedPath> {
    if path.is_empty() {
        return Err(AppError::InvalidInput("path must not be empty".to_string()));
    }

    let by_id: HashMap<&str, &ElementDef> = network
        .elements
        .iter()
        .map(|e| (e.element_id.as_str(), e))
        .collect();

    let mut elements = Vec::with_capacity(path.len());
    let mut missing = Vec::new();
    let mut seen = HashSet::new();
    for id in path {
        match by_id.get(id.as_str()) {
            Some(def) => elements.push(to_engine_element(def)),
            None => {
                if seen.insert(id.as_str()) {
                    missing.push(id.clone());
                }
            }
        }
    }
    if !missing.is_empty() {
        return Err(AppError::PathElementNotFound { missing });
    }

    // Hops past the receiving transceiver are never propagated.
    let propagated = elements
        .iter()
        .skip(1)
        .position(|e| matches!(e, Element::Transceiver(_)))
        .map_or(path.len(), |i| i + 2);

    let connected: HashSet<(&str, &str)> = network
        .connections
        .iter()
        .map(|c| (c.from_node.as_str(), c.to_node.as_str()))
        .collect();
    let warnings: Vec<AdjacencyWarning> = path[..propagated]
        .windows(2)
        .filter(|pair| !connected.contains(&(pair[0].as_str(), pair[1].as_str())))
        .map(|pair| {
            tracing::warn!(from = %pair[0], to = %pair[1], "path hop has no connection");
            AdjacencyWarning {
                from: pair[0].clone(),
                to: pair[1].clone(),
                message: format!("no connection from '{}' to '{}'", pair[0], pair[1]),
            }
        })
        .collect();

    Ok(ResolvedPath { elements, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{ElementKind, to_km};
    use lp_topology::{ConnectionDef, EdfaParams};

    fn def(id: &str, params: ElementParams) -> ElementDef {
        ElementDef {
            element_id: id.into(),
            name: id.to_string(),
            type_variety: None,
            metadata: Default::default(),
            params,
        }
    }

    fn network() -> Network {
        let mut net = Network::new("test");
        net.elements = vec![
            def("t1", ElementParams::Transceiver),
            def(
                "f1",
                ElementParams::Fiber(FiberParams {
                    length: 2500.0,
                    length_units: LengthUnits::M,
                    ..Default::default()
                }),
            ),
            def("a1", ElementParams::Edfa(EdfaParams::default())),
            def("t2", ElementParams::Transceiver),
        ];
        net.connections = vec![
            ConnectionDef {
                connection_id: "c1".into(),
                from_node: "t1".into(),
                to_node: "f1".into(),
            },
            ConnectionDef {
                connection_id: "c2".into(),
                from_node: "f1".into(),
                to_node: "a1".into(),
            },
        ];
        net
    }

    fn ids(raw: &[&str]) -> Vec<ElementId> {
        raw.iter().map(|s| ElementId::new(*s)).collect()
    }

    #[test]
    fn preserves_caller_order() {
        let resolved = resolve(&network(), &ids(&["t1", "a1", "f1"])).unwrap();
        let kinds: Vec<_> = resolved.elements.iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Transceiver, ElementKind::Edfa, ElementKind::Fiber]
        );
    }

    #[test]
    fn reports_every_missing_id_once() {
        let err = resolve(&network(), &ids(&["t1", "x", "f1", "y", "x"])).unwrap_err();
        match err {
            AppError::PathElementNotFound { missing } => assert_eq!(missing, ids(&["x", "y"])),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_path_is_invalid_input() {
        assert!(matches!(
            resolve(&network(), &[]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn unconnected_hops_warn() {
        let resolved = resolve(&network(), &ids(&["t1", "f1", "a1", "t2"])).unwrap();
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].from, ElementId::new("a1"));
        assert_eq!(resolved.warnings[0].to, ElementId::new("t2"));
    }

    #[test]
    fn hops_past_receiver_do_not_warn() {
        let resolved = resolve(&network(), &ids(&["t1", "f1", "t2", "a1", "f1"])).unwrap();
        assert_eq!(resolved.elements.len(), 5);
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].from, ElementId::new("f1"));
        assert_eq!(resolved.warnings[0].to, ElementId::new("t2"));
    }

    #[test]
    fn duplicate_ids_resolve_each_occurrence() {
        let resolved = resolve(&network(), &ids(&["t1", "f1", "f1"])).unwrap();
        assert_eq!(resolved.elements.len(), 3);
    }

    #[test]
    fn connections_are_directed() {
        let resolved = resolve(&network(), &ids(&["f1", "t1"])).unwrap();
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn metre_lengths_normalised() {
        let resolved = resolve(&network(), &ids(&["f1"])).unwrap();
        match &resolved.elements[0] {
            Element::Fiber(f) => assert!((to_km(f.length) - 2.5).abs() < 1e-12),
            other => panic!("unexpected element: {other:?}"),
        }
    }

    #[test]
    fn network_left_untouched() {
        let net = network();
        let before = net.clone();
        let _ = resolve(&net, &ids(&["t1", "f1"]));
        assert_eq!(net, before);
    }
}
