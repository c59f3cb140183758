//! Editing operations on a network's embedded elements, connections and services.
//!
//! Every successful edit bumps `updated_at`. Edits are all-or-nothing: a failed
//! call leaves the network untouched.

use chrono::Utc;
use lp_core::{ConnectionId, ElementId, ElementKind, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::schema::{
    ConnectionDef, ElementDef, ElementParams, Metadata, Network, ServiceDef, ServiceRequirements,
    ServiceStatus, SiConfig, SimulationConfig, SpanConfig,
};
use crate::validate::validate_element;
use crate::{TopologyError, TopologyResult};

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Payload for a new element.
///
/// `element_id` is only a temporary client-side handle used to wire up
/// connections during imports; stored elements always get a fresh id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_variety: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub params: ElementParams,
}

impl ElementCreate {
    fn into_def(self, element_id: ElementId) -> ElementDef {
        ElementDef {
            element_id,
            name: self.name,
            type_variety: self.type_variety,
            metadata: self.metadata,
            params: self.params,
        }
    }
}

/// Partial element update. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ElementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Must match the stored kind when present.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ElementParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionCreate {
    pub from_node: ElementId,
    pub to_node: ElementId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceCreate {
    pub name: String,
    pub path: Vec<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_requirements: Option<ServiceRequirements>,
}

/// How client-supplied element ids are treated on import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportStrategy {
    /// Always mint new ids and rewrite connections to them.
    #[default]
    GenerateNewId,
    /// Mint new ids, but reject any temp id or connection that collides
    /// with what the network already holds.
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubTopologyImport {
    pub elements: Vec<ElementCreate>,
    #[serde(default)]
    pub connections: Vec<ConnectionCreate>,
    #[serde(default)]
    pub strategy: ImportStrategy,
}

/// A whole network supplied by a client, with temporary element ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkImport {
    pub network_name: String,
    #[serde(default)]
    pub elements: Vec<ElementCreate>,
    #[serde(default)]
    pub connections: Vec<ConnectionCreate>,
    #[serde(default)]
    pub services: Vec<ServiceCreate>,
    #[serde(default, rename = "SI", alias = "si")]
    pub si: SiConfig,
    #[serde(default, rename = "Span", alias = "span")]
    pub span: SpanConfig,
    #[serde(default)]
    pub simulation_config: SimulationConfig,
}

/// Outcome of an import: which temporary ids became which stored ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub id_map: BTreeMap<ElementId, ElementId>,
    pub elements_added: usize,
    pub connections_added: usize,
}

impl Network {
    /// Add an element under a freshly minted id.
    pub fn add_element(&mut self, element: ElementCreate) -> TopologyResult<ElementId> {
        let id = ElementId::new(fresh_id());
        let def = element.into_def(id.clone());
        validate_element(&def)?;
        self.elements.push(def);
        self.touch();
        Ok(id)
    }

    /// Apply a partial update. The element kind is immutable.
    pub fn update_element(
        &mut self,
        element_id: &str,
        update: ElementUpdate,
    ) -> TopologyResult<&ElementDef> {
        let idx = self
            .elements
            .iter()
            .position(|e| e.element_id == element_id)
            .ok_or_else(|| TopologyError::ElementNotFound {
                id: element_id.to_string(),
            })?;

        let stored = self.elements[idx].kind();
        let requested = [update.kind, update.params.as_ref().map(ElementParams::kind)];
        if let Some(requested) = requested.into_iter().flatten().find(|k| *k != stored) {
            return Err(TopologyError::KindChange {
                id: element_id.to_string(),
                stored,
                requested,
            });
        }

        let mut updated = self.elements[idx].clone();
        if let Some(name) = update.name {
            updated.name = name;
        }
        if let Some(type_variety) = update.type_variety {
            updated.type_variety = Some(type_variety);
        }
        if let Some(params) = update.params {
            updated.params = params;
        }
        if let Some(metadata) = update.metadata {
            updated.metadata = metadata;
        }
        validate_element(&updated)?;

        self.elements[idx] = updated;
        self.touch();
        Ok(&self.elements[idx])
    }

    /// Remove an element together with every connection touching it and
    /// every service routed through it.
    pub fn remove_element(&mut self, element_id: &str) -> TopologyResult<ElementDef> {
        let idx = self
            .elements
            .iter()
            .position(|e| e.element_id == element_id)
            .ok_or_else(|| TopologyError::ElementNotFound {
                id: element_id.to_string(),
            })?;
        let removed = self.elements.remove(idx);
        self.connections
            .retain(|c| c.from_node != element_id && c.to_node != element_id);
        self.services
            .retain(|svc| !svc.path.iter().any(|hop| hop == element_id));
        self.touch();
        Ok(removed)
    }

    pub fn add_connection(&mut self, connection: ConnectionCreate) -> TopologyResult<ConnectionId> {
        for endpoint in [&connection.from_node, &connection.to_node] {
            if !self.contains_element(endpoint.as_str()) {
                return Err(TopologyError::ElementNotFound {
                    id: endpoint.to_string(),
                });
            }
        }
        let id = ConnectionId::new(fresh_id());
        self.connections.push(ConnectionDef {
            connection_id: id.clone(),
            from_node: connection.from_node,
            to_node: connection.to_node,
        });
        self.touch();
        Ok(id)
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> TopologyResult<ConnectionDef> {
        let idx = self
            .connections
            .iter()
            .position(|c| c.connection_id == connection_id)
            .ok_or_else(|| TopologyError::ConnectionNotFound {
                id: connection_id.to_string(),
            })?;
        let removed = self.connections.remove(idx);
        self.touch();
        Ok(removed)
    }

    pub fn add_service(&mut self, service: ServiceCreate) -> TopologyResult<ServiceId> {
        if let Some(missing) = service
            .path
            .iter()
            .find(|hop| !self.contains_element(hop.as_str()))
        {
            return Err(TopologyError::ElementNotFound {
                id: missing.to_string(),
            });
        }
        let now = Utc::now();
        let id = ServiceId::new(fresh_id());
        self.services.push(ServiceDef {
            service_id: id.clone(),
            name: service.name,
            path: service.path,
            service_requirements: service.service_requirements,
            status: ServiceStatus::default(),
            created_at: now,
            updated_at: now,
        });
        self.touch();
        Ok(id)
    }

    pub fn update_service_status(
        &mut self,
        service_id: &str,
        status: ServiceStatus,
    ) -> TopologyResult<&ServiceDef> {
        let idx = self
            .services
            .iter()
            .position(|s| s.service_id == service_id)
            .ok_or_else(|| TopologyError::ServiceNotFound {
                id: service_id.to_string(),
            })?;
        let service = &mut self.services[idx];
        service.status = status;
        service.updated_at = Utc::now();
        self.touch();
        Ok(&self.services[idx])
    }

    pub fn remove_service(&mut self, service_id: &str) -> TopologyResult<ServiceDef> {
        let idx = self
            .services
            .iter()
            .position(|s| s.service_id == service_id)
            .ok_or_else(|| TopologyError::ServiceNotFound {
                id: service_id.to_string(),
            })?;
        let removed = self.services.remove(idx);
        self.touch();
        Ok(removed)
    }

    pub fn set_si(&mut self, si: SiConfig) {
        self.si = si;
        self.touch();
    }

    pub fn set_span(&mut self, span: SpanConfig) {
        self.span = span;
        self.touch();
    }

    pub fn set_simulation_config(&mut self, config: SimulationConfig) {
        self.simulation_config = config;
        self.touch();
    }

    /// Merge a sub-topology into this network.
    ///
    /// Connection endpoints are resolved through the temp-id map first and
    /// otherwise taken as ids of elements already in the network.
    pub fn insert_sub_topology(&mut self, sub: SubTopologyImport) -> TopologyResult<ImportSummary> {
        let mut id_map = BTreeMap::new();
        let mut new_elements = Vec::with_capacity(sub.elements.len());

        for element in sub.elements {
            let new_id = ElementId::new(fresh_id());
            if let Some(temp_id) = &element.element_id {
                if sub.strategy == ImportStrategy::Error
                    && self.contains_element(temp_id.as_str())
                {
                    return Err(TopologyError::Conflict {
                        what: format!(
                            "element id {} already exists in network {}",
                            temp_id, self.network_id
                        ),
                    });
                }
                id_map.insert(temp_id.clone(), new_id.clone());
            }
            let def = element.into_def(new_id);
            validate_element(&def)?;
            new_elements.push(def);
        }

        let known: HashSet<&str> = self
            .elements
            .iter()
            .chain(new_elements.iter())
            .map(|e| e.element_id.as_str())
            .collect();

        let mut new_connections = Vec::with_capacity(sub.connections.len());
        for connection in sub.connections {
            let from = id_map
                .get(&connection.from_node)
                .cloned()
                .unwrap_or(connection.from_node);
            let to = id_map
                .get(&connection.to_node)
                .cloned()
                .unwrap_or(connection.to_node);

            for endpoint in [&from, &to] {
                if !known.contains(endpoint.as_str()) {
                    return Err(TopologyError::ElementNotFound {
                        id: endpoint.to_string(),
                    });
                }
            }
            if sub.strategy == ImportStrategy::Error
                && self.has_connection(from.as_str(), to.as_str())
            {
                return Err(TopologyError::Conflict {
                    what: format!(
                        "connection {} -> {} already exists in network {}",
                        from, to, self.network_id
                    ),
                });
            }
            new_connections.push(ConnectionDef {
                connection_id: ConnectionId::new(fresh_id()),
                from_node: from,
                to_node: to,
            });
        }

        let summary = ImportSummary {
            id_map,
            elements_added: new_elements.len(),
            connections_added: new_connections.len(),
        };
        self.elements.extend(new_elements);
        self.connections.extend(new_connections);
        self.touch();
        Ok(summary)
    }

    /// Build a brand-new network from an import payload.
    pub fn from_import(import: NetworkImport) -> TopologyResult<(Network, ImportSummary)> {
        let mut network = Network::new(import.network_name);
        network.si = import.si;
        network.span = import.span;
        network.simulation_config = import.simulation_config;

        let summary = network.insert_sub_topology(SubTopologyImport {
            elements: import.elements,
            connections: import.connections,
            strategy: ImportStrategy::GenerateNewId,
        })?;

        for mut service in import.services {
            for hop in &mut service.path {
                if let Some(mapped) = summary.id_map.get(hop) {
                    *hop = mapped.clone();
                }
            }
            network.add_service(service)?;
        }

        crate::validate::validate_network(&network)?;
        Ok((network, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EdfaParams, FiberParams};

    fn trx(name: &str) -> ElementCreate {
        ElementCreate {
            element_id: None,
            name: name.to_string(),
            type_variety: None,
            metadata: Metadata::new(),
            params: ElementParams::Transceiver,
        }
    }

    #[test]
    fn add_element_mints_fresh_id() {
        let mut net = Network::new("n");
        let mut create = trx("a");
        create.element_id = Some(ElementId::new("client-temp"));
        let id = net.add_element(create).unwrap();
        assert_ne!(id, "client-temp");
        assert!(net.contains_element(id.as_str()));
    }

    #[test]
    fn kind_change_rejected() {
        let mut net = Network::new("n");
        let id = net.add_element(trx("a")).unwrap();
        let err = net
            .update_element(
                id.as_str(),
                ElementUpdate {
                    params: Some(ElementParams::Edfa(EdfaParams::default())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::KindChange {
                stored: ElementKind::Transceiver,
                requested: ElementKind::Edfa,
                ..
            }
        ));
        assert_eq!(net.element(id.as_str()).unwrap().kind(), ElementKind::Transceiver);
    }

    #[test]
    fn explicit_kind_field_rejected_too() {
        let mut net = Network::new("n");
        let id = net.add_element(trx("a")).unwrap();
        let err = net
            .update_element(
                id.as_str(),
                ElementUpdate {
                    kind: Some(ElementKind::Fiber),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, TopologyError::KindChange { .. }));
    }

    #[test]
    fn same_kind_params_update_applies() {
        let mut net = Network::new("n");
        let id = net
            .add_element(ElementCreate {
                params: ElementParams::Fiber(FiberParams::default()),
                ..trx("span")
            })
            .unwrap();
        let updated = net
            .update_element(
                id.as_str(),
                ElementUpdate {
                    name: Some("span-renamed".into()),
                    params: Some(ElementParams::Fiber(FiberParams {
                        length: 100.0,
                        ..Default::default()
                    })),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "span-renamed");
        assert_eq!(
            updated.params,
            ElementParams::Fiber(FiberParams {
                length: 100.0,
                ..Default::default()
            })
        );
    }

    #[test]
    fn remove_element_drops_connections() {
        let mut net = Network::new("n");
        let a = net.add_element(trx("a")).unwrap();
        let b = net.add_element(trx("b")).unwrap();
        net.add_connection(ConnectionCreate {
            from_node: a.clone(),
            to_node: b.clone(),
        })
        .unwrap();
        net.remove_element(b.as_str()).unwrap();
        assert!(net.connections.is_empty());
    }

    #[test]
    fn connection_needs_existing_endpoints() {
        let mut net = Network::new("n");
        let a = net.add_element(trx("a")).unwrap();
        let err = net
            .add_connection(ConnectionCreate {
                from_node: a,
                to_node: ElementId::new("nowhere"),
            })
            .unwrap_err();
        assert!(matches!(err, TopologyError::ElementNotFound { .. }));
    }

    #[test]
    fn sub_topology_remaps_temp_ids() {
        let mut net = Network::new("n");
        let mut a = trx("a");
        a.element_id = Some(ElementId::new("tmp-a"));
        let mut b = trx("b");
        b.element_id = Some(ElementId::new("tmp-b"));

        let summary = net
            .insert_sub_topology(SubTopologyImport {
                elements: vec![a, b],
                connections: vec![ConnectionCreate {
                    from_node: ElementId::new("tmp-a"),
                    to_node: ElementId::new("tmp-b"),
                }],
                strategy: ImportStrategy::GenerateNewId,
            })
            .unwrap();

        assert_eq!(summary.elements_added, 2);
        assert_eq!(summary.connections_added, 1);
        let new_a = &summary.id_map[&ElementId::new("tmp-a")];
        let new_b = &summary.id_map[&ElementId::new("tmp-b")];
        assert!(net.has_connection(new_a.as_str(), new_b.as_str()));
    }

    #[test]
    fn error_strategy_rejects_existing_id_and_leaves_network_untouched() {
        let mut net = Network::new("n");
        let existing = net.add_element(trx("a")).unwrap();
        let before = net.clone();

        let mut dup = trx("dup");
        dup.element_id = Some(existing);
        let err = net
            .insert_sub_topology(SubTopologyImport {
                elements: vec![dup],
                connections: vec![],
                strategy: ImportStrategy::Error,
            })
            .unwrap_err();
        assert!(matches!(err, TopologyError::Conflict { .. }));
        assert_eq!(net, before);
    }

    #[test]
    fn service_path_must_exist() {
        let mut net = Network::new("n");
        let err = net
            .add_service(ServiceCreate {
                name: "svc".into(),
                path: vec![ElementId::new("missing")],
                service_requirements: None,
            })
            .unwrap_err();
        assert!(matches!(err, TopologyError::ElementNotFound { .. }));
    }

    #[test]
    fn removing_element_drops_services_through_it() {
        let mut net = Network::new("n");
        let a = net.add_element(trx("a")).unwrap();
        let b = net.add_element(trx("b")).unwrap();
        let c = net.add_element(trx("c")).unwrap();
        net.add_service(ServiceCreate {
            name: "through-a".into(),
            path: vec![a.clone(), b.clone()],
            service_requirements: None,
        })
        .unwrap();
        let kept = net
            .add_service(ServiceCreate {
                name: "b-to-c".into(),
                path: vec![b, c],
                service_requirements: None,
            })
            .unwrap();

        net.remove_element(a.as_str()).unwrap();

        assert_eq!(net.services.len(), 1);
        assert_eq!(net.services[0].service_id, kept);
        crate::validate::validate_network(&net).unwrap();
    }
}
