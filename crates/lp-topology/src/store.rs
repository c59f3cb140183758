//! Network storage API.
//!
//! Reads return snapshots: a caller holding a `Network` does not observe
//! later writes, and no isolation between concurrent writers is offered.

use chrono::{DateTime, Utc};
use lp_core::NetworkId;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::Network;
use crate::{TopologyError, TopologyResult, migrate_to_latest, validate_network};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Listing filter and pagination. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkQuery {
    pub name_contains: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl Default for NetworkQuery {
    fn default() -> Self {
        Self {
            name_contains: None,
            sort_by: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub network_id: NetworkId,
    pub network_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub element_count: usize,
    pub connection_count: usize,
    pub service_count: usize,
}

impl From<&Network> for NetworkSummary {
    fn from(network: &Network) -> Self {
        Self {
            network_id: network.network_id.clone(),
            network_name: network.network_name.clone(),
            created_at: network.created_at,
            updated_at: network.updated_at,
            element_count: network.elements.len(),
            connection_count: network.connections.len(),
            service_count: network.services.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPage {
    pub networks: Vec<NetworkSummary>,
    pub total_count: usize,
    pub page: usize,
    pub limit: usize,
}

/// Source of stored networks.
pub trait NetworkStore: Send + Sync {
    /// Fetch a snapshot of a network, `None` if no such network exists.
    fn get_network(&self, id: &NetworkId) -> TopologyResult<Option<Network>>;

    /// Insert or replace a network. The network is validated first.
    fn put_network(&mut self, network: Network) -> TopologyResult<()>;

    /// Returns `true` if a network was removed.
    fn delete_network(&mut self, id: &NetworkId) -> TopologyResult<bool>;

    fn list_networks(&self, query: &NetworkQuery) -> TopologyResult<NetworkPage>;
}

fn paginate(mut summaries: Vec<NetworkSummary>, query: &NetworkQuery) -> NetworkPage {
    if let Some(needle) = &query.name_contains {
        let needle = needle.to_lowercase();
        summaries.retain(|s| s.network_name.to_lowercase().contains(&needle));
    }

    summaries.sort_by(|a, b| match query.sort_by {
        SortKey::Name => a.network_name.cmp(&b.network_name),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    });
    if query.order == SortOrder::Desc {
        summaries.reverse();
    }

    let total_count = summaries.len();
    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let networks = summaries
        .into_iter()
        .skip(page.saturating_sub(1).saturating_mul(limit))
        .take(limit)
        .collect();

    NetworkPage {
        networks,
        total_count,
        page,
        limit,
    }
}

/// Process-local store, mostly for tests and one-shot CLI runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    networks: BTreeMap<NetworkId, Network>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(mut self, network: Network) -> TopologyResult<Self> {
        self.put_network(network)?;
        Ok(self)
    }
}

impl NetworkStore for MemoryStore {
    fn get_network(&self, id: &NetworkId) -> TopologyResult<Option<Network>> {
        Ok(self.networks.get(id).cloned())
    }

    fn put_network(&mut self, network: Network) -> TopologyResult<()> {
        validate_network(&network)?;
        self.networks.insert(network.network_id.clone(), network);
        Ok(())
    }

    fn delete_network(&mut self, id: &NetworkId) -> TopologyResult<bool> {
        Ok(self.networks.remove(id).is_some())
    }

    fn list_networks(&self, query: &NetworkQuery) -> TopologyResult<NetworkPage> {
        let summaries = self.networks.values().map(NetworkSummary::from).collect();
        Ok(paginate(summaries, query))
    }
}

/// One pretty-printed JSON document per network under a root directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root_dir: PathBuf,
}

impl DirStore {
    pub fn new(root_dir: PathBuf) -> TopologyResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn network_path(&self, id: &NetworkId) -> TopologyResult<PathBuf> {
        if !id.is_file_safe() {
            return Err(TopologyError::InvalidId { id: id.to_string() });
        }
        Ok(self.root_dir.join(format!("{}.json", id)))
    }

    fn read(path: &Path) -> TopologyResult<Network> {
        let content = fs::read_to_string(path)?;
        let network: Network = serde_json::from_str(&content)?;
        migrate_to_latest(network)
    }
}

impl NetworkStore for DirStore {
    fn get_network(&self, id: &NetworkId) -> TopologyResult<Option<Network>> {
        let path = self.network_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read(&path).map(Some)
    }

    fn put_network(&mut self, network: Network) -> TopologyResult<()> {
        let path = self.network_path(&network.network_id)?;
        validate_network(&network)?;
        let content = serde_json::to_string_pretty(&network)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn delete_network(&mut self, id: &NetworkId) -> TopologyResult<bool> {
        let path = self.network_path(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    fn list_networks(&self, query: &NetworkQuery) -> TopologyResult<NetworkPage> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(network) => summaries.push(NetworkSummary::from(&network)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable network file");
                }
            }
        }
        Ok(paginate(summaries, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Network {
        Network::new(name)
    }

    #[test]
    fn memory_store_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(
            store
                .get_network(&NetworkId::new("nope"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn list_filters_case_insensitively() {
        let store = MemoryStore::new()
            .with_network(named("Metro Ring"))
            .unwrap()
            .with_network(named("Backbone"))
            .unwrap();
        let page = store
            .list_networks(&NetworkQuery {
                name_contains: Some("metro".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.networks[0].network_name, "Metro Ring");
    }

    #[test]
    fn list_paginates_by_name() {
        let mut store = MemoryStore::new();
        for name in ["a", "b", "c", "d", "e"] {
            store.put_network(named(name)).unwrap();
        }
        let page = store
            .list_networks(&NetworkQuery {
                sort_by: SortKey::Name,
                order: SortOrder::Asc,
                page: 2,
                limit: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total_count, 5);
        let names: Vec<_> = page.networks.iter().map(|n| n.network_name.as_str()).collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let store = MemoryStore::new()
            .with_network(named("a"))
            .unwrap()
            .with_network(named("b"))
            .unwrap();
        let page = store
            .list_networks(&NetworkQuery {
                page: usize::MAX,
                limit: 2,
                ..Default::default()
            })
            .unwrap();
        assert!(page.networks.is_empty());
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page, usize::MAX);
    }

    #[test]
    fn delete_reports_presence() {
        let net = named("x");
        let id = net.network_id.clone();
        let mut store = MemoryStore::new().with_network(net).unwrap();
        assert!(store.delete_network(&id).unwrap());
        assert!(!store.delete_network(&id).unwrap());
    }
}
