//! Schema migration framework.

use crate::TopologyError;
use crate::schema::Network;
use lp_core::ConnectionId;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut network: Network) -> Result<Network, TopologyError> {
    while network.version < LATEST_VERSION {
        network = migrate_one_version(network)?;
    }
    Ok(network)
}

fn migrate_one_version(network: Network) -> Result<Network, TopologyError> {
    match network.version {
        0 => migrate_v0_to_v1(network),
        v => Err(TopologyError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files stored bare `from_node`/`to_node` pairs; give each
/// connection its own identifier.
fn migrate_v0_to_v1(mut network: Network) -> Result<Network, TopologyError> {
    for connection in &mut network.connections {
        if connection.connection_id.as_str().is_empty() {
            connection.connection_id = ConnectionId::new(uuid::Uuid::new_v4().to_string());
        }
    }
    network.version = 1;
    Ok(network)
}
