//! Content-based hashing for run IDs.

use lp_core::ElementId;
use lp_equipment::Equipment;
use lp_topology::Network;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

/// Hash of everything that determines a simulation outcome.
///
/// Any edit to the network bumps `updated_at`, so stale cache entries are
/// never matched.
pub fn compute_run_id(
    network: &Network,
    equipment: &Equipment,
    path: &[ElementId],
    input_power_dbm: f64,
    engine_version: &str,
) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    hasher.update(serde_json::to_string(network)?.as_bytes());
    hasher.update(serde_json::to_string(equipment)?.as_bytes());
    hasher.update(serde_json::to_string(path)?.as_bytes());
    hasher.update(input_power_dbm.to_bits().to_le_bytes());
    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<ElementId> {
        vec!["a".into(), "b".into()]
    }

    #[test]
    fn hash_stability() {
        let network = Network::new("lab");
        let eq = Equipment::builtin();
        let h1 = compute_run_id(&network, &eq, &path(), 0.0, "v1").unwrap();
        let h2 = compute_run_id(&network, &eq, &path(), 0.0, "v1").unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let network = Network::new("lab");
        let eq = Equipment::builtin();
        let base = compute_run_id(&network, &eq, &path(), 0.0, "v1").unwrap();

        assert_ne!(base, compute_run_id(&network, &eq, &path(), 1.0, "v1").unwrap());
        assert_ne!(base, compute_run_id(&network, &eq, &path(), 0.0, "v2").unwrap());
        let reversed: Vec<ElementId> = path().into_iter().rev().collect();
        assert_ne!(base, compute_run_id(&network, &eq, &reversed, 0.0, "v1").unwrap());

        assert_ne!(
            base,
            compute_run_id(&network, &Equipment::default(), &path(), 0.0, "v1").unwrap()
        );

        let mut edited = network.clone();
        edited.si.tx_osnr = 40.0;
        assert_ne!(base, compute_run_id(&edited, &eq, &path(), 0.0, "v1").unwrap());
    }
}
