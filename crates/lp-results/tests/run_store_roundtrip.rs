use lp_core::{ElementKind, NetworkId};
use lp_results::*;
use std::collections::BTreeMap;

fn manifest(run_id: &str, network: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        network_id: NetworkId::new(network),
        network_name: "Lab".to_string(),
        path: vec!["t1".into(), "span".into()],
        input_power_dbm: 0.0,
        timestamp: timestamp.to_string(),
        engine_version: "lp-engine/0.1.0".to_string(),
    }
}

fn response(run_id: &str) -> SimulationResponse {
    let mut details = BTreeMap::new();
    details.insert("loss_db".to_string(), serde_json::json!(16.0));
    SimulationResponse {
        path_results: vec![SimulationStepResult {
            element_id: "span".into(),
            element_type: ElementKind::Fiber,
            input_power_dbm: 0.0,
            input_osnr_db: None,
            output_power_dbm: -16.0,
            output_osnr_db: None,
            added_noise_mw: 0.0,
            details,
        }],
        final_osnr_db: None,
        final_power_dbm: -16.0,
        warnings: vec![AdjacencyWarning {
            from: "t1".into(),
            to: "span".into(),
            message: "no connection".to_string(),
        }],
        run_id: run_id.to_string(),
    }
}

#[test]
fn save_and_load_run() {
    let dir = std::env::temp_dir().join("lp_results_roundtrip");
    let _ = std::fs::remove_dir_all(&dir);
    let store = RunStore::new(dir).unwrap();

    assert!(!store.has_run("run-1"));
    store
        .save_run(&manifest("run-1", "net-a", "2026-01-01T00:00:00Z"), &response("run-1"))
        .unwrap();
    assert!(store.has_run("run-1"));

    assert_eq!(
        store.load_manifest("run-1").unwrap(),
        manifest("run-1", "net-a", "2026-01-01T00:00:00Z")
    );
    assert_eq!(store.load_result("run-1").unwrap(), response("run-1"));

    assert!(store.delete_run("run-1").unwrap());
    assert!(!store.delete_run("run-1").unwrap());
    assert!(matches!(
        store.load_result("run-1"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn list_runs_filters_by_network() {
    let dir = std::env::temp_dir().join("lp_results_listing");
    let _ = std::fs::remove_dir_all(&dir);
    let store = RunStore::new(dir).unwrap();

    store
        .save_run(&manifest("b", "net-a", "2026-01-02T00:00:00Z"), &response("b"))
        .unwrap();
    store
        .save_run(&manifest("a", "net-a", "2026-01-01T00:00:00Z"), &response("a"))
        .unwrap();
    store
        .save_run(&manifest("c", "net-b", "2026-01-03T00:00:00Z"), &response("c"))
        .unwrap();

    let runs = store.list_runs(&NetworkId::new("net-a")).unwrap();
    let ids: Vec<_> = runs.iter().map(|m| m.run_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn store_next_to_network_file() {
    let network_path = std::env::temp_dir().join("lp_results_net").join("net.yaml");
    let store = RunStore::for_network_file(&network_path).unwrap();
    assert!(store.root_dir().ends_with(".lightpath/runs"));
}

#[test]
fn run_ids_cannot_escape_store() {
    let root = std::env::temp_dir().join("lp_results_escape");
    let _ = std::fs::remove_dir_all(&root);
    let store = RunStore::new(root.join("runs")).unwrap();
    let sibling = root.join("keep");
    std::fs::create_dir_all(&sibling).unwrap();

    for bad in ["..", "../keep", "a/b", ""] {
        assert!(!store.has_run(bad));
        assert!(matches!(
            store.delete_run(bad),
            Err(ResultsError::InvalidRunId { .. })
        ));
        assert!(matches!(
            store.load_manifest(bad),
            Err(ResultsError::InvalidRunId { .. })
        ));
    }
    assert!(matches!(
        store.save_run(&manifest("../keep", "net-a", "2026-01-01T00:00:00Z"), &response("x")),
        Err(ResultsError::InvalidRunId { .. })
    ));
    assert!(sibling.is_dir());
}
