use lp_topology::*;

fn fresh_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn dir_store_crud() {
    let mut store = DirStore::new(fresh_dir("lp_topology_dir_store_crud")).unwrap();

    let mut network = Network::new("Ring");
    let id = network.network_id.clone();
    store.put_network(network.clone()).unwrap();
    assert_eq!(store.get_network(&id).unwrap().unwrap().network_name, "Ring");

    network.network_name = "Ring v2".to_string();
    store.put_network(network).unwrap();
    assert_eq!(store.get_network(&id).unwrap().unwrap().network_name, "Ring v2");

    assert!(store.delete_network(&id).unwrap());
    assert!(store.get_network(&id).unwrap().is_none());
    assert!(!store.delete_network(&id).unwrap());
}

#[test]
fn dir_store_listing_sorts_and_pages() {
    let mut store = DirStore::new(fresh_dir("lp_topology_dir_store_list")).unwrap();
    for name in ["delta", "alpha", "charlie", "bravo"] {
        store.put_network(Network::new(name)).unwrap();
    }
    std::fs::write(store.root_dir().join("notes.txt"), "ignored").unwrap();

    let page = store
        .list_networks(&NetworkQuery {
            sort_by: SortKey::Name,
            order: SortOrder::Desc,
            page: 1,
            limit: 3,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(page.total_count, 4);
    let names: Vec<_> = page
        .networks
        .iter()
        .map(|n| n.network_name.as_str())
        .collect();
    assert_eq!(names, vec!["delta", "charlie", "bravo"]);

    let past_end = store
        .list_networks(&NetworkQuery {
            page: 3,
            limit: 3,
            ..Default::default()
        })
        .unwrap();
    assert!(past_end.networks.is_empty());
    assert_eq!(past_end.total_count, 4);
}

#[test]
fn store_rejects_invalid_network() {
    let mut network = Network::new("bad");
    network.si.spacing = 0.0;
    let mut store = MemoryStore::new();
    assert!(matches!(
        store.put_network(network),
        Err(TopologyError::Validation(_))
    ));
}

#[test]
fn dir_store_refuses_ids_escaping_root() {
    let root = fresh_dir("lp_topology_dir_store_escape");
    let mut store = DirStore::new(root.join("networks")).unwrap();
    let outside = root.join("victim.json");
    std::fs::write(&outside, "{}").unwrap();

    let escaping = lp_core::NetworkId::new("../victim");
    assert!(matches!(
        store.delete_network(&escaping),
        Err(TopologyError::InvalidId { .. })
    ));
    assert!(matches!(
        store.get_network(&escaping),
        Err(TopologyError::InvalidId { .. })
    ));
    assert!(outside.exists());

    let mut network = Network::new("escape");
    network.network_id = escaping;
    assert!(matches!(
        store.put_network(network),
        Err(TopologyError::InvalidId { .. })
    ));
}
