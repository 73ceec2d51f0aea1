// Integration tests for wgraph
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use wgraph::{
    load_collection, load_interop, save_collection, save_interop, Error, GraphConfig,
    GraphStore, LoadPolicy,
};

fn edge_set(graph: &GraphStore) -> HashSet<(String, String, u64)> {
    graph
        .edges()
        .into_iter()
        .map(|e| (e.from, e.to, e.weight.to_bits()))
        .collect()
}

fn sample_graph() -> GraphStore {
    let graph = GraphStore::new();
    graph.add_vertex("1", json!("String data")).unwrap();
    graph.add_vertex("2", json!(42)).unwrap();
    graph.add_vertex("3", json!({"name": "Test", "value": 100})).unwrap();
    graph.add_vertex("4", json!({"Value": "Custom struct"})).unwrap();
    graph.add_vertex("5", json!([true, null, 1.25])).unwrap();
    graph.add_edge("1", "2", 1.0).unwrap();
    graph.add_edge("2", "3", 2.0).unwrap();
    graph.add_edge("3", "1", 3.0).unwrap();
    graph.add_edge("4", "4", -0.5).unwrap();
    graph.add_edge("5", "1", f64::NEG_INFINITY).unwrap();
    graph
}

#[test]
fn test_vertex_operations() {
    let graph = GraphStore::new();

    graph.add_vertex("a", json!({"k": 1})).unwrap();
    assert!(matches!(graph.add_vertex("a", json!(2)), Err(Error::DuplicateId(_))));
    assert_eq!(graph.get_vertex("a").unwrap().data, json!({"k": 1}));

    graph.remove_vertex("a").unwrap();
    assert!(graph.get_vertex("a").unwrap_err().is_not_found());
    assert!(graph.remove_vertex("a").unwrap_err().is_not_found());
}

#[test]
fn test_cascade_delete() {
    let graph = GraphStore::new();
    graph.add_vertex("A", json!(null)).unwrap();
    graph.add_vertex("B", json!(null)).unwrap();
    graph.add_edge("A", "B", 1.0).unwrap();
    graph.add_edge("B", "A", 1.0).unwrap();

    graph.remove_vertex("A").unwrap();

    assert!(graph.get_neighbors("B").unwrap().is_empty());
    assert!(matches!(graph.get_vertex("A"), Err(Error::VertexNotFound(_))));
    assert!(!graph.contains_edge("B", "A"));
}

#[test]
fn test_edge_upsert() {
    let graph = GraphStore::new();
    graph.add_vertex("A", json!(null)).unwrap();
    graph.add_vertex("B", json!(null)).unwrap();

    graph.add_edge("A", "B", 1.0).unwrap();
    graph.add_edge("A", "B", 2.0).unwrap();

    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].weight, 2.0);
}

#[test]
fn test_neighbors() {
    let graph = sample_graph();

    let ids: HashSet<String> = graph
        .get_neighbors("1")
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, HashSet::from(["2".to_string()]));

    graph.add_edge("1", "3", 9.0).unwrap();
    assert_eq!(graph.get_neighbors("1").unwrap().len(), 2);
}

#[test]
fn test_native_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    let graph = sample_graph();
    graph.save_to_file(&path).unwrap();

    let loaded = GraphStore::new();
    loaded.load_from_file(&path).unwrap();

    assert_eq!(graph.snapshot().vertices.len(), loaded.vertex_count());
    for vertex in graph.vertices() {
        assert_eq!(loaded.get_vertex(&vertex.id).unwrap(), vertex);
    }
    assert_eq!(edge_set(&graph), edge_set(&loaded));
}

#[test]
fn test_interop_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.nx.json");

    let graph = sample_graph();
    save_interop(&graph, &path).unwrap();

    let loaded = GraphStore::new();
    load_interop(&loaded, &path).unwrap();

    for vertex in graph.vertices() {
        assert_eq!(loaded.get_vertex(&vertex.id).unwrap().data, vertex.data);
    }
    assert_eq!(edge_set(&graph), edge_set(&loaded));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let node_two = raw["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "2")
        .unwrap();
    assert_eq!(node_two["data"], json!({"value": 42}));
}

#[test]
fn test_collection_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphs.json");

    let first = sample_graph();
    let second = GraphStore::new();
    second.add_vertex("solo", json!("alone")).unwrap();

    save_collection(&[Some(&first), Some(&second)], &path).unwrap();
    let loaded = load_collection(&path).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(edge_set(&loaded[0]), edge_set(&first));
    assert_eq!(loaded[1].get_vertex("solo").unwrap().data, json!("alone"));

    assert!(matches!(
        save_collection(&[None, Some(&first)], &path),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_dangling_edges_by_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dangling.json");
    std::fs::write(
        &path,
        r#"{"nodes": [{"id": "a", "data": 1}, {"id": "b", "data": 2}],
            "edges": {"a": {"b": {"from": "a", "to": "b", "weight": 1},
                            "gone": {"from": "a", "to": "gone", "weight": 2}}}}"#,
    )
    .unwrap();

    let strict = sample_graph();
    assert!(matches!(strict.load_from_file(&path), Err(Error::Decode(_))));
    assert_eq!(strict.vertex_count(), 5);

    let permissive = GraphStore::with_config(GraphConfig {
        load_policy: LoadPolicy::Permissive,
        ..Default::default()
    });
    permissive.load_from_file(&path).unwrap();
    assert_eq!(permissive.vertex_count(), 2);
    assert_eq!(permissive.edge_count(), 1);
    assert!(permissive.contains_edge("a", "b"));
}

#[test]
fn test_concurrent_operations() {
    const WRITERS: usize = 10;
    const PER_WRITER: usize = 100;

    let graph = Arc::new(GraphStore::new());

    let mut handles = Vec::new();
    for t in 0..WRITERS {
        let graph = graph.clone();
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                graph.add_vertex(format!("{}-{}", t, i), json!(i)).unwrap();
            }
        }));
    }
    for t in 0..WRITERS {
        let graph = graph.clone();
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                let id = format!("{}-{}", t, i);
                if graph.get_vertex(&id).is_ok() {
                    assert!(graph.get_neighbors(&id).unwrap().is_empty());
                }
                let _ = graph.snapshot();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(graph.vertex_count(), WRITERS * PER_WRITER);
}

#[test]
fn test_concurrent_edges_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let graph = Arc::new(GraphStore::new());
    for i in 0..20 {
        graph.add_vertex(i.to_string(), json!(i)).unwrap();
    }

    let writer = {
        let graph = graph.clone();
        thread::spawn(move || {
            for round in 0..50 {
                for i in 0..20 {
                    let (from, to) = (i.to_string(), ((i + 1) % 20).to_string());
                    graph.add_edge(&from, &to, round as f64).unwrap();
                }
            }
        })
    };

    let saver = {
        let graph = graph.clone();
        let path = dir.path().join("live.json");
        thread::spawn(move || {
            for _ in 0..10 {
                graph.save_to_file(&path).unwrap();
                let check = GraphStore::new();
                check.load_from_file(&path).unwrap();
                assert_eq!(check.vertex_count(), 20);
            }
        })
    };

    writer.join().unwrap();
    saver.join().unwrap();

    assert_eq!(graph.edge_count(), 20);
    assert!(graph.edges().iter().all(|e| e.weight == 49.0));
}
