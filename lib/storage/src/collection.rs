// Multi-graph node-link files: {"graphs": [<node-link document>, ...]}
use crate::interop::{self, InteropGraph};
use crate::json_file;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use wgraph_core::{Error, GraphConfig, GraphStore, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphCollection {
    pub graphs: Vec<InteropGraph>,
}

impl GraphCollection {
    /// Encode every store in order. A `None` entry rejects the whole batch.
    pub fn from_stores(stores: &[Option<&GraphStore>]) -> Result<Self> {
        let mut graphs = Vec::with_capacity(stores.len());
        for (index, store) in stores.iter().copied().enumerate() {
            let store = store.ok_or_else(|| {
                Error::InvalidArgument(format!("missing graph at index {}", index))
            })?;
            graphs.push(interop::to_interop(store));
        }
        Ok(Self { graphs })
    }

    /// Build one store per document, each validated under `config.load_policy`
    pub fn into_stores(self, config: &GraphConfig) -> Result<Vec<GraphStore>> {
        self.graphs
            .into_iter()
            .enumerate()
            .map(|(index, document)| {
                GraphStore::from_snapshot(interop::decode(document), config.clone()).map_err(
                    |err| match err {
                        Error::Decode(msg) => Error::Decode(format!("graph {}: {}", index, msg)),
                        other => other,
                    },
                )
            })
            .collect()
    }
}

/// Save `stores` to a single collection file.
///
/// Nothing is written if any entry is `None`.
pub fn save_collection<P: AsRef<Path>>(stores: &[Option<&GraphStore>], path: P) -> Result<()> {
    let path = path.as_ref();
    let collection = GraphCollection::from_stores(stores)?;
    json_file::write_pretty(path, &collection)?;

    debug!(path = %path.display(), graphs = collection.graphs.len(), "saved graph collection");
    Ok(())
}

pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Vec<GraphStore>> {
    load_collection_with(path, &GraphConfig::default())
}

pub fn load_collection_with<P: AsRef<Path>>(path: P, config: &GraphConfig) -> Result<Vec<GraphStore>> {
    let path = path.as_ref();
    let collection: GraphCollection = json_file::read(path)?;
    let stores = collection.into_stores(config)?;

    debug!(path = %path.display(), graphs = stores.len(), "loaded graph collection");
    Ok(stores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use wgraph_core::LoadPolicy;

    fn chain(len: usize) -> GraphStore {
        let graph = GraphStore::new();
        for i in 0..len {
            graph.add_vertex(format!("n{}", i), json!(i)).unwrap();
        }
        for i in 1..len {
            graph.add_edge(&format!("n{}", i - 1), &format!("n{}", i), i as f64).unwrap();
        }
        graph
    }

    #[test]
    fn test_collection_roundtrip_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs.json");

        let (small, empty, large) = (chain(2), GraphStore::new(), chain(5));
        save_collection(&[Some(&small), Some(&empty), Some(&large)], &path).unwrap();

        let loaded = load_collection(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].vertex_count(), 2);
        assert!(loaded[1].is_empty());
        assert_eq!(loaded[2].edge_count(), 4);
        assert_eq!(loaded[2].get_edge("n3", "n4").unwrap().weight, 4.0);
        assert_eq!(loaded[2].get_vertex("n3").unwrap().data, json!(3));
    }

    #[test]
    fn test_missing_graph_rejects_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs.json");
        let graph = chain(3);

        let err = save_collection(&[Some(&graph), None], &path).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("index 1")));
        assert!(!path.exists());
    }

    #[test]
    fn test_bad_graph_is_reported_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs.json");
        fs::write(
            &path,
            r#"{"graphs": [
                {"nodes": [{"id": "a"}], "links": []},
                {"nodes": [{"id": "a"}], "links": [{"source": "a", "target": "x", "weight": 1}]}
            ]}"#,
        )
        .unwrap();

        let err = load_collection(&path).unwrap_err();
        assert!(matches!(err, Error::Decode(ref msg) if msg.starts_with("graph 1")));

        let lenient = GraphConfig {
            load_policy: LoadPolicy::Permissive,
            ..Default::default()
        };
        let stores = load_collection_with(&path, &lenient).unwrap();
        assert_eq!(stores.len(), 2);
        assert_eq!(stores[1].edge_count(), 0);
    }

    #[test]
    fn test_missing_graphs_key_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs.json");
        fs::write(&path, r#"{"nodes": []}"#).unwrap();

        assert!(matches!(load_collection(&path), Err(Error::Decode(_))));
    }
}
