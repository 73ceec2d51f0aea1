//! NetworkX node-link interop.
//!
//! Translates between a [`GraphStore`] and the document produced by
//! `networkx.node_link_data`:
//!
//! ```json
//! {"directed": true, "multigraph": false, "graph": {},
//!  "nodes": [{"id": "a", "data": {"value": 42}}],
//!  "links": [{"source": "a", "target": "b", "weight": 1.0}]}
//! ```
//!
//! Node `data` is always an object in this format. Vertex data that is not an
//! object is wrapped as `{"value": data}` on encode, and any node whose data
//! object has exactly one key, `value`, is unwrapped on decode. The unwrap is
//! applied to externally produced files too, so a NetworkX node that really
//! carries a lone `value` attribute comes back as the bare value.
use crate::json_file;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};
use wgraph_core::{Edge, GraphSnapshot, GraphStore, Result, Vertex, VertexData};

const WRAP_KEY: &str = "value";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteropGraph {
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    /// Graph-level attributes. Always empty on encode.
    #[serde(default)]
    pub graph: Map<String, Value>,
    #[serde(alias = "Nodes")]
    pub nodes: Vec<InteropNode>,
    #[serde(default)]
    pub links: Vec<InteropLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteropNode {
    pub id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteropLink {
    pub source: String,
    pub target: String,
    /// Missing weights read as 0.0
    #[serde(default, with = "wgraph_core::graph::weight")]
    pub weight: f64,
}

fn default_directed() -> bool {
    true
}

impl Default for InteropGraph {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: false,
            graph: Map::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}

fn wrap_data(data: VertexData) -> Map<String, Value> {
    match data {
        Value::Object(map) => map,
        other => {
            let mut map = Map::with_capacity(1);
            map.insert(WRAP_KEY.to_string(), other);
            map
        }
    }
}

fn unwrap_data(mut data: Map<String, Value>) -> VertexData {
    if data.len() == 1 {
        if let Some(inner) = data.remove(WRAP_KEY) {
            return inner;
        }
    }
    Value::Object(data)
}

/// Encode a snapshot as a node-link document
pub fn encode(snapshot: GraphSnapshot) -> InteropGraph {
    InteropGraph {
        nodes: snapshot
            .vertices
            .into_iter()
            .map(|vertex| InteropNode {
                id: vertex.id,
                data: wrap_data(vertex.data),
            })
            .collect(),
        links: snapshot
            .edges
            .into_iter()
            .map(|edge| InteropLink {
                source: edge.from,
                target: edge.to,
                weight: edge.weight,
            })
            .collect(),
        ..Default::default()
    }
}

/// Decode a node-link document into a snapshot.
///
/// Endpoint validation happens when the snapshot is applied to a store.
pub fn decode(document: InteropGraph) -> GraphSnapshot {
    if !document.directed {
        warn!("node-link document is undirected; links are loaded as directed edges");
    }
    if document.multigraph {
        warn!("node-link document is a multigraph; parallel links collapse to the last one");
    }

    GraphSnapshot::new(
        document
            .nodes
            .into_iter()
            .map(|node| Vertex::new(node.id, unwrap_data(node.data)))
            .collect(),
        document
            .links
            .into_iter()
            .map(|link| Edge::new(link.source, link.target, link.weight))
            .collect(),
    )
}

/// Snapshot `store` under its read lock and encode it
pub fn to_interop(store: &GraphStore) -> InteropGraph {
    encode(store.snapshot())
}

/// Replace the contents of `store` with `document`
pub fn from_interop(store: &GraphStore, document: InteropGraph) -> Result<()> {
    store.replace(decode(document))
}

pub fn save_interop<P: AsRef<Path>>(store: &GraphStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let document = to_interop(store);
    json_file::write_pretty(path, &document)?;

    debug!(
        path = %path.display(),
        nodes = document.nodes.len(),
        links = document.links.len(),
        "saved node-link graph"
    );
    Ok(())
}

/// Load a node-link file into `store`.
///
/// The file is read and decoded before the store's write lock is taken, and
/// the swap itself is atomic, so on any error the store keeps its contents.
pub fn load_interop<P: AsRef<Path>>(store: &GraphStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let document: InteropGraph = json_file::read(path)?;
    let (nodes, links) = (document.nodes.len(), document.links.len());

    from_interop(store, document)?;

    debug!(path = %path.display(), nodes, links, "loaded node-link graph");
    Ok(())
}
