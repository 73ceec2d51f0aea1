// Native JSON file format:
// {"nodes": [{"id", "data"}], "edges": {from: {to: {"from", "to", "weight"}}}}
use crate::store::{Map, Tables};
use crate::{Edge, Error, GraphSnapshot, GraphStore, Result, Vertex, VertexId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

#[derive(Serialize)]
struct NativeDocumentRef<'a> {
    nodes: Vec<&'a Vertex>,
    edges: &'a Map<VertexId, Map<VertexId, Edge>>,
}

#[derive(Deserialize)]
struct NativeDocument {
    #[serde(alias = "Nodes", deserialize_with = "null_as_default")]
    nodes: Vec<Vertex>,
    #[serde(alias = "Edges", deserialize_with = "null_as_default")]
    edges: Map<VertexId, Map<VertexId, Edge>>,
}

/// Required field that may be written as `null` for "empty"
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl NativeDocument {
    fn into_snapshot(self) -> Result<GraphSnapshot> {
        let mut edges = Vec::new();
        for (from, out) in self.edges {
            for (to, edge) in out {
                if edge.from != from || edge.to != to {
                    return Err(Error::Decode(format!(
                        "edge stored under {} -> {} claims to be {} -> {}",
                        from, to, edge.from, edge.to
                    )));
                }
                edges.push(edge);
            }
        }
        Ok(GraphSnapshot::new(self.nodes, edges))
    }
}

impl GraphStore {
    /// Write the whole graph to `path` in the native format.
    ///
    /// The read lock is held across the write, so concurrent writers wait
    /// for the file to be flushed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tables = self.tables.read();

        let document = NativeDocumentRef {
            nodes: tables.vertices.values().collect(),
            edges: &tables.adjacency,
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        debug!(path = %path.display(), vertices = tables.vertices.len(), "saved graph");
        Ok(())
    }

    /// Replace the graph with the contents of `path`.
    ///
    /// Fails with [`Error::Io`] if the file cannot be read and
    /// [`Error::Decode`] if it is not a valid native document; in both cases
    /// the store is unchanged. The write lock is held for the whole load.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut tables = self.tables.write();

        let file = File::open(path)?;
        let document: NativeDocument = serde_json::from_reader(BufReader::new(file))?;
        let snapshot = document.into_snapshot()?;
        let (vertices, edges) = (snapshot.vertex_count(), snapshot.edge_count());

        *tables = Tables::from_snapshot(snapshot, self.config())?;

        debug!(path = %path.display(), vertices, edges, "loaded graph");
        Ok(())
    }
}
