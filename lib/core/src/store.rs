use crate::error::Endpoint;
use crate::{Edge, Error, GraphSnapshot, Result, Vertex, VertexData, VertexId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use tracing::{trace, warn};

pub(crate) type Map<K, V> = HashMap<K, V, ahash::RandomState>;

/// What a load does with an edge whose endpoint is missing from the node list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Reject the whole document with [`Error::Decode`]
    #[default]
    Strict,
    /// Drop the offending edge, log a warning and keep going
    Permissive,
}

/// Configuration for a graph store
#[derive(Debug, Clone, Default)]
pub struct GraphConfig {
    /// Number of vertices to reserve room for up front
    pub capacity: usize,
    pub load_policy: LoadPolicy,
}

/// Vertex table plus adjacency table. Only ever touched as a pair.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) vertices: Map<VertexId, Vertex>,
    pub(crate) adjacency: Map<VertexId, Map<VertexId, Edge>>,
}

impl Tables {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Map::with_capacity_and_hasher(capacity, Default::default()),
            adjacency: Map::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(|out| out.len()).sum()
    }

    pub(crate) fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self.vertices.values().cloned().collect(),
            edges: self
                .adjacency
                .values()
                .flat_map(|out| out.values().cloned())
                .collect(),
        }
    }

    /// Build a fresh pair of tables, enforcing the no-dangling-edge invariant
    pub(crate) fn from_snapshot(snapshot: GraphSnapshot, config: &GraphConfig) -> Result<Self> {
        let mut tables = Self::with_capacity(config.capacity.max(snapshot.vertices.len()));

        for vertex in snapshot.vertices {
            if tables.vertices.contains_key(&vertex.id) {
                return Err(Error::Decode(format!("duplicate vertex id: {}", vertex.id)));
            }
            tables.adjacency.insert(vertex.id.clone(), Map::default());
            tables.vertices.insert(vertex.id.clone(), vertex);
        }

        let mut dropped = 0usize;
        for edge in snapshot.edges {
            let missing = if !tables.vertices.contains_key(&edge.from) {
                Some((Endpoint::Source, &edge.from))
            } else if !tables.vertices.contains_key(&edge.to) {
                Some((Endpoint::Target, &edge.to))
            } else {
                None
            };

            if let Some((endpoint, id)) = missing {
                match config.load_policy {
                    LoadPolicy::Strict => {
                        return Err(Error::Decode(format!(
                            "edge {} -> {} references missing {} vertex {}",
                            edge.from, edge.to, endpoint, id
                        )));
                    }
                    LoadPolicy::Permissive => {
                        warn!(from = %edge.from, to = %edge.to, missing = %id, "dropping dangling edge");
                        dropped += 1;
                        continue;
                    }
                }
            }

            if let Some(out) = tables.adjacency.get_mut(&edge.from) {
                out.insert(edge.to.clone(), edge);
            }
        }

        if dropped > 0 {
            warn!(dropped, "load dropped edges with missing endpoints");
        }
        Ok(tables)
    }
}

/// A directed, weighted graph guarded by a single reader-writer lock.
///
/// Mutations take the write lock for their whole duration, reads share the
/// read lock. Both tables live behind the same lock, so no reader can see a
/// vertex without its adjacency entry or an edge pointing at a removed vertex.
pub struct GraphStore {
    config: GraphConfig,
    pub(crate) tables: RwLock<Tables>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let tables = Tables::with_capacity(config.capacity);
        Self {
            config,
            tables: RwLock::new(tables),
        }
    }

    /// Build a store directly from a snapshot, validated under `config.load_policy`
    pub fn from_snapshot(snapshot: GraphSnapshot, config: GraphConfig) -> Result<Self> {
        let tables = Tables::from_snapshot(snapshot, &config)?;
        Ok(Self {
            config,
            tables: RwLock::new(tables),
        })
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn add_vertex(&self, id: impl Into<VertexId>, data: VertexData) -> Result<()> {
        let id = id.into();
        let mut tables = self.tables.write();

        if tables.vertices.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }

        tables.adjacency.insert(id.clone(), Map::default());
        tables.vertices.insert(id.clone(), Vertex::new(id.clone(), data));
        trace!(vertex = %id, "added vertex");
        Ok(())
    }

    /// Remove a vertex together with every edge that starts or ends at it
    pub fn remove_vertex(&self, id: &str) -> Result<()> {
        let mut tables = self.tables.write();

        if tables.vertices.remove(id).is_none() {
            return Err(Error::VertexNotFound(id.to_string()));
        }

        let outgoing = tables.adjacency.remove(id).map_or(0, |out| out.len());
        let mut incoming = 0usize;
        for out in tables.adjacency.values_mut() {
            if out.remove(id).is_some() {
                incoming += 1;
            }
        }

        trace!(vertex = %id, outgoing, incoming, "removed vertex");
        Ok(())
    }

    /// Insert an edge, replacing the weight if the ordered pair already exists
    pub fn add_edge(&self, from: &str, to: &str, weight: f64) -> Result<()> {
        let mut tables = self.tables.write();

        if !tables.vertices.contains_key(from) {
            return Err(Error::EndpointNotFound {
                endpoint: Endpoint::Source,
                id: from.to_string(),
            });
        }
        if !tables.vertices.contains_key(to) {
            return Err(Error::EndpointNotFound {
                endpoint: Endpoint::Target,
                id: to.to_string(),
            });
        }

        let out = tables
            .adjacency
            .entry(from.to_string())
            .or_default();
        let replaced = out.insert(to.to_string(), Edge::new(from, to, weight)).is_some();

        trace!(from, to, weight, replaced, "upserted edge");
        Ok(())
    }

    pub fn remove_edge(&self, from: &str, to: &str) -> Result<()> {
        let mut tables = self.tables.write();

        let removed = tables
            .adjacency
            .get_mut(from)
            .and_then(|out| out.remove(to));

        match removed {
            Some(_) => {
                trace!(from, to, "removed edge");
                Ok(())
            }
            None => Err(Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    pub fn get_vertex(&self, id: &str) -> Result<Vertex> {
        self.tables
            .read()
            .vertices
            .get(id)
            .cloned()
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))
    }

    /// Vertices reachable over one outgoing edge. Order is unspecified.
    pub fn get_neighbors(&self, id: &str) -> Result<Vec<Vertex>> {
        let tables = self.tables.read();

        if !tables.vertices.contains_key(id) {
            return Err(Error::VertexNotFound(id.to_string()));
        }

        Ok(tables
            .adjacency
            .get(id)
            .map(|out| {
                out.keys()
                    .filter_map(|to| tables.vertices.get(to).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn get_edge(&self, from: &str, to: &str) -> Result<Edge> {
        self.tables
            .read()
            .adjacency
            .get(from)
            .and_then(|out| out.get(to))
            .cloned()
            .ok_or_else(|| Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    #[inline]
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.tables.read().vertices.contains_key(id)
    }

    #[inline]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.tables
            .read()
            .adjacency
            .get(from)
            .is_some_and(|out| out.contains_key(to))
    }

    pub fn vertex_count(&self) -> usize {
        self.tables.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.tables.read().edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().vertices.is_empty()
    }

    /// Get all vertices
    pub fn vertices(&self) -> Vec<Vertex> {
        self.tables.read().vertices.values().cloned().collect()
    }

    /// Get all edges
    pub fn edges(&self) -> Vec<Edge> {
        self.tables
            .read()
            .adjacency
            .values()
            .flat_map(|out| out.values().cloned())
            .collect()
    }

    pub fn clear(&self) {
        let mut tables = self.tables.write();
        *tables = Tables::with_capacity(self.config.capacity);
        trace!("cleared graph");
    }

    /// Consistent owned copy of both tables, taken under one read lock
    pub fn snapshot(&self) -> GraphSnapshot {
        self.tables.read().snapshot()
    }

    /// Replace the whole graph with `snapshot`.
    ///
    /// The snapshot is validated before the write lock is taken; on error the
    /// store is left exactly as it was.
    pub fn replace(&self, snapshot: GraphSnapshot) -> Result<()> {
        let tables = Tables::from_snapshot(snapshot, &self.config)?;
        *self.tables.write() = tables;
        Ok(())
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("GraphStore")
            .field("config", &self.config)
            .field("vertices", &tables.vertices.len())
            .field("edges", &tables.edge_count())
            .finish()
    }
}
