use crate::{Edge, Vertex};

/// Owned, point-in-time copy of a graph.
///
/// This is the hand-off type between [`GraphStore`](crate::GraphStore) and
/// every file format: encoders read one from [`GraphStore::snapshot`](crate::GraphStore::snapshot),
/// decoders produce one for [`GraphStore::replace`](crate::GraphStore::replace).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    #[inline]
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sort vertices by id and edges by (from, to) so two snapshots of the
    /// same graph compare equal regardless of table iteration order
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.vertices.sort_by(|a, b| a.id.cmp(&b.id));
        self.edges
            .sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        self
    }
}
