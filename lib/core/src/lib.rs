//! # wgraph Core
//!
//! Core library for the wgraph in-memory graph store.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Vertex`] - An id with an opaque JSON payload
//! - [`Edge`] - A directed, weighted connection between two vertices
//! - [`GraphStore`] - Thread-safe container for vertices and edges
//! - [`GraphSnapshot`] - Owned copy of a graph, used by file formats
//!
//! ## Example
//!
//! ```rust
//! use wgraph_core::GraphStore;
//! use serde_json::json;
//!
//! let graph = GraphStore::new();
//! graph.add_vertex("main", json!({"kind": "fn"})).unwrap();
//! graph.add_vertex("parse_args", json!(42)).unwrap();
//! graph.add_edge("main", "parse_args", 1.0).unwrap();
//!
//! let callees = graph.get_neighbors("main").unwrap();
//! assert_eq!(callees[0].id, "parse_args");
//!
//! // Removing a vertex removes every edge touching it
//! graph.remove_vertex("parse_args").unwrap();
//! assert_eq!(graph.edge_count(), 0);
//! ```

pub mod error;
pub mod graph;
pub mod snapshot;
pub mod store;

/// Native `{"nodes", "edges"}` JSON persistence for [`GraphStore`]
pub mod persist;

pub use error::{Endpoint, Error, Result};
pub use graph::{Edge, Vertex, VertexData, VertexId};
pub use snapshot::GraphSnapshot;
pub use store::{GraphConfig, GraphStore, LoadPolicy};
