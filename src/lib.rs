//! # wgraph
//!
//! A thread-safe, in-memory directed weighted graph with JSON persistence.
//!
//! wgraph keeps vertices (an id plus an opaque JSON payload) and weighted
//! directed edges behind a single reader-writer lock, so every operation is
//! atomic with respect to every other one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wgraph::prelude::*;
//!
//! let graph = GraphStore::new();
//! graph.add_vertex("a", json!({"label": "start"})).unwrap();
//! graph.add_vertex("b", json!(42)).unwrap();
//! graph.add_edge("a", "b", 1.5).unwrap();
//!
//! // Native format
//! graph.save_to_file("graph.json").unwrap();
//! graph.load_from_file("graph.json").unwrap();
//!
//! // NetworkX node-link format
//! save_interop(&graph, "graph.nx.json").unwrap();
//! load_interop(&graph, "graph.nx.json").unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - `wgraph-core` - Vertex, Edge, GraphStore, native persistence, errors
//! - `wgraph-storage` - NetworkX node-link interop and multi-graph collection files

// Re-export core types
pub use wgraph_core::{
    Edge, Endpoint, Error, GraphConfig, GraphSnapshot, GraphStore, LoadPolicy, Result, Vertex,
    VertexData, VertexId,
};

// Re-export storage
pub use wgraph_storage::{
    collection, from_interop, interop, load_collection, load_collection_with, load_interop,
    save_collection, save_interop, to_interop, GraphCollection, InteropGraph,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_collection, load_interop, save_collection, save_interop, Edge, Error, GraphConfig,
        GraphStore, LoadPolicy, Result, Vertex,
    };
    pub use serde_json::json;
}
