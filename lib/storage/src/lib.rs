//! # wgraph Storage
//!
//! File formats for [`wgraph_core::GraphStore`] beyond the native one:
//!
//! - [`interop`] - NetworkX node-link JSON for a single graph
//! - [`collection`] - several node-link graphs in one `{"graphs": [...]}` file
//!
//! Both talk to the store only through [`GraphStore::snapshot`](wgraph_core::GraphStore::snapshot)
//! and [`GraphStore::replace`](wgraph_core::GraphStore::replace).

pub mod collection;
pub mod interop;
mod json_file;

pub use collection::{load_collection, load_collection_with, save_collection, GraphCollection};
pub use interop::{
    from_interop, load_interop, save_interop, to_interop, InteropGraph, InteropLink, InteropNode,
};
