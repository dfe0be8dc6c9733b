//! Simple Graph
//!
//! An in-memory graph model whose modes can be reconfigured on a populated
//! graph without losing or corrupting edges.
//!
//! # Architecture
//!
//! - Nodes and edges live in generation-checked arenas and refer to each
//!   other through handles.
//! - Every node keeps the connection records of the edges it can traverse,
//!   kept consistent with the global edge set by [`Graph`].
//! - Direction (undirected, directed, mixed) and multiplicity (simple,
//!   multigraph) can both be switched at any time. Switching multigraph off
//!   discards parallel edges.
//!
//! ## Example Usage
//!
//! ```rust
//! use simple_graph::graph::{ConnectOptions, Direction, Graph, GraphConfig};
//!
//! let mut graph = Graph::with_config(GraphConfig::default().with_direction(Direction::Mixed));
//!
//! graph.add_node("A").unwrap();
//! graph.add_node("B").unwrap();
//! graph.add_node("C").unwrap();
//!
//! graph.connect("A", "B").unwrap();
//! graph.connect_with("B", "C", ConnectOptions::directed()).unwrap();
//! assert_eq!(graph.degree("C").unwrap(), 0);
//!
//! // Every edge becomes undirected
//! graph.set_direction(Direction::Undirected).unwrap();
//! assert_eq!(graph.degree("C").unwrap(), 1);
//!
//! print!("{}", graph.snapshot());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod render;

// Re-export main types for convenience
pub use graph::{
    ConnectOptions, Direction, Edge, EdgeHandle, EdgeId, ErrorKind, Graph, GraphConfig,
    GraphError, GraphOptions, GraphResult, GraphStatistics, Node, NodeHandle, NodeId, NodeRef,
    PropertyMap, PropertyValue,
};

pub use render::{ConsoleRenderer, GraphSnapshot, Renderer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
