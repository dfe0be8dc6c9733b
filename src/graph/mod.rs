//! Core graph engine
//!
//! This module implements the mutable graph model with:
//! - Nodes identified by caller-defined ids, with open attribute bags
//! - Edges with a per-instance direction flag and their own attributes
//! - Direction modes (undirected, directed, mixed) switchable on a populated graph
//! - Optional parallel edges, self-loops and id override

pub mod arena;
pub mod config;
pub mod edge;
pub mod error;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use config::{ConnectOptions, GraphConfig, GraphOptions};
pub use edge::Edge;
pub use error::{ErrorKind, GraphError, GraphResult};
pub use node::{Connection, Node, Side};
pub use property::{PropertyMap, PropertyValue};
pub use store::{Graph, GraphStatistics, Neighbor, NewNode};
pub use types::{Direction, EdgeHandle, EdgeId, GraphTag, NodeHandle, NodeId, NodeRef};
