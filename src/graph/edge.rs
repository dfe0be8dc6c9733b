//! Edge implementation
//!
//! An edge joins two nodes of the same graph. Whether it is directed is a
//! per-instance flag, which only varies between edges in mixed mode. Edges
//! never touch node adjacency themselves; the graph adds and removes the
//! matching connection records alongside every edge change.

use super::arena::ArenaIndex;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, GraphTag, NodeHandle};

/// An edge in the graph
///
/// Edges have:
/// - A globally unique id
/// - A source and a target node (interchangeable when undirected)
/// - A `directed` flag
/// - Attributes (key-value pairs)
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier for this edge
    id: EdgeId,

    /// First endpoint; the edge goes FROM this node when directed
    source: ArenaIndex,

    /// Second endpoint
    target: ArenaIndex,

    directed: bool,

    /// Arbitrary caller data, shared by both connection records
    pub attributes: PropertyMap,

    /// Graph that created the edge
    graph: GraphTag,

    /// Cleared once the edge is removed from its graph
    bound: bool,
}

impl Edge {
    pub(crate) fn new(
        graph: GraphTag,
        source: ArenaIndex,
        target: ArenaIndex,
        directed: bool,
        attributes: PropertyMap,
    ) -> Self {
        Edge {
            id: EdgeId::new(),
            source,
            target,
            directed,
            attributes,
            graph,
            bound: true,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Source endpoint. The handle only resolves while the edge is bound.
    pub fn source(&self) -> NodeHandle {
        NodeHandle::new(self.graph, self.source)
    }

    /// Target endpoint. The handle only resolves while the edge is bound.
    pub fn target(&self) -> NodeHandle {
        NodeHandle::new(self.graph, self.target)
    }

    /// Whether this edge still belongs to its graph
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: NodeHandle, b: NodeHandle) -> bool {
        a.graph() == self.graph
            && b.graph() == self.graph
            && ((self.source == a.index() && self.target == b.index())
                || (self.source == b.index() && self.target == a.index()))
    }

    /// The endpoint across from `node`, if `node` is an endpoint
    pub fn opposite(&self, node: NodeHandle) -> Option<NodeHandle> {
        if node.graph() != self.graph {
            return None;
        }
        if node.index() == self.source {
            Some(self.target())
        } else if node.index() == self.target {
            Some(self.source())
        } else {
            None
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<PropertyValue> {
        self.attributes.shift_remove(key)
    }

    pub(crate) fn source_index(&self) -> ArenaIndex {
        self.source
    }

    pub(crate) fn target_index(&self) -> ArenaIndex {
        self.target
    }

    pub(crate) fn touches(&self, node: ArenaIndex) -> bool {
        self.source == node || self.target == node
    }

    pub(crate) fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub(crate) fn unbind(&mut self) {
        self.bound = false;
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
