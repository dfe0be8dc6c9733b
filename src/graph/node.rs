//! Node implementation
//!
//! A node owns its adjacency index: the connection records of every edge that
//! can be traversed *from* it. The index is only mutated by the
//! [`Graph`](super::Graph), which keeps it in step with the global edge set.

use super::arena::ArenaIndex;
use super::config::expect_object;
use super::error::{GraphError, GraphResult};
use super::property::{property_map_from_json, PropertyMap, PropertyValue};
use super::store::Graph;
use super::types::{EdgeId, GraphTag, NodeHandle, NodeId};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

/// Which end of its edge a connection record was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Record on the source node, pointing at the target
    Source,
    /// Record on the target node, pointing back at the source
    Target,
}

/// One traversable view of an edge from one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    edge: ArenaIndex,
    edge_id: EdgeId,
    neighbor: ArenaIndex,
    side: Side,
}

impl Connection {
    pub(crate) fn new(edge: ArenaIndex, edge_id: EdgeId, neighbor: ArenaIndex, side: Side) -> Self {
        Connection {
            edge,
            edge_id,
            neighbor,
            side,
        }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub(crate) fn edge_index(&self) -> ArenaIndex {
        self.edge
    }

    pub(crate) fn neighbor_index(&self) -> ArenaIndex {
        self.neighbor
    }

    fn key(&self) -> ConnectionKey {
        (self.edge, self.side)
    }
}

type ConnectionKey = (ArenaIndex, Side);

/// A node in the graph
///
/// Nodes have:
/// - A caller-defined id, unique within the owning graph
/// - An open attribute bag
/// - An adjacency index of connection records, in insertion order
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,

    /// Arbitrary caller data
    pub attributes: PropertyMap,

    /// Connection records in insertion order, keyed by (edge, side)
    connections: IndexMap<ConnectionKey, Connection>,

    /// Neighbor -> keys of the records reaching it
    by_neighbor: FxHashMap<ArenaIndex, Vec<ConnectionKey>>,

    /// Graph this node is bound to
    owner: Option<GraphTag>,
}

impl Node {
    /// Create a detached node
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Ok(Self::from_id(NodeId::new(id)?))
    }

    pub fn from_id(id: NodeId) -> Self {
        Node {
            id,
            attributes: PropertyMap::new(),
            connections: IndexMap::new(),
            by_neighbor: FxHashMap::default(),
            owner: None,
        }
    }

    /// Create a detached node carrying attributes
    pub fn with_attributes(id: impl Into<String>, attributes: PropertyMap) -> GraphResult<Self> {
        let mut node = Self::new(id)?;
        node.attributes = attributes;
        Ok(node)
    }

    /// Create a detached node from an untyped attribute record
    pub fn with_attributes_value(id: impl Into<String>, attributes: &Value) -> GraphResult<Self> {
        let id = NodeId::new(id)?;
        let object = expect_object(attributes, "node")?;
        let mut node = Self::from_id(id);
        node.attributes = property_map_from_json(object, &[]);
        Ok(node)
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Bind this node into `graph`; shorthand for [`Graph::add_node`]
    pub fn add_to_graph(self, graph: &mut Graph) -> GraphResult<NodeHandle> {
        graph.add_node(self)
    }

    pub fn owner(&self) -> Option<GraphTag> {
        self.owner
    }

    pub fn is_bound(&self) -> bool {
        self.owner.is_some()
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<PropertyValue> {
        self.attributes.shift_remove(key)
    }

    /// Number of connection records (a self-loop counts once)
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    pub fn is_isolated(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connection records in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values()
    }

    /// Neighbor handle of every record, in record order. Empty while detached.
    pub fn neighbor_handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.owner.into_iter().flat_map(move |tag| {
            self.connections
                .values()
                .map(move |connection| NodeHandle::new(tag, connection.neighbor))
        })
    }

    /// Number of distinct neighbors reachable from this node
    pub fn neighbor_count(&self) -> usize {
        self.by_neighbor.len()
    }

    #[cfg(test)]
    pub(crate) fn connections_to(&self, neighbor: ArenaIndex) -> usize {
        self.by_neighbor.get(&neighbor).map_or(0, Vec::len)
    }

    pub(crate) fn has_connection(&self, edge: ArenaIndex, side: Side) -> bool {
        self.connections.contains_key(&(edge, side))
    }

    pub(crate) fn add_connection(&mut self, connection: Connection) -> GraphResult<()> {
        let key = connection.key();
        if self.connections.contains_key(&key) {
            return Err(GraphError::DuplicateConnection {
                node: self.id.to_string(),
                connection: format!("{} ({:?})", connection.edge_id, connection.side),
            });
        }

        self.by_neighbor
            .entry(connection.neighbor)
            .or_default()
            .push(key);
        self.connections.insert(key, connection);
        Ok(())
    }

    /// Remove one record; absent records are ignored
    pub(crate) fn remove_connection_side(&mut self, edge: ArenaIndex, side: Side) -> bool {
        let Some(connection) = self.connections.shift_remove(&(edge, side)) else {
            return false;
        };

        if let Some(keys) = self.by_neighbor.get_mut(&connection.neighbor) {
            keys.retain(|key| *key != (edge, side));
            if keys.is_empty() {
                self.by_neighbor.remove(&connection.neighbor);
            }
        }
        true
    }

    /// Remove both possible records of `edge`, returning how many were present.
    ///
    /// Both sides are tried because a self-loop keeps its record on the same
    /// node either way.
    pub(crate) fn remove_connection(&mut self, edge: ArenaIndex) -> usize {
        [Side::Source, Side::Target]
            .into_iter()
            .filter(|side| self.remove_connection_side(edge, *side))
            .count()
    }

    /// Drop every record whose edge is in `doomed` in one pass over the
    /// adjacency, returning how many were removed
    pub(crate) fn remove_connections_of(&mut self, doomed: &FxHashSet<ArenaIndex>) -> usize {
        let before = self.connections.len();
        self.connections.retain(|(edge, _), _| !doomed.contains(edge));
        if self.connections.len() == before {
            return 0;
        }

        self.by_neighbor.retain(|_, keys| {
            keys.retain(|(edge, _)| !doomed.contains(edge));
            !keys.is_empty()
        });
        before - self.connections.len()
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
        self.by_neighbor.clear();
    }

    /// Move the adjacency of `previous` into this node
    pub(crate) fn adopt_connections(&mut self, previous: &mut Node) {
        self.connections = std::mem::take(&mut previous.connections);
        self.by_neighbor = std::mem::take(&mut previous.by_neighbor);
    }

    pub(crate) fn bind_to_graph(&mut self, tag: GraphTag) -> GraphResult<()> {
        if let Some(owner) = self.owner {
            return Err(GraphError::OwnershipViolation {
                operation: "bind_to_graph",
                reason: format!("node {:?} is already bound to {}", self.id.as_str(), owner),
            });
        }
        self.owner = Some(tag);
        Ok(())
    }

    pub(crate) fn unbind_from_graph(&mut self) -> GraphResult<()> {
        if self.owner.take().is_none() {
            return Err(GraphError::OwnershipViolation {
                operation: "unbind_from_graph",
                reason: format!("node {:?} is not bound to a graph", self.id.as_str()),
            });
        }
        Ok(())
    }
}
