//! Core type definitions for the graph model

use super::arena::ArenaIndex;
use super::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Caller-defined node identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Self::checked(id, "node_id")
    }

    /// Validate `id`, naming `operation` in the error
    pub(crate) fn checked(id: impl Into<String>, operation: &'static str) -> GraphResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::InvalidIdentity { operation, id });
        }
        Ok(NodeId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lets the node table be queried with a plain `&str`
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = GraphError;

    fn try_from(s: String) -> GraphResult<Self> {
        NodeId::new(s)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = GraphError;

    fn try_from(s: &str) -> GraphResult<Self> {
        NodeId::new(s)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Globally unique edge identifier.
///
/// Edges are identified by this value rather than by their endpoint pair,
/// since a multigraph may hold several edges between the same nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(Uuid);

impl EdgeId {
    /// Mint a fresh random id
    pub fn new() -> Self {
        EdgeId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-unique stamp identifying one graph instance.
///
/// Every handle and every bound entity carries the tag of the graph that owns
/// it, which is how cross-graph use is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphTag(u64);

static NEXT_GRAPH_TAG: AtomicU64 = AtomicU64::new(1);

impl GraphTag {
    pub(crate) fn next() -> Self {
        GraphTag(NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

/// Direction mode of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Every edge is undirected
    #[default]
    Undirected,
    /// Every edge is directed source -> target
    Directed,
    /// Each edge carries its own flag
    Mixed,
}

impl Direction {
    /// Numeric code: 0 undirected, 1 directed, 2 mixed
    pub fn code(&self) -> u8 {
        match self {
            Direction::Undirected => 0,
            Direction::Directed => 1,
            Direction::Mixed => 2,
        }
    }

    pub fn from_code(code: u64) -> GraphResult<Self> {
        match code {
            0 => Ok(Direction::Undirected),
            1 => Ok(Direction::Directed),
            2 => Ok(Direction::Mixed),
            other => Err(GraphError::UnknownMode(other.to_string())),
        }
    }

    /// The `directed` flag this mode imposes on every edge, `None` for mixed
    pub fn forced_flag(&self) -> Option<bool> {
        match self {
            Direction::Undirected => Some(false),
            Direction::Directed => Some(true),
            Direction::Mixed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Undirected => "undirected",
            Direction::Directed => "directed",
            Direction::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undirected" | "0" => Ok(Direction::Undirected),
            "directed" | "1" => Ok(Direction::Directed),
            "mixed" | "2" => Ok(Direction::Mixed),
            _ => Err(GraphError::UnknownMode(s.to_string())),
        }
    }
}

/// Opaque handle to a node stored in a [`Graph`](super::Graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    graph: GraphTag,
    index: ArenaIndex,
}

impl NodeHandle {
    pub(crate) fn new(graph: GraphTag, index: ArenaIndex) -> Self {
        NodeHandle { graph, index }
    }

    /// Tag of the graph that minted this handle
    pub fn graph(&self) -> GraphTag {
        self.graph
    }

    pub(crate) fn index(&self) -> ArenaIndex {
        self.index
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/node{}", self.graph, self.index)
    }
}

/// Opaque handle to an edge stored in a [`Graph`](super::Graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    graph: GraphTag,
    index: ArenaIndex,
}

impl EdgeHandle {
    pub(crate) fn new(graph: GraphTag, index: ArenaIndex) -> Self {
        EdgeHandle { graph, index }
    }

    pub fn graph(&self) -> GraphTag {
        self.graph
    }

    pub(crate) fn index(&self) -> ArenaIndex {
        self.index
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/edge{}", self.graph, self.index)
    }
}

/// A node reference accepted by graph operations: either an id or a handle.
///
/// Resolved once at the start of each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Id(String),
    Handle(NodeHandle),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Id(id) => write!(f, "{:?}", id),
            NodeRef::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        NodeRef::Id(id.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        NodeRef::Id(id)
    }
}

impl From<&String> for NodeRef {
    fn from(id: &String) -> Self {
        NodeRef::Id(id.clone())
    }
}

impl From<&NodeId> for NodeRef {
    fn from(id: &NodeId) -> Self {
        NodeRef::Id(id.as_str().to_string())
    }
}

impl From<NodeHandle> for NodeRef {
    fn from(handle: NodeHandle) -> Self {
        NodeRef::Handle(handle)
    }
}

impl From<&NodeHandle> for NodeRef {
    fn from(handle: &NodeHandle) -> Self {
        NodeRef::Handle(*handle)
    }
}
