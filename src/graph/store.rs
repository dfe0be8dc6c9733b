//! In-memory graph engine
//!
//! Owns:
//! - the node arena and the id -> node table (insertion ordered)
//! - the edge arena and the global edge set (insertion ordered)
//! - the pair index: ordered (source, target) -> edges
//!
//! Every mutation keeps each node's connection records in step with the
//! edge set. Validation happens before any write, so a failed call leaves the
//! graph untouched.

use super::arena::{Arena, ArenaIndex};
use super::config::{ConnectOptions, GraphConfig, GraphOptions};
use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::node::{Connection, Node, Side};
use super::property::PropertyMap;
use super::types::{Direction, EdgeHandle, GraphTag, NodeHandle, NodeId, NodeRef};
use crate::render::GraphSnapshot;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Anything [`Graph::add_node`] accepts: a bare id or a detached node
#[derive(Debug, Clone)]
pub enum NewNode {
    Id(String),
    Node(Node),
}

impl From<&str> for NewNode {
    fn from(id: &str) -> Self {
        NewNode::Id(id.to_string())
    }
}

impl From<String> for NewNode {
    fn from(id: String) -> Self {
        NewNode::Id(id)
    }
}

impl From<&String> for NewNode {
    fn from(id: &String) -> Self {
        NewNode::Id(id.clone())
    }
}

impl From<NodeId> for NewNode {
    fn from(id: NodeId) -> Self {
        NewNode::Node(Node::from_id(id))
    }
}

impl From<Node> for NewNode {
    fn from(node: Node) -> Self {
        NewNode::Node(node)
    }
}

/// One neighbor as seen from a node, produced by [`Graph::neighbors`]
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub handle: NodeHandle,
    pub node: &'a Node,
    pub edge_handle: EdgeHandle,
    pub edge: &'a Edge,
    pub side: Side,
}

impl<'a> Neighbor<'a> {
    pub fn id(&self) -> &'a NodeId {
        self.node.id()
    }

    /// Attributes of the connection, which are those of its edge
    pub fn attributes(&self) -> &'a PropertyMap {
        &self.edge.attributes
    }
}

/// Summary counters over the current graph contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub directed_edges: usize,
    pub undirected_edges: usize,
    pub self_loops: usize,
    pub max_degree: usize,
    pub avg_degree: f64,
}

/// Mutable in-memory graph
///
/// Lookup structures:
/// - node_table: NodeId -> node slot
/// - edge_set: live edge slots in insertion order
/// - pair_index: (source, target) -> edge slots in insertion order
#[derive(Debug)]
pub struct Graph {
    tag: GraphTag,

    config: GraphConfig,

    /// Arbitrary caller data attached to the graph itself
    pub attributes: PropertyMap,

    nodes: Arena<Node>,

    node_table: IndexMap<NodeId, ArenaIndex>,

    edges: Arena<Edge>,

    edge_set: IndexSet<ArenaIndex>,

    pair_index: FxHashMap<(ArenaIndex, ArenaIndex), Vec<ArenaIndex>>,
}

impl Graph {
    /// Create an empty undirected simple graph
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            tag: GraphTag::next(),
            config,
            attributes: PropertyMap::new(),
            nodes: Arena::new(),
            node_table: IndexMap::new(),
            edges: Arena::new(),
            edge_set: IndexSet::new(),
            pair_index: FxHashMap::default(),
        }
    }

    pub fn with_options(options: GraphOptions) -> Self {
        let mut graph = Self::with_config(options.config);
        graph.attributes = options.attributes;
        graph
    }

    /// Create a graph from an untyped option record
    pub fn from_options(options: &Value) -> GraphResult<Self> {
        GraphOptions::from_value(options).map(Self::with_options)
    }

    pub fn tag(&self) -> GraphTag {
        self.tag
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn is_multigraph(&self) -> bool {
        self.config.multigraph
    }

    pub fn allows_selfloops(&self) -> bool {
        self.config.allow_selfloops
    }

    pub fn allows_override(&self) -> bool {
        self.config.allow_override
    }

    // ---- nodes ----

    /// Bind a node into this graph.
    ///
    /// With override enabled, re-adding an existing id replaces the stored
    /// node in place: the replacement takes over the old node's connections
    /// and existing handles resolve to it.
    pub fn add_node(&mut self, node: impl Into<NewNode>) -> GraphResult<NodeHandle> {
        let mut node = match node.into() {
            NewNode::Id(id) => Node::from_id(NodeId::checked(id, "add_node")?),
            NewNode::Node(node) => node,
        };

        if let Some(owner) = node.owner() {
            return Err(GraphError::OwnershipViolation {
                operation: "add_node",
                reason: format!("node {:?} is already bound to {}", node.id().as_str(), owner),
            });
        }

        if let Some(&index) = self.node_table.get(node.id()) {
            if !self.config.allow_override {
                return Err(GraphError::DuplicateIdentity {
                    operation: "add_node",
                    id: node.id().to_string(),
                });
            }

            let previous = self.node_at_mut(index, "add_node")?;
            node.adopt_connections(previous);
            node.bind_to_graph(self.tag)?;
            debug!(node = %node.id(), "Replacing node");
            if let Some(mut previous) = self.nodes.replace(index, node) {
                previous.unbind_from_graph()?;
            }
            return Ok(NodeHandle::new(self.tag, index));
        }

        node.bind_to_graph(self.tag)?;
        let id = node.id().clone();
        debug!(node = %id, "Adding node");
        let index = self.nodes.insert(node);
        self.node_table.insert(id, index);
        Ok(NodeHandle::new(self.tag, index))
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.node_table
            .get(id)
            .and_then(|index| self.nodes.get(*index))
    }

    pub fn node_handle(&self, id: &str) -> Option<NodeHandle> {
        self.node_table
            .get(id)
            .map(|index| NodeHandle::new(self.tag, *index))
    }

    pub fn node(&self, node: impl Into<NodeRef>) -> GraphResult<&Node> {
        let index = self.resolve(&node.into(), "node")?;
        self.node_at(index, "node")
    }

    pub fn node_mut(&mut self, node: impl Into<NodeRef>) -> GraphResult<&mut Node> {
        let index = self.resolve(&node.into(), "node_mut")?;
        self.node_at_mut(index, "node_mut")
    }

    pub fn contains_node(&self, node: impl Into<NodeRef>) -> bool {
        self.resolve(&node.into(), "contains_node").is_ok()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> + '_ {
        self.node_table.values().filter_map(move |index| {
            self.nodes
                .get(*index)
                .map(|node| (NodeHandle::new(self.tag, *index), node))
        })
    }

    /// Remove a node together with every edge touching it.
    ///
    /// The node is handed back detached and may be added to any graph again.
    pub fn remove_node(&mut self, node: impl Into<NodeRef>) -> GraphResult<Node> {
        let index = self.resolve(&node.into(), "remove_node")?;

        // Directed edges ending here leave no record on this node, so scan the edge set
        let incident: Vec<ArenaIndex> = self
            .edge_set
            .iter()
            .copied()
            .filter(|edge| self.edges.get(*edge).is_some_and(|e| e.touches(index)))
            .collect();
        self.unlink_edges(&incident);

        let mut removed = self
            .nodes
            .remove(index)
            .ok_or_else(|| GraphError::NodeNotFound {
                operation: "remove_node",
                node: index.to_string(),
            })?;
        self.node_table.shift_remove(removed.id());
        removed.clear_connections();
        removed.unbind_from_graph()?;

        debug!(node = %removed.id(), edges = incident.len(), "Removed node");
        Ok(removed)
    }

    // ---- edges ----

    /// Connect two nodes with default options
    pub fn connect(
        &mut self,
        a: impl Into<NodeRef>,
        b: impl Into<NodeRef>,
    ) -> GraphResult<EdgeHandle> {
        self.connect_with(a, b, ConnectOptions::default())
    }

    /// Connect two nodes.
    ///
    /// `options.directed` is only honoured in mixed mode; the other modes
    /// impose their own flag.
    pub fn connect_with(
        &mut self,
        a: impl Into<NodeRef>,
        b: impl Into<NodeRef>,
        options: ConnectOptions,
    ) -> GraphResult<EdgeHandle> {
        let source = self.resolve(&a.into(), "connect")?;
        let target = self.resolve(&b.into(), "connect")?;

        // Any direction blocks in simple mode
        if !self.config.multigraph && self.pair_has_edges(source, target) {
            return Err(GraphError::EdgeAlreadyExists {
                operation: "connect",
                from: self.describe(source),
                to: self.describe(target),
            });
        }

        if source == target && !self.config.allow_selfloops {
            return Err(GraphError::SelfLoopNotAllowed {
                operation: "connect",
                node: self.describe(source),
            });
        }

        let directed = self
            .config
            .direction
            .forced_flag()
            .unwrap_or_else(|| options.directed.unwrap_or(false));

        let edge = Edge::new(self.tag, source, target, directed, options.attributes);
        let edge_id = edge.id();
        let index = self.edges.insert(edge);
        self.edge_set.insert(index);
        self.pair_index
            .entry((source, target))
            .or_default()
            .push(index);

        if let Err(err) = self.attach_connections(index, directed) {
            self.unlink_edge(index);
            return Err(err);
        }

        debug!(
            edge = %edge_id,
            source = %self.describe(source),
            target = %self.describe(target),
            directed,
            "Connected"
        );
        Ok(EdgeHandle::new(self.tag, index))
    }

    /// Remove every edge between `a` and `b`, in both orientations.
    /// Returns the number of edges removed.
    pub fn detach(&mut self, a: impl Into<NodeRef>, b: impl Into<NodeRef>) -> GraphResult<usize> {
        let source = self.resolve(&a.into(), "detach")?;
        let target = self.resolve(&b.into(), "detach")?;

        let doomed = self.edges_between_indices(source, target);
        self.unlink_edges(&doomed);

        debug!(
            source = %self.describe(source),
            target = %self.describe(target),
            removed = doomed.len(),
            "Detached"
        );
        Ok(doomed.len())
    }

    /// Remove one specific edge, handing it back unbound
    pub fn remove_edge(&mut self, edge: EdgeHandle) -> GraphResult<Edge> {
        let index = self.resolve_edge(edge, "remove_edge")?;
        let removed = self
            .unlink_edge(index)
            .ok_or_else(|| GraphError::EdgeNotFound {
                operation: "remove_edge",
                edge: edge.to_string(),
            })?;
        debug!(edge = %removed.id(), "Removed edge");
        Ok(removed)
    }

    pub fn edge(&self, edge: EdgeHandle) -> GraphResult<&Edge> {
        let index = self.resolve_edge(edge, "edge")?;
        self.edges.get(index).ok_or_else(|| GraphError::EdgeNotFound {
            operation: "edge",
            edge: edge.to_string(),
        })
    }

    pub fn edge_mut(&mut self, edge: EdgeHandle) -> GraphResult<&mut Edge> {
        let index = self.resolve_edge(edge, "edge_mut")?;
        self.edges
            .get_mut(index)
            .ok_or_else(|| GraphError::EdgeNotFound {
                operation: "edge_mut",
                edge: edge.to_string(),
            })
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        self.resolve_edge(edge, "contains_edge").is_ok()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (EdgeHandle, &Edge)> + '_ {
        self.edge_set.iter().filter_map(move |index| {
            self.edges
                .get(*index)
                .map(|edge| (EdgeHandle::new(self.tag, *index), edge))
        })
    }

    /// Edges between `a` and `b` in either orientation, in insertion order
    pub fn edges_between(
        &self,
        a: impl Into<NodeRef>,
        b: impl Into<NodeRef>,
    ) -> GraphResult<Vec<EdgeHandle>> {
        let source = self.resolve(&a.into(), "edges_between")?;
        let target = self.resolve(&b.into(), "edges_between")?;
        Ok(self
            .edges_between_indices(source, target)
            .into_iter()
            .map(|index| EdgeHandle::new(self.tag, index))
            .collect())
    }

    /// Whether any edge joins `a` and `b`, ignoring direction
    pub fn are_connected(&self, a: impl Into<NodeRef>, b: impl Into<NodeRef>) -> GraphResult<bool> {
        let source = self.resolve(&a.into(), "are_connected")?;
        let target = self.resolve(&b.into(), "are_connected")?;
        Ok(self.pair_has_edges(source, target))
    }

    /// Neighbors reachable from `node`, in connection insertion order
    pub fn neighbors(
        &self,
        node: impl Into<NodeRef>,
    ) -> GraphResult<impl Iterator<Item = Neighbor<'_>> + '_> {
        let index = self.resolve(&node.into(), "neighbors")?;
        let node = self.node_at(index, "neighbors")?;

        Ok(node.connections().filter_map(move |connection| {
            let neighbor = connection.neighbor_index();
            let edge = connection.edge_index();
            Some(Neighbor {
                handle: NodeHandle::new(self.tag, neighbor),
                node: self.nodes.get(neighbor)?,
                edge_handle: EdgeHandle::new(self.tag, edge),
                edge: self.edges.get(edge)?,
                side: connection.side(),
            })
        }))
    }

    /// Number of connection records on `node`
    pub fn degree(&self, node: impl Into<NodeRef>) -> GraphResult<usize> {
        let index = self.resolve(&node.into(), "degree")?;
        Ok(self.node_at(index, "degree")?.degree())
    }

    pub fn node_count(&self) -> usize {
        self.node_table.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    // ---- reconfiguration ----

    /// Switch the direction mode.
    ///
    /// Moving into undirected or directed rewrites every edge whose flag
    /// disagrees with the new mode. Moving into mixed keeps every flag.
    pub fn set_direction(&mut self, direction: Direction) -> GraphResult<()> {
        let previous = self.config.direction;
        if direction == previous {
            return Ok(());
        }

        let mut rewritten = 0;
        if let Some(flag) = direction.forced_flag() {
            let plan: Vec<ArenaIndex> = self
                .edge_set
                .iter()
                .copied()
                .filter(|index| {
                    self.edges
                        .get(*index)
                        .is_some_and(|edge| edge.is_directed() != flag)
                })
                .collect();

            for index in &plan {
                self.check_endpoints(*index, "set_direction")?;
            }
            for index in &plan {
                self.apply_directed(*index, flag)?;
            }
            rewritten = plan.len();
        }

        self.config.direction = direction;
        info!(from = %previous, to = %direction, rewritten, "Direction changed");
        Ok(())
    }

    /// Change the direction of a single edge; only legal in mixed mode
    pub fn set_edge_directed(&mut self, edge: EdgeHandle, directed: bool) -> GraphResult<()> {
        if self.config.direction != Direction::Mixed {
            return Err(GraphError::IllegalModeOperation {
                operation: "set_edge_directed",
                mode: self.config.direction,
            });
        }

        let index = self.resolve_edge(edge, "set_edge_directed")?;
        self.check_endpoints(index, "set_edge_directed")?;
        self.apply_directed(index, directed)
    }

    /// Turn parallel edges on or off, returning the number of edges discarded.
    ///
    /// Turning them off keeps only the earliest edge of every unordered pair.
    /// The discarded edges are gone for good.
    pub fn set_multigraph(&mut self, multigraph: bool) -> usize {
        if multigraph == self.config.multigraph {
            return 0;
        }

        self.config.multigraph = multigraph;
        let discarded = if multigraph { 0 } else { self.normalize() };
        info!(multigraph, discarded, "Multigraph mode changed");
        discarded
    }

    /// Existing self-loops survive when self-loops are disabled
    pub fn set_allow_selfloops(&mut self, allow: bool) {
        self.config.allow_selfloops = allow;
    }

    pub fn set_allow_override(&mut self, allow: bool) {
        self.config.allow_override = allow;
    }

    /// Drop every node and edge. Configuration and graph attributes stay.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_table.clear();
        self.edges.clear();
        self.edge_set.clear();
        self.pair_index.clear();
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            directed_edges: 0,
            undirected_edges: 0,
            self_loops: 0,
            max_degree: 0,
            avg_degree: 0.0,
        };

        for (_, edge) in self.edges() {
            if edge.is_directed() {
                stats.directed_edges += 1;
            } else {
                stats.undirected_edges += 1;
            }
            if edge.is_self_loop() {
                stats.self_loops += 1;
            }
        }

        let mut total_degree = 0;
        for (_, node) in self.nodes() {
            total_degree += node.degree();
            stats.max_degree = stats.max_degree.max(node.degree());
        }
        if stats.node_count > 0 {
            stats.avg_degree = total_degree as f64 / stats.node_count as f64;
        }

        stats
    }

    /// Read-only copy of node order and neighbor lists
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(self)
    }

    // ---- internals ----

    fn resolve(&self, node: &NodeRef, operation: &'static str) -> GraphResult<ArenaIndex> {
        match node {
            NodeRef::Id(id) => {
                if id.is_empty() {
                    return Err(GraphError::InvalidIdentity {
                        operation,
                        id: id.clone(),
                    });
                }
                self.node_table
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| GraphError::NodeNotFound {
                        operation,
                        node: format!("{:?}", id),
                    })
            }
            NodeRef::Handle(handle) => {
                if handle.graph() != self.tag {
                    return Err(GraphError::OwnershipViolation {
                        operation,
                        reason: format!("{} belongs to another graph", handle),
                    });
                }
                if self.nodes.contains(handle.index()) {
                    Ok(handle.index())
                } else {
                    Err(GraphError::NodeNotFound {
                        operation,
                        node: handle.to_string(),
                    })
                }
            }
        }
    }

    fn resolve_edge(&self, edge: EdgeHandle, operation: &'static str) -> GraphResult<ArenaIndex> {
        if edge.graph() != self.tag {
            return Err(GraphError::OwnershipViolation {
                operation,
                reason: format!("{} belongs to another graph", edge),
            });
        }
        if self.edges.contains(edge.index()) {
            Ok(edge.index())
        } else {
            Err(GraphError::EdgeNotFound {
                operation,
                edge: edge.to_string(),
            })
        }
    }

    fn node_at(&self, index: ArenaIndex, operation: &'static str) -> GraphResult<&Node> {
        self.nodes.get(index).ok_or_else(|| GraphError::NodeNotFound {
            operation,
            node: index.to_string(),
        })
    }

    fn node_at_mut(&mut self, index: ArenaIndex, operation: &'static str) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(index)
            .ok_or_else(|| GraphError::NodeNotFound {
                operation,
                node: index.to_string(),
            })
    }

    /// Quoted node id for messages and log fields
    fn describe(&self, index: ArenaIndex) -> String {
        match self.nodes.get(index) {
            Some(node) => format!("{:?}", node.id().as_str()),
            None => index.to_string(),
        }
    }

    fn pair_has_edges(&self, a: ArenaIndex, b: ArenaIndex) -> bool {
        let has = |key: (ArenaIndex, ArenaIndex)| self.pair_index.get(&key).is_some_and(|edges| !edges.is_empty());
        has((a, b)) || has((b, a))
    }

    fn edges_between_indices(&self, a: ArenaIndex, b: ArenaIndex) -> Vec<ArenaIndex> {
        let mut found: Vec<ArenaIndex> = self.pair_index.get(&(a, b)).cloned().unwrap_or_default();
        if a != b {
            if let Some(reverse) = self.pair_index.get(&(b, a)) {
                found.extend(reverse.iter().copied());
            }
        }
        found.sort_by_key(|index| self.edge_set.get_index_of(index));
        found
    }

    /// Add the connection records of a freshly inserted edge
    fn attach_connections(&mut self, index: ArenaIndex, directed: bool) -> GraphResult<()> {
        let edge = self.edges.get(index).ok_or_else(|| GraphError::EdgeNotFound {
            operation: "connect",
            edge: index.to_string(),
        })?;
        let (edge_id, source, target) = (edge.id(), edge.source_index(), edge.target_index());

        self.node_at_mut(source, "connect")?
            .add_connection(Connection::new(index, edge_id, target, Side::Source))?;
        if !directed && source != target {
            self.node_at_mut(target, "connect")?
                .add_connection(Connection::new(index, edge_id, source, Side::Target))?;
        }
        Ok(())
    }

    /// Drop an edge from every structure that references it
    fn unlink_edge(&mut self, index: ArenaIndex) -> Option<Edge> {
        let mut edge = self.edges.remove(index)?;
        let (source, target) = (edge.source_index(), edge.target_index());

        if let Some(node) = self.nodes.get_mut(source) {
            node.remove_connection(index);
        }
        if source != target {
            if let Some(node) = self.nodes.get_mut(target) {
                node.remove_connection(index);
            }
        }

        self.edge_set.shift_remove(&index);
        if let Some(edges) = self.pair_index.get_mut(&(source, target)) {
            edges.retain(|e| *e != index);
            if edges.is_empty() {
                self.pair_index.remove(&(source, target));
            }
        }

        edge.unbind();
        Some(edge)
    }

    /// Drop a batch of edges. Each structure is swept once for the whole
    /// batch, so the cost does not grow with batch size times edge count.
    fn unlink_edges(&mut self, doomed: &[ArenaIndex]) -> usize {
        match doomed {
            [] => return 0,
            [single] => return usize::from(self.unlink_edge(*single).is_some()),
            _ => {}
        }

        let mut removed: FxHashSet<ArenaIndex> = FxHashSet::default();
        let mut touched_nodes: FxHashSet<ArenaIndex> = FxHashSet::default();
        let mut touched_pairs: FxHashSet<(ArenaIndex, ArenaIndex)> = FxHashSet::default();

        for index in doomed {
            let Some(mut edge) = self.edges.remove(*index) else {
                continue;
            };
            let (source, target) = (edge.source_index(), edge.target_index());
            touched_nodes.insert(source);
            touched_nodes.insert(target);
            touched_pairs.insert((source, target));
            removed.insert(*index);
            edge.unbind();
        }

        for node in &touched_nodes {
            if let Some(node) = self.nodes.get_mut(*node) {
                node.remove_connections_of(&removed);
            }
        }

        self.edge_set.retain(|index| !removed.contains(index));
        for pair in &touched_pairs {
            if let Some(edges) = self.pair_index.get_mut(pair) {
                edges.retain(|e| !removed.contains(e));
                if edges.is_empty() {
                    self.pair_index.remove(pair);
                }
            }
        }

        removed.len()
    }

    fn check_endpoints(&self, index: ArenaIndex, operation: &'static str) -> GraphResult<()> {
        let edge = self.edges.get(index).ok_or_else(|| GraphError::EdgeNotFound {
            operation,
            edge: index.to_string(),
        })?;
        self.node_at(edge.source_index(), operation)?;
        self.node_at(edge.target_index(), operation)?;
        Ok(())
    }

    /// Set one edge's flag and add or drop its target-side record to match
    fn apply_directed(&mut self, index: ArenaIndex, directed: bool) -> GraphResult<()> {
        let edge = self.edges.get_mut(index).ok_or_else(|| GraphError::EdgeNotFound {
            operation: "set_directed",
            edge: index.to_string(),
        })?;
        if edge.is_directed() == directed {
            return Ok(());
        }
        edge.set_directed(directed);

        // A self-loop only ever has its source record
        if edge.is_self_loop() {
            return Ok(());
        }

        let (edge_id, source, target) = (edge.id(), edge.source_index(), edge.target_index());
        let node = self.node_at_mut(target, "set_directed")?;
        if directed {
            node.remove_connection_side(index, Side::Target);
        } else if !node.has_connection(index, Side::Target) {
            node.add_connection(Connection::new(index, edge_id, source, Side::Target))?;
        }
        Ok(())
    }

    /// Collapse parallel edges, keeping the earliest per unordered pair
    fn normalize(&mut self) -> usize {
        let mut seen: FxHashSet<(ArenaIndex, ArenaIndex)> = FxHashSet::default();
        let mut doomed = Vec::new();

        for index in &self.edge_set {
            let Some(edge) = self.edges.get(*index) else {
                continue;
            };
            let (s, t) = (edge.source_index(), edge.target_index());
            let key = if s <= t { (s, t) } else { (t, s) };
            if !seen.insert(key) {
                doomed.push(*index);
            }
        }

        self.unlink_edges(&doomed);

        if !doomed.is_empty() {
            warn!(
                discarded = doomed.len(),
                "Multigraph disabled, parallel edges were discarded"
            );
        }
        doomed.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
