//! Graph algorithms module
//!
//! Algorithms are implemented in the `simple-graph-algorithms` crate over a
//! dense [`GraphView`]. This module provides the adapter layer: it builds the
//! view from the public neighbor contract and resolves node ids.

use crate::graph::Graph;
use simple_graph_algorithms::NodeId as AlgoNodeId;
use std::collections::HashMap;

// Re-export algorithms
pub use simple_graph_algorithms::{GraphView, TraversalResult};

/// Build a GraphView from the graph for algorithm execution.
///
/// A node's successors are its neighbors in connection order, so a directed
/// edge is only followed from its source.
pub fn build_view(graph: &Graph) -> GraphView {
    // 1. Collect nodes in insertion order
    let index_to_node: Vec<AlgoNodeId> = graph
        .nodes()
        .map(|(_, node)| node.id().to_string())
        .collect();

    // 2. Build index mappings
    let node_to_index: HashMap<&str, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.as_str(), idx))
        .collect();

    // 3. Adjacency lists by dense index
    let outgoing: Vec<Vec<usize>> = graph
        .nodes()
        .map(|(handle, _)| match graph.neighbors(handle) {
            Ok(neighbors) => neighbors
                .filter_map(|n| node_to_index.get(n.id().as_str()).copied())
                .collect(),
            Err(_) => Vec::new(),
        })
        .collect();

    // 4. Convert to CSR
    GraphView::from_adjacency_list(index_to_node, outgoing)
}

/// Breadth-first search by node id; `None` if `start` or `goal` is unknown
pub fn bfs(graph: &Graph, start: &str, goal: Option<&str>) -> Option<TraversalResult> {
    simple_graph_algorithms::bfs(&build_view(graph), start, goal)
}

/// Depth-first search by node id; `None` if `start` or `goal` is unknown
pub fn dfs(graph: &Graph, start: &str, goal: Option<&str>) -> Option<TraversalResult> {
    simple_graph_algorithms::dfs(&build_view(graph), start, goal)
}
