//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node identifier as exposed by the view (the caller-defined string id)
pub type NodeId = String;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Successor order is preserved from the adjacency lists the view was built
/// from, so traversals are deterministic.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Dense index of a node id, if the view contains it
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.node_to_index.get(node).copied()
    }

    /// Node id stored at a dense index
    pub fn node_at(&self, idx: usize) -> Option<&str> {
        self.index_to_node.get(idx).map(String::as_str)
    }

    /// Build a view from per-node successor lists.
    ///
    /// `outgoing[i]` lists the successors of `index_to_node[i]` by dense index.
    /// Successor indices outside `0..index_to_node.len()` are dropped.
    pub fn from_adjacency_list(index_to_node: Vec<NodeId>, outgoing: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing.into_iter().take(node_count) {
            out_targets.extend(neighbors.into_iter().filter(|&n| n < node_count));
            out_offsets.push(out_targets.len());
        }
        // Pad nodes that had no adjacency row
        while out_offsets.len() < node_count + 1 {
            out_offsets.push(out_targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
        }
    }

    /// Build a view from `(id, successor ids)` rows.
    ///
    /// Successor ids that do not name a row are dropped.
    pub fn from_edges<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let rows: Vec<(String, Vec<String>)> = rows
            .into_iter()
            .map(|(id, succ)| (id.into(), succ.into_iter().map(Into::into).collect()))
            .collect();

        let index_to_node: Vec<NodeId> = rows.iter().map(|(id, _)| id.clone()).collect();
        let lookup: HashMap<&str, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect();

        let outgoing = rows
            .iter()
            .map(|(_, succ)| {
                succ.iter()
                    .filter_map(|s| lookup.get(s.as_str()).copied())
                    .collect()
            })
            .collect();

        Self::from_adjacency_list(index_to_node, outgoing)
    }
}
