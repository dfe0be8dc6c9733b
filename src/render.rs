//! Text rendering of a graph
//!
//! Renderers never see the graph directly while drawing: `refresh` copies the
//! node order and neighbor lists into a [`GraphSnapshot`], and `draw` writes
//! that copy out.

use crate::graph::Graph;
use serde::Serialize;
use std::fmt;
use std::io;

/// One node of a snapshot with the ids of its neighbors, in connection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub id: String,
    pub neighbors: Vec<String>,
}

/// Read-only copy of a graph's adjacency, in node insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotEntry>,
}

impl GraphSnapshot {
    pub fn capture(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|(handle, node)| SnapshotEntry {
                id: node.id().to_string(),
                neighbors: graph
                    .neighbors(handle)
                    .map(|neighbors| neighbors.map(|n| n.id().to_string()).collect::<Vec<_>>())
                    .unwrap_or_default(),
            })
            .collect();

        GraphSnapshot { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SnapshotEntry> {
        self.nodes.iter().find(|entry| entry.id == id)
    }
}

/// One line per node: `id: n1,n2`. A node without neighbors prints its id alone.
impl fmt::Display for GraphSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.nodes {
            if entry.neighbors.is_empty() {
                writeln!(f, "{}", entry.id)?;
            } else {
                writeln!(f, "{}: {}", entry.id, entry.neighbors.join(","))?;
            }
        }
        Ok(())
    }
}

/// Something that can draw a graph
pub trait Renderer {
    /// Re-read the graph
    fn refresh(&mut self, graph: &Graph);

    fn draw(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Plain text renderer producing the [`GraphSnapshot`] line format
#[derive(Debug, Clone, Default)]
pub struct ConsoleRenderer {
    snapshot: GraphSnapshot,
}

impl ConsoleRenderer {
    pub fn new(graph: &Graph) -> Self {
        ConsoleRenderer {
            snapshot: graph.snapshot(),
        }
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }
}

impl Renderer for ConsoleRenderer {
    fn refresh(&mut self, graph: &Graph) {
        self.snapshot = graph.snapshot();
    }

    fn draw(&self, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{}", self.snapshot)
    }
}
