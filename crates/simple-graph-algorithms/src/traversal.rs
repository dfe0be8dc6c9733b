//! Uninformed traversal (BFS and DFS)
//!
//! Both searches walk successors in adjacency order and stop as soon as the
//! goal is expanded. A node may be pushed onto the fringe several times; it is
//! expanded only once.

use super::common::{GraphView, NodeId};
use std::collections::{HashSet, VecDeque};

/// Result of a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    /// Node ids in expansion order
    pub order: Vec<NodeId>,
    /// Number of fringe pops, including pops of already expanded nodes
    pub visited: usize,
    /// Whether the goal was reached
    pub found: bool,
}

impl TraversalResult {
    /// Expansion order joined with `->`
    pub fn path_string(&self) -> String {
        self.order.join("->")
    }
}

/// Fringe abstraction shared by both searches
trait Fringe {
    fn put(&mut self, idx: usize);
    fn take(&mut self) -> Option<usize>;
}

impl Fringe for VecDeque<usize> {
    fn put(&mut self, idx: usize) {
        self.push_back(idx);
    }

    fn take(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

impl Fringe for Vec<usize> {
    fn put(&mut self, idx: usize) {
        self.push(idx);
    }

    fn take(&mut self) -> Option<usize> {
        self.pop()
    }
}

fn search<F: Fringe>(
    view: &GraphView,
    mut fringe: F,
    start: &str,
    goal: Option<&str>,
) -> Option<TraversalResult> {
    let start_idx = view.index_of(start)?;
    let goal_idx = match goal {
        Some(goal) => Some(view.index_of(goal)?),
        None => None,
    };

    let mut closed = HashSet::new();
    let mut order = Vec::new();
    let mut visited = 0;
    let mut found = false;

    fringe.put(start_idx);
    while let Some(idx) = fringe.take() {
        visited += 1;
        if !closed.insert(idx) {
            continue;
        }
        order.push(view.index_to_node[idx].clone());

        if Some(idx) == goal_idx {
            found = true;
            break;
        }

        for &next in view.successors(idx) {
            fringe.put(next);
        }
    }

    Some(TraversalResult {
        order,
        visited,
        found,
    })
}

/// Breadth-First Search from `start`, stopping at `goal` when given.
///
/// Returns `None` when `start` (or a given `goal`) is not in the view.
pub fn bfs(view: &GraphView, start: &str, goal: Option<&str>) -> Option<TraversalResult> {
    search(view, VecDeque::new(), start, goal)
}

/// Depth-First Search from `start`, stopping at `goal` when given.
///
/// Successors are pushed in adjacency order, so the last successor is
/// expanded first.
pub fn dfs(view: &GraphView, start: &str, goal: Option<&str>) -> Option<TraversalResult> {
    search(view, Vec::new(), start, goal)
}
