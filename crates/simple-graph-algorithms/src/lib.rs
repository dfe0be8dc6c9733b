pub mod common;
pub mod traversal;

pub use common::{GraphView, NodeId};
pub use traversal::{bfs, dfs, TraversalResult};
