//! Randomised operation sequences must keep adjacency consistent with the edge set

use proptest::prelude::*;
use simple_graph::graph::{ConnectOptions, Direction, EdgeHandle, Graph, GraphConfig, NodeHandle};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    AddNode(u8),
    RemoveNode(u8),
    Connect(u8, u8, bool),
    Detach(u8, u8),
    RemoveEdge(usize),
    FlipEdge(usize, bool),
    SetDirection(u8),
    SetMultigraph(bool),
    SetSelfloops(bool),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::AddNode),
        (0u8..6).prop_map(Op::RemoveNode),
        (0u8..6, 0u8..6, any::<bool>()).prop_map(|(a, b, d)| Op::Connect(a, b, d)),
        (0u8..6, 0u8..6, any::<bool>()).prop_map(|(a, b, d)| Op::Connect(a, b, d)),
        (0u8..6, 0u8..6).prop_map(|(a, b)| Op::Detach(a, b)),
        (0usize..8).prop_map(Op::RemoveEdge),
        (0usize..8, any::<bool>()).prop_map(|(i, d)| Op::FlipEdge(i, d)),
        (0u8..3).prop_map(Op::SetDirection),
        any::<bool>().prop_map(Op::SetMultigraph),
        any::<bool>().prop_map(Op::SetSelfloops),
    ]
}

fn id(n: u8) -> String {
    format!("n{}", n)
}

fn nth_edge(graph: &Graph, i: usize) -> Option<EdgeHandle> {
    graph.edges().nth(i).map(|(handle, _)| handle)
}

fn apply(graph: &mut Graph, op: &Op) {
    let edges_before = graph.edge_count();
    let nodes_before = graph.node_count();

    let failed = match op {
        Op::AddNode(n) => graph.add_node(id(*n)).is_err(),
        Op::RemoveNode(n) => graph.remove_node(id(*n)).is_err(),
        Op::Connect(a, b, directed) => graph
            .connect_with(id(*a), id(*b), ConnectOptions::new().with_directed(*directed))
            .is_err(),
        Op::Detach(a, b) => graph.detach(id(*a), id(*b)).is_err(),
        Op::RemoveEdge(i) => match nth_edge(graph, *i) {
            Some(edge) => graph.remove_edge(edge).is_err(),
            None => false,
        },
        Op::FlipEdge(i, directed) => match nth_edge(graph, *i) {
            Some(edge) => graph.set_edge_directed(edge, *directed).is_err(),
            None => false,
        },
        Op::SetDirection(code) => {
            let direction = Direction::from_code(u64::from(*code)).unwrap();
            graph.set_direction(direction).is_err()
        }
        Op::SetMultigraph(multigraph) => {
            graph.set_multigraph(*multigraph);
            false
        }
        Op::SetSelfloops(allow) => {
            graph.set_allow_selfloops(*allow);
            false
        }
    };

    if failed {
        assert_eq!(graph.edge_count(), edges_before, "failed {:?} changed edges", op);
        assert_eq!(graph.node_count(), nodes_before, "failed {:?} changed nodes", op);
    }
}

/// Recompute every node's records from the edge set and compare
fn assert_consistent(graph: &Graph) {
    let mut expected: HashMap<NodeHandle, usize> = HashMap::new();
    let mut pairs: HashMap<(String, String), usize> = HashMap::new();

    for (_, edge) in graph.edges() {
        assert!(edge.is_bound());
        if let Some(flag) = graph.direction().forced_flag() {
            assert_eq!(edge.is_directed(), flag);
        }

        *expected.entry(edge.source()).or_default() += 1;
        if !edge.is_directed() && !edge.is_self_loop() {
            *expected.entry(edge.target()).or_default() += 1;
        }

        let a = graph.node(edge.source()).unwrap().id().to_string();
        let b = graph.node(edge.target()).unwrap().id().to_string();
        let key = if a <= b { (a, b) } else { (b, a) };
        *pairs.entry(key).or_default() += 1;
    }

    for (handle, node) in graph.nodes() {
        assert_eq!(
            node.degree(),
            expected.get(&handle).copied().unwrap_or(0),
            "records of {}",
            node.id()
        );
        for neighbor in graph.neighbors(handle).unwrap() {
            assert!(neighbor.edge.opposite(handle).is_some());
            assert_eq!(neighbor.edge.opposite(handle), Some(neighbor.handle));
        }
    }

    if !graph.is_multigraph() {
        assert!(pairs.values().all(|count| *count == 1));
    }

    let stats = graph.statistics();
    assert_eq!(stats.edge_count, graph.edges().count());
    assert_eq!(stats.node_count, graph.nodes().count());
    assert_eq!(stats.directed_edges + stats.undirected_edges, stats.edge_count);
}

fn arb_config() -> impl Strategy<Value = GraphConfig> {
    (0u8..3, any::<bool>(), any::<bool>()).prop_map(|(code, multigraph, selfloops)| {
        GraphConfig::default()
            .with_direction(Direction::from_code(u64::from(code)).unwrap())
            .with_multigraph(multigraph)
            .with_selfloops(selfloops)
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn adjacency_matches_edge_set(config in arb_config(), ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut graph = Graph::with_config(config);
        for n in 0..4 {
            graph.add_node(id(n)).unwrap();
        }

        for op in &ops {
            apply(&mut graph, op);
            assert_consistent(&graph);
        }
    }

    #[test]
    fn direction_round_trip_restores_degrees(
        edges in prop::collection::vec((0u8..5, 0u8..5), 0..20)
    ) {
        let mut graph = Graph::with_config(
            GraphConfig::default()
                .with_direction(Direction::Directed)
                .with_multigraph(true)
                .with_selfloops(true),
        );
        for n in 0..5 {
            graph.add_node(id(n)).unwrap();
        }
        for (a, b) in &edges {
            graph.connect(id(*a), id(*b)).unwrap();
        }

        let before: Vec<usize> = graph.nodes().map(|(_, n)| n.degree()).collect();
        graph.set_direction(Direction::Undirected).unwrap();
        assert_consistent(&graph);
        graph.set_direction(Direction::Directed).unwrap();
        let after: Vec<usize> = graph.nodes().map(|(_, n)| n.degree()).collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(graph.edge_count(), edges.len());
    }

    #[test]
    fn normalization_leaves_one_edge_per_pair(
        edges in prop::collection::vec((0u8..4, 0u8..4, any::<bool>()), 0..24)
    ) {
        let mut graph = Graph::with_config(
            GraphConfig::default()
                .with_direction(Direction::Mixed)
                .with_multigraph(true)
                .with_selfloops(true),
        );
        for n in 0..4 {
            graph.add_node(id(n)).unwrap();
        }
        let mut first_per_pair = HashMap::new();
        for (a, b, directed) in &edges {
            let handle = graph
                .connect_with(id(*a), id(*b), ConnectOptions::new().with_directed(*directed))
                .unwrap();
            first_per_pair.entry((a.min(b), a.max(b))).or_insert(handle);
        }

        let discarded = graph.set_multigraph(false);
        prop_assert_eq!(discarded, edges.len() - first_per_pair.len());
        prop_assert_eq!(graph.edge_count(), first_per_pair.len());
        for handle in first_per_pair.values() {
            prop_assert!(graph.contains_edge(*handle));
        }
        assert_consistent(&graph);
    }
}
