//! Direction and multiplicity conversions on populated graphs

use simple_graph::graph::{ConnectOptions, Direction, ErrorKind, Graph, GraphConfig};

fn base(direction: Direction, multigraph: bool) -> Graph {
    let mut graph = Graph::with_config(
        GraphConfig::default()
            .with_direction(direction)
            .with_multigraph(multigraph),
    );
    for id in ["1", "2", "3"] {
        graph.add_node(id).unwrap();
    }
    graph
}

fn connect(graph: &mut Graph, a: &str, b: &str, directed: bool) {
    graph
        .connect_with(a, b, ConnectOptions::new().with_directed(directed))
        .unwrap();
}

/// 1 -> 2, 2 - 3, 3 -> 1 (flags only stick in mixed mode)
fn simple_graph(direction: Direction) -> Graph {
    let mut graph = base(direction, false);
    connect(&mut graph, "1", "2", true);
    connect(&mut graph, "2", "3", false);
    connect(&mut graph, "3", "1", true);
    graph
}

/// A directed and an undirected edge for every pair of the triangle
fn multi_graph(direction: Direction) -> Graph {
    let mut graph = base(direction, true);
    for (a, b) in [("1", "2"), ("2", "3"), ("3", "1")] {
        connect(&mut graph, a, b, true);
        connect(&mut graph, a, b, false);
    }
    graph
}

fn degree(graph: &Graph, id: &str) -> usize {
    graph.degree(id).unwrap()
}

/// How many of `from`'s connection records reach `to`
fn reaches(graph: &Graph, from: &str, to: &str) -> usize {
    graph
        .neighbors(from)
        .unwrap()
        .filter(|n| n.id().as_str() == to)
        .count()
}

fn set_direction(graph: &mut Graph, from: Direction, to: Direction) {
    assert_eq!(graph.direction(), from);
    graph.set_direction(to).unwrap();
    assert_eq!(graph.direction(), to);
}

fn set_multigraph(graph: &mut Graph, multigraph: bool) {
    assert_ne!(graph.is_multigraph(), multigraph);
    graph.set_multigraph(multigraph);
    assert_eq!(graph.is_multigraph(), multigraph);
}

fn assert_undirected_simple(graph: &Graph) {
    for id in ["1", "2", "3"] {
        assert_eq!(degree(graph, id), 2, "degree of {}", id);
    }
    for (a, b) in [("1", "2"), ("1", "3"), ("2", "1"), ("2", "3"), ("3", "2"), ("3", "1")] {
        assert_eq!(reaches(graph, a, b), 1, "{} -> {}", a, b);
    }
}

fn assert_directed_simple(graph: &Graph) {
    for id in ["1", "2", "3"] {
        assert_eq!(degree(graph, id), 1, "degree of {}", id);
    }
    assert_eq!(reaches(graph, "1", "2"), 1);
    assert_eq!(reaches(graph, "2", "3"), 1);
    assert_eq!(reaches(graph, "3", "1"), 1);
}

fn assert_mixed_simple(graph: &Graph) {
    assert_eq!(degree(graph, "1"), 1);
    assert_eq!(degree(graph, "2"), 1);
    assert_eq!(degree(graph, "3"), 2);

    assert_eq!(reaches(graph, "1", "2"), 1);
    assert_eq!(reaches(graph, "2", "3"), 1);
    assert_eq!(reaches(graph, "3", "2"), 1);
    assert_eq!(reaches(graph, "3", "1"), 1);
}

fn assert_undirected_multi(graph: &Graph) {
    for id in ["1", "2", "3"] {
        assert_eq!(degree(graph, id), 4, "degree of {}", id);
    }
    for (a, b) in [("1", "2"), ("1", "3"), ("2", "1"), ("2", "3"), ("3", "1"), ("3", "2")] {
        assert_eq!(reaches(graph, a, b), 2, "{} -> {}", a, b);
    }
}

fn assert_directed_multi(graph: &Graph) {
    for id in ["1", "2", "3"] {
        assert_eq!(degree(graph, id), 2, "degree of {}", id);
    }
    assert_eq!(reaches(graph, "1", "2"), 2);
    assert_eq!(reaches(graph, "2", "3"), 2);
    assert_eq!(reaches(graph, "3", "1"), 2);
}

fn assert_mixed_multi(graph: &Graph) {
    for id in ["1", "2", "3"] {
        assert_eq!(degree(graph, id), 3, "degree of {}", id);
    }
    assert_eq!(reaches(graph, "1", "2"), 2);
    assert_eq!(reaches(graph, "1", "3"), 1);
    assert_eq!(reaches(graph, "2", "1"), 1);
    assert_eq!(reaches(graph, "2", "3"), 2);
    assert_eq!(reaches(graph, "3", "1"), 2);
    assert_eq!(reaches(graph, "3", "2"), 1);
}

/// New edges honour their own flag once the graph is mixed
fn assert_accepts_mixed_edges(graph: &mut Graph) {
    assert_eq!(graph.direction(), Direction::Mixed);
    for id in ["4", "5", "6"] {
        graph.add_node(id).unwrap();
    }
    connect(graph, "4", "5", false);
    connect(graph, "5", "6", true);

    assert_eq!(degree(graph, "4"), 1);
    assert_eq!(degree(graph, "5"), 2);
    assert_eq!(degree(graph, "6"), 0);
    assert_eq!(reaches(graph, "4", "5"), 1);
    assert_eq!(reaches(graph, "5", "4"), 1);
    assert_eq!(reaches(graph, "5", "6"), 1);
}

fn assert_rejects_parallel(graph: &mut Graph) {
    graph.add_node("4").unwrap();
    graph.add_node("5").unwrap();
    graph.connect("4", "5").unwrap();
    let err = graph.connect("4", "5").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EdgeConflict);
}

fn assert_accepts_parallel(graph: &mut Graph) {
    graph.add_node("6").unwrap();
    graph.add_node("7").unwrap();
    graph.connect("6", "7").unwrap();
    graph.connect("6", "7").unwrap();
}

#[test]
fn undirected_simple_to_directed_simple() {
    let mut graph = simple_graph(Direction::Undirected);
    assert_undirected_simple(&graph);
    set_direction(&mut graph, Direction::Undirected, Direction::Directed);
    assert_directed_simple(&graph);
}

#[test]
fn directed_simple_to_undirected_simple() {
    let mut graph = simple_graph(Direction::Directed);
    assert_directed_simple(&graph);
    set_direction(&mut graph, Direction::Directed, Direction::Undirected);
    assert_undirected_simple(&graph);
}

#[test]
fn undirected_simple_to_mixed_simple() {
    let mut graph = simple_graph(Direction::Undirected);
    assert_undirected_simple(&graph);
    set_direction(&mut graph, Direction::Undirected, Direction::Mixed);
    assert_undirected_simple(&graph);
    assert_accepts_mixed_edges(&mut graph);
}

#[test]
fn directed_simple_to_mixed_simple() {
    let mut graph = simple_graph(Direction::Directed);
    assert_directed_simple(&graph);
    set_direction(&mut graph, Direction::Directed, Direction::Mixed);
    assert_directed_simple(&graph);
    assert_accepts_mixed_edges(&mut graph);
}

#[test]
fn mixed_simple_to_undirected_simple() {
    let mut graph = simple_graph(Direction::Mixed);
    assert_mixed_simple(&graph);
    set_direction(&mut graph, Direction::Mixed, Direction::Undirected);
    assert_undirected_simple(&graph);
}

#[test]
fn mixed_simple_to_directed_simple() {
    let mut graph = simple_graph(Direction::Mixed);
    assert_mixed_simple(&graph);
    set_direction(&mut graph, Direction::Mixed, Direction::Directed);
    assert_directed_simple(&graph);
}

#[test]
fn undirected_multi_to_directed_multi() {
    let mut graph = multi_graph(Direction::Undirected);
    assert_undirected_multi(&graph);
    set_direction(&mut graph, Direction::Undirected, Direction::Directed);
    assert_directed_multi(&graph);
}

#[test]
fn directed_multi_to_undirected_multi() {
    let mut graph = multi_graph(Direction::Directed);
    assert_directed_multi(&graph);
    set_direction(&mut graph, Direction::Directed, Direction::Undirected);
    assert_undirected_multi(&graph);
}

#[test]
fn undirected_multi_to_mixed_multi() {
    let mut graph = multi_graph(Direction::Undirected);
    assert_undirected_multi(&graph);
    set_direction(&mut graph, Direction::Undirected, Direction::Mixed);
    assert_undirected_multi(&graph);
    assert_accepts_mixed_edges(&mut graph);
}

#[test]
fn directed_multi_to_mixed_multi() {
    let mut graph = multi_graph(Direction::Directed);
    assert_directed_multi(&graph);
    set_direction(&mut graph, Direction::Directed, Direction::Mixed);
    assert_directed_multi(&graph);
    assert_accepts_mixed_edges(&mut graph);
}

#[test]
fn mixed_multi_to_undirected_multi() {
    let mut graph = multi_graph(Direction::Mixed);
    assert_mixed_multi(&graph);
    set_direction(&mut graph, Direction::Mixed, Direction::Undirected);
    assert_undirected_multi(&graph);
}

#[test]
fn mixed_multi_to_directed_multi() {
    let mut graph = multi_graph(Direction::Mixed);
    assert_mixed_multi(&graph);
    set_direction(&mut graph, Direction::Mixed, Direction::Directed);
    assert_directed_multi(&graph);
}

#[test]
fn undirected_simple_to_undirected_multi() {
    let mut graph = simple_graph(Direction::Undirected);
    assert_undirected_simple(&graph);
    assert_rejects_parallel(&mut graph);
    set_multigraph(&mut graph, true);
    assert_accepts_parallel(&mut graph);
}

#[test]
fn directed_simple_to_directed_multi() {
    let mut graph = simple_graph(Direction::Directed);
    assert_directed_simple(&graph);
    assert_rejects_parallel(&mut graph);
    set_multigraph(&mut graph, true);
    assert_accepts_parallel(&mut graph);
}

#[test]
fn mixed_simple_to_mixed_multi() {
    let mut graph = simple_graph(Direction::Mixed);
    assert_mixed_simple(&graph);
    assert_rejects_parallel(&mut graph);
    set_multigraph(&mut graph, true);
    assert_accepts_parallel(&mut graph);
}

#[test]
fn undirected_multi_to_undirected_simple() {
    let mut graph = multi_graph(Direction::Undirected);
    assert_undirected_multi(&graph);
    assert_accepts_parallel(&mut graph);
    set_multigraph(&mut graph, false);
    assert_rejects_parallel(&mut graph);
    assert_undirected_simple(&graph);
}

#[test]
fn directed_multi_to_directed_simple() {
    let mut graph = multi_graph(Direction::Directed);
    assert_directed_multi(&graph);
    assert_accepts_parallel(&mut graph);
    set_multigraph(&mut graph, false);
    assert_rejects_parallel(&mut graph);
    assert_directed_simple(&graph);
}

#[test]
fn mixed_multi_to_mixed_simple() {
    let mut graph = multi_graph(Direction::Mixed);
    assert_mixed_multi(&graph);
    assert_accepts_parallel(&mut graph);
    set_multigraph(&mut graph, false);
    assert_rejects_parallel(&mut graph);

    // The earliest edge of each pair was the directed one
    assert_directed_simple(&graph);
}

#[test]
fn normalization_reports_discarded_edges() {
    let mut graph = multi_graph(Direction::Mixed);
    assert_eq!(graph.edge_count(), 6);
    assert_eq!(graph.set_multigraph(false), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.set_multigraph(false), 0);
}
