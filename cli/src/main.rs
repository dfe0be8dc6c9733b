//! simple-graph CLI: replays the bundled demos and renders ad-hoc graphs
//!
//! Edges are given as `A-B` (undirected) or `A>B` (directed). The direction
//! of an edge only sticks in mixed mode; the other modes impose their own.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use simple_graph::algo;
use simple_graph::graph::{ConnectOptions, Direction, Graph, GraphConfig, GraphOptions};
use simple_graph::render::{ConsoleRenderer, Renderer};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-graph", version, about = "Simple Graph demo and rendering CLI")]
struct Cli {
    /// Log every graph mutation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one of the bundled demos
    Demo {
        #[arg(value_enum)]
        name: DemoName,
    },
    /// Build a graph from the command line and print it
    Render {
        /// Node id, repeatable
        #[arg(long = "node")]
        nodes: Vec<String>,

        /// Edge as `A-B` or `A>B`, repeatable. Unknown endpoints are added.
        #[arg(long = "edge")]
        edges: Vec<String>,

        /// undirected, directed or mixed (or 0, 1, 2)
        #[arg(long)]
        direction: Option<Direction>,

        /// Allow parallel edges
        #[arg(long)]
        multigraph: bool,

        /// Allow self-loops
        #[arg(long)]
        selfloops: bool,

        /// Graph options file (.json, .yaml or .yml); flags take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "lines")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DemoName {
    Simple,
    Direction,
    Selfloops,
    Algorithms,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Lines,
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Demo { name } => match name {
            DemoName::Simple => demo_simple(&mut out),
            DemoName::Direction => demo_direction(&mut out),
            DemoName::Selfloops => demo_selfloops(&mut out),
            DemoName::Algorithms => demo_algorithms(&mut out),
        },
        Commands::Render {
            nodes,
            edges,
            direction,
            multigraph,
            selfloops,
            config,
            format,
        } => {
            let mut options = match config {
                Some(path) => GraphOptions::load(&path)
                    .with_context(|| format!("loading graph options from {}", path.display()))?,
                None => GraphOptions::default(),
            };
            if let Some(direction) = direction {
                options.config.direction = direction;
            }
            options.config.multigraph |= multigraph;
            options.config.allow_selfloops |= selfloops;

            let graph = build_graph(options, &nodes, &edges)?;
            render(&graph, format, &mut out)
        }
    }
}

/// Parse `A-B` or `A>B` into (source, target, directed)
fn parse_edge(arg: &str) -> anyhow::Result<(String, String, bool)> {
    let (source, target, directed) = if let Some((a, b)) = arg.split_once('>') {
        (a, b, true)
    } else if let Some((a, b)) = arg.split_once('-') {
        (a, b, false)
    } else {
        bail!("edge {:?} must look like A-B or A>B", arg);
    };

    let (source, target) = (source.trim(), target.trim());
    if source.is_empty() || target.is_empty() {
        bail!("edge {:?} is missing an endpoint", arg);
    }
    Ok((source.to_string(), target.to_string(), directed))
}

fn build_graph(options: GraphOptions, nodes: &[String], edges: &[String]) -> anyhow::Result<Graph> {
    let mut graph = Graph::with_options(options);

    for id in nodes {
        graph
            .add_node(id)
            .with_context(|| format!("adding node {:?}", id))?;
    }

    for arg in edges {
        let (source, target, directed) = parse_edge(arg)?;
        for id in [&source, &target] {
            if !graph.contains_node(id) {
                graph.add_node(id)?;
            }
        }
        graph
            .connect_with(&source, &target, ConnectOptions::new().with_directed(directed))
            .with_context(|| format!("connecting {}", arg))?;
    }

    Ok(graph)
}

fn render(graph: &Graph, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Lines => ConsoleRenderer::new(graph).draw(out)?,
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&graph.snapshot())?)?;
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Node", "Degree", "Neighbors"]);

            for entry in graph.snapshot().nodes {
                table.add_row(vec![
                    entry.id,
                    entry.neighbors.len().to_string(),
                    entry.neighbors.join(", "),
                ]);
            }

            let stats = graph.statistics();
            writeln!(out, "{}", table)?;
            writeln!(
                out,
                "{} node(s), {} edge(s) ({} directed, {} self-loops), {} mode{}",
                stats.node_count,
                stats.edge_count,
                stats.directed_edges,
                stats.self_loops,
                graph.direction(),
                if graph.is_multigraph() { ", multigraph" } else { "" }
            )?;
        }
    }
    Ok(())
}

fn draw_framed(renderer: &mut ConsoleRenderer, graph: &Graph, out: &mut impl Write) -> anyhow::Result<()> {
    renderer.refresh(graph);
    writeln!(out, "\n-------------")?;
    renderer.draw(out)?;
    writeln!(out, "-------------\n")?;
    Ok(())
}

/// The six-node undirected graph shared by the simple and algorithms demos
fn six_node_graph() -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    for id in ["1", "2", "3", "4", "5", "6"] {
        graph.add_node(id)?;
    }
    for (a, b) in [("1", "2"), ("2", "3"), ("4", "2"), ("5", "6"), ("3", "6"), ("5", "4")] {
        graph.connect(a, b)?;
    }
    Ok(graph)
}

fn demo_simple(out: &mut impl Write) -> anyhow::Result<()> {
    let graph = six_node_graph()?;
    ConsoleRenderer::new(&graph).draw(out)?;
    Ok(())
}

fn demo_direction(out: &mut impl Write) -> anyhow::Result<()> {
    let mut graph = Graph::with_config(GraphConfig::default().with_direction(Direction::Directed));
    let mut renderer = ConsoleRenderer::new(&graph);

    for id in ["A", "B", "C", "D"] {
        graph.add_node(id)?;
    }
    graph.connect("A", "B")?;

    let first_is_b = graph
        .neighbors("A")?
        .next()
        .is_some_and(|n| n.id().as_str() == "B");
    writeln!(out, "{}", first_is_b)?;
    writeln!(out, "{}", graph.degree("B")?)?;

    graph.connect("B", "C")?;
    graph.connect("C", "D")?;
    graph.connect("D", "A")?;

    // A -> B -> C -> D -> A
    draw_framed(&mut renderer, &graph, out)?;

    writeln!(out, "{}", graph.direction() == Direction::Directed)?;
    graph.set_direction(Direction::Undirected)?;
    writeln!(out, "{}", graph.direction() == Direction::Directed)?;

    draw_framed(&mut renderer, &graph, out)?;

    graph.set_direction(Direction::Mixed)?;
    draw_framed(&mut renderer, &graph, out)?;

    graph.add_node("E")?;
    graph.connect_with("D", "E", ConnectOptions::directed())?;

    // A - B - C - D -> E, plus D - A
    draw_framed(&mut renderer, &graph, out)?;
    Ok(())
}

fn demo_selfloops(out: &mut impl Write) -> anyhow::Result<()> {
    let mut graph = Graph::with_config(GraphConfig::default().with_selfloops(true));
    graph.add_node("1")?;
    graph.connect("1", "1")?;

    ConsoleRenderer::new(&graph).draw(out)?;
    Ok(())
}

fn demo_algorithms(out: &mut impl Write) -> anyhow::Result<()> {
    let graph = six_node_graph()?;

    for (name, result) in [
        ("dfs", algo::dfs(&graph, "1", Some("6"))),
        ("bfs", algo::bfs(&graph, "1", Some("6"))),
    ] {
        let Some(result) = result else {
            bail!("{} could not find the demo nodes", name);
        };
        writeln!(out, "{} visited: {}", result.path_string(), result.visited)?;
    }
    Ok(())
}
