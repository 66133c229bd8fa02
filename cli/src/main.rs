use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use dfs_viz_core::{dfs_forest, load_graph, validate_graph, InputFormat, OutputFormat, TraversalDirection};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// DFS Tree Generator and Visualizer
#[derive(Parser, Debug)]
#[command(name = "dfs-viz", version, about)]
struct Cli {
    /// Path to the input graph file (adjacency list)
    #[arg(long, default_value = "graph.txt", env = "DFS_VIZ_INPUT")]
    input: PathBuf,

    /// Path to the output visualization file
    #[arg(long, default_value = "output.txt", env = "DFS_VIZ_OUTPUT")]
    output: PathBuf,

    /// Output format: text or dot
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Input encoding: auto (by extension), text or json
    #[arg(long, default_value = "auto")]
    input_format: InputFormat,

    /// Root node of the traversal (defaults to the first node in the input)
    #[arg(long)]
    start: Option<String>,

    /// Edges to follow: outgoing, incoming or both
    #[arg(long, default_value = "outgoing")]
    direction: TraversalDirection,

    /// Fail on neighbors that have no adjacency record of their own
    #[arg(long)]
    strict: bool,

    /// Also print the DFS discovery order to stdout
    #[arg(long)]
    print_order: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => {
            println!("DFS visualization saved to {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let t = Instant::now();
    let graph = load_graph(&cli.input, cli.input_format)
        .with_context(|| format!("failed to load graph from {}", cli.input.display()))?;
    validate_graph(&graph, cli.strict).context("invalid graph")?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );

    let tree = dfs_forest(&graph, cli.start.as_deref(), cli.direction)?;
    let rendered = cli.format.render(&tree);

    std::fs::write(&cli.output, rendered)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        format = %cli.format,
        components = tree.roots.len(),
        "visualization written"
    );

    if cli.print_order {
        println!("DFS traversal order: {}", tree.discovery_order.join(", "));
    }
    Ok(())
}
