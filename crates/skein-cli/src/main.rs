//! skein command-line front end.
//!
//! Reads a node-link JSON graph, runs the analysis pipeline, writes the
//! report JSON, and prints a short summary.
//!
//! ```text
//! skein --input site/data/graph.json --output site/data/analysis.json
//! RUST_LOG=debug skein -i graph.json -o analysis.json --top-n 10
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skein_graph::{Graph, NodeLinkDocument};
use skein_report::{analyze, AnalyzeOptions, Report};

#[derive(Debug, Parser)]
#[command(name = "skein", version, about = "Structural analysis of entity-link graphs")]
struct Args {
    /// Node-link JSON input file.
    #[arg(short, long)]
    input: PathBuf,

    /// Report JSON output file.
    #[arg(short, long)]
    output: PathBuf,

    /// Ranking depth for the top-betweenness / top-PageRank tables.
    #[arg(long, default_value_t = 20)]
    top_n: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skein=info")),
        )
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let doc: NodeLinkDocument =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.input.display()))?;
    let graph = Graph::from_document(&doc).context("building graph")?;

    let options = AnalyzeOptions { top_n: args.top_n, ..Default::default() };
    let report = analyze(&graph, &options);

    if let Some(dir) = args.output.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    fs::write(&args.output, json).with_context(|| format!("writing {}", args.output.display()))?;

    print_summary(&report);
    println!("\nOutput written to: {}", args.output.display());
    Ok(())
}

fn print_summary(report: &Report) {
    println!("=== Analysis Summary ===");
    println!("Nodes: {}", report.meta.nodes);
    println!("Edges: {}", report.meta.edges);
    println!("Communities detected: {}", report.communities.len());
    println!("Connected components: {}", report.components.connected);
    println!("Largest component: {} nodes", report.components.largest_size);
    println!("\nTop 5 by betweenness centrality:");
    for entry in report.top_betweenness.iter().take(5) {
        println!("  {}: {}", entry.entity, entry.score);
    }
    println!("\nTop 5 by PageRank:");
    for entry in report.top_pagerank.iter().take(5) {
        println!("  {}: {}", entry.entity, entry.score);
    }
}
