//! # skein-report
//!
//! Runs the full analysis pipeline over one immutable graph snapshot and
//! assembles the output report: per-entity metrics, community and
//! component summaries, top-N rankings, and the structural-signature
//! bundle. The single entry point is [`analyze`].

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use skein_algo::{
    betweenness, connected_components, core_numbers, degree_centrality, detect_communities,
    eigenvector, pagerank, EigenvectorConfig, Outcome, PageRankConfig,
};
use skein_graph::Graph;
use skein_signature::{structural_signature, MetricBlock, StructuralSignature};

// ─────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Ranking depth for the top-betweenness / top-PageRank tables.
    pub top_n: usize,
    pub pagerank: PageRankConfig,
    pub eigenvector: EigenvectorConfig,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            pagerank: PageRankConfig::default(),
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────
// Report structure
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    /// ISO-8601 generation timestamp (UTC).
    pub generated: String,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeMetrics {
    pub betweenness: f64,
    pub pagerank: f64,
    pub eigenvector: f64,
    /// Community id, -1 when the node carries no assignment.
    pub community: i64,
    pub in_degree_centrality: f64,
    pub out_degree_centrality: f64,
    pub coreness: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunitySummary {
    pub id: usize,
    pub members: Vec<String>,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentsSummary {
    pub connected: usize,
    pub largest_size: usize,
    pub num_components: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    pub entity: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: Meta,
    pub nodes: BTreeMap<String, NodeMetrics>,
    pub communities: Vec<CommunitySummary>,
    pub components: ComponentsSummary,
    pub top_betweenness: Vec<RankEntry>,
    pub top_pagerank: Vec<RankEntry>,
    pub structural_signatures: MetricBlock<StructuralSignature>,
}

// ─────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────

/// Run every analysis stage over the graph and assemble the report.
///
/// Pure apart from the generation timestamp: identical input yields an
/// identical report except `meta.generated`. Recoverable stage failures
/// (non-convergence, degenerate sizes) resolve to their documented
/// fallbacks inside each stage and never abort the run.
pub fn analyze(graph: &Graph, options: &AnalyzeOptions) -> Report {
    let started = Instant::now();
    let n = graph.node_count();
    info!(
        nodes = n,
        directed_edges = graph.directed_edge_count(),
        undirected_edges = graph.undirected_edge_count(),
        "starting analysis"
    );

    let bc = betweenness(graph);
    let pr = unwrap_logged("pagerank", pagerank(graph, &options.pagerank));
    let ev = unwrap_logged("eigenvector", eigenvector(graph, &options.eigenvector));
    let (in_dc, out_dc) = degree_centrality(graph);
    let cores = core_numbers(graph);
    let communities = detect_communities(graph);
    let components = connected_components(graph);
    debug!(
        communities = communities.communities.len(),
        components = components.component_count,
        "decomposition stages finished"
    );

    let signatures = structural_signature(graph, &bc, &cores, &communities, &components);
    if let Some(reason) = signatures.reason() {
        warn!(reason, "structural signatures degraded");
    }

    let nodes: BTreeMap<String, NodeMetrics> = (0..n)
        .map(|i| {
            (
                graph.id(i).to_string(),
                NodeMetrics {
                    betweenness: round6(bc[i]),
                    pagerank: round6(pr[i]),
                    eigenvector: round6(ev[i]),
                    community: communities
                        .assignment
                        .get(i)
                        .map_or(-1, |&c| c as i64),
                    in_degree_centrality: round6(in_dc[i]),
                    out_degree_centrality: round6(out_dc[i]),
                    coreness: cores[i],
                },
            )
        })
        .collect();

    let community_summaries: Vec<CommunitySummary> = communities
        .communities
        .iter()
        .enumerate()
        .map(|(id, members)| {
            let mut ids: Vec<String> = members.iter().map(|&m| graph.id(m).to_string()).collect();
            ids.sort_unstable();
            CommunitySummary { id, size: ids.len(), members: ids }
        })
        .collect();

    let report = Report {
        meta: Meta {
            generated: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            nodes: n,
            edges: graph.undirected_edge_count(),
        },
        nodes,
        communities: community_summaries,
        components: ComponentsSummary {
            connected: components.component_count,
            largest_size: components.largest_size,
            num_components: components.component_count,
        },
        top_betweenness: top_n(graph, &bc, options.top_n),
        top_pagerank: top_n(graph, &pr, options.top_n),
        structural_signatures: signatures.into(),
    };

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "analysis finished");
    report
}

/// Resolve an [`Outcome`] to its value, logging fallbacks.
fn unwrap_logged(stage: &str, outcome: Outcome<Vec<f64>>) -> Vec<f64> {
    if let Some(reason) = outcome.reason() {
        warn!(stage, reason, "stage fell back");
    }
    outcome.into_value().unwrap_or_default()
}

/// Top `n` entities by score, descending, ties by id ascending.
fn top_n(graph: &Graph, scores: &[f64], n: usize) -> Vec<RankEntry> {
    let mut ranked: Vec<RankEntry> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| RankEntry {
            entity: graph.id(i).to_string(),
            score: round6(score),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entity.cmp(&b.entity))
    });
    ranked.truncate(n);
    ranked
}

fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}
