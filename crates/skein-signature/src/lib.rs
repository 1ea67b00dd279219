//! # skein-signature
//!
//! Structural-signature analysis: degree statistics, assortativity,
//! transitivity, small-world test, centralization, broker detection,
//! core–periphery structure, triad census, reciprocity, and the
//! composite archetype match built on top of them.
//!
//! The bundle is only computed for graphs of three or more nodes;
//! anything smaller yields an explicit too-small failure that the report
//! layer serializes as an `{"error": ...}` object.

pub mod archetype;
pub mod metrics;
pub mod triads;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use skein_algo::{CommunityResult, ComponentResult, Outcome};
use skein_graph::Graph;

pub use archetype::{grad, score_archetypes, MetricInputs, PatternMatch, ARCHETYPE_NAMES};
pub use metrics::{
    assortativity, brokers, centralization, core_periphery, degree_distribution, modularity_summary,
    reciprocity, small_world, transitivity, Assortativity, Broker, Centralization, CorePeriphery,
    DegreeDistribution, MetricBlock, ModularitySummary, Reciprocity, SmallWorld, Transitivity,
};
pub use triads::{triad_census, TriadCensus, TRIAD_TYPES};

/// Triad types surfaced in the report (the full census backs them).
const REPORTED_TRIADS: [&str; 7] = ["003", "012", "021D", "030C", "030T", "111U", "300"];

/// The full metric bundle of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct StructuralSignature {
    pub node_count: usize,
    pub edge_count: usize,
    pub degree_distribution: DegreeDistribution,
    pub assortativity: Assortativity,
    pub transitivity: Transitivity,
    pub small_world: MetricBlock<SmallWorld>,
    pub centralization: Centralization,
    pub brokers: Vec<Broker>,
    pub core_periphery: CorePeriphery,
    pub triad_census: BTreeMap<String, u64>,
    pub reciprocity: Reciprocity,
    pub modularity: ModularitySummary,
    pub pattern_match: PatternMatch,
}

/// Compute the signature bundle from the graph and the upstream results.
///
/// Requires `betweenness` and `coreness` indexed by node; both come from
/// the centrality/core stages of the pipeline. Each sub-metric settles
/// its own degenerate cases; only the 3-node minimum fails the bundle as
/// a whole.
pub fn structural_signature(
    graph: &Graph,
    betweenness: &[f64],
    coreness: &[u32],
    communities: &CommunityResult,
    components: &ComponentResult,
) -> Outcome<StructuralSignature> {
    let n = graph.node_count();
    if n < 3 {
        return Outcome::failed(format!(
            "graph too small for structural analysis: {n} nodes (3+ required)"
        ));
    }

    let degree_distribution = metrics::degree_distribution(graph);
    let assortativity = metrics::assortativity(graph);
    let transitivity = metrics::transitivity(graph);
    let small_world = metrics::small_world(graph, components, transitivity.average_clustering);
    let centralization = metrics::centralization(graph);
    let brokers = metrics::brokers(graph, betweenness);
    let core_periphery = metrics::core_periphery(graph, coreness);
    let census = triads::triad_census(graph);
    let reciprocity = metrics::reciprocity(graph);
    let modularity = metrics::modularity_summary(communities.modularity, communities.communities.len());

    let inputs = MetricInputs {
        degree_skewness: degree_distribution.skewness,
        assortativity: assortativity.value,
        transitivity: transitivity.global,
        avg_clustering: transitivity.average_clustering,
        small_world_sigma: small_world.value().map_or(0.0, |sw| sw.sigma),
        degree_share: centralization.degree_share,
        freeman_centralization: centralization.freeman,
        modularity: modularity.value,
        true_asymmetry: reciprocity.true_asymmetry,
        core_density: core_periphery.core_density,
        periphery_density: core_periphery.periphery_density,
        max_betweenness: betweenness.iter().cloned().fold(0.0_f64, f64::max),
    };
    let pattern_match = score_archetypes(&inputs);

    debug!(
        best_match = %pattern_match.best_match,
        best_score = pattern_match.best_score,
        "structural signature computed"
    );

    let triad_counts: BTreeMap<String, u64> = REPORTED_TRIADS
        .iter()
        .map(|&t| (t.to_string(), census.count(t)))
        .collect();

    Outcome::Computed(StructuralSignature {
        node_count: n,
        edge_count: graph.undirected_edge_count(),
        degree_distribution,
        assortativity,
        transitivity,
        small_world: small_world.into(),
        centralization,
        brokers,
        core_periphery,
        triad_census: triad_counts,
        reciprocity,
        modularity,
        pattern_match,
    })
}
