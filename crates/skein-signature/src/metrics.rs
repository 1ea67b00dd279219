//! Individual structural metrics of the signature bundle.
//!
//! Every function here assumes the caller has already checked the
//! 3-node minimum; metrics with stricter preconditions (small-world)
//! return an [`Outcome`] and degrade on their own.

use std::collections::VecDeque;

use serde::Serialize;
use skein_algo::{ComponentResult, Outcome};
use skein_graph::Graph;

pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// A metric that may be unavailable for this graph: serialized either as
/// the metric record itself or as an `{"error": ...}` object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MetricBlock<T> {
    Ok(T),
    Error { error: String },
}

impl<T> From<Outcome<T>> for MetricBlock<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Computed(v) | Outcome::Fallback { value: v, .. } => Self::Ok(v),
            Outcome::Failed { reason } => Self::Error { error: reason },
        }
    }
}

// ─────────────────────────────────────────────
// Degree distribution
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DegreeDistribution {
    pub mean: f64,
    pub min: usize,
    pub max: usize,
    /// Third standardized moment of the undirected degree sequence.
    pub skewness: f64,
    pub interpretation: String,
    pub matched_patterns: Vec<&'static str>,
}

pub fn degree_distribution(graph: &Graph) -> DegreeDistribution {
    let degrees: Vec<f64> = (0..graph.node_count())
        .map(|i| graph.degree(i) as f64)
        .collect();
    let n = degrees.len() as f64;
    let mean = degrees.iter().sum::<f64>() / n;
    let variance = degrees.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let sd = variance.sqrt();
    let skewness = if sd > 0.0 {
        degrees.iter().map(|d| ((d - mean) / sd).powi(3)).sum::<f64>() / n
    } else {
        0.0
    };

    let (interpretation, matched_patterns) = if skewness > 1.5 {
        (
            "hub-dominated: a few nodes concentrate most connections",
            vec!["trafficking", "sexual_exploitation", "ponzi_fraud", "coercive_control"],
        )
    } else if skewness > 0.5 {
        (
            "moderately skewed toward hubs",
            vec!["corruption_patronage", "organized_crime"],
        )
    } else {
        (
            "roughly symmetric degree distribution",
            vec!["social_network_baseline", "intelligence_covert"],
        )
    };

    DegreeDistribution {
        mean: round4(mean),
        min: (0..graph.node_count()).map(|i| graph.degree(i)).min().unwrap_or(0),
        max: (0..graph.node_count()).map(|i| graph.degree(i)).max().unwrap_or(0),
        skewness: round4(skewness),
        interpretation: interpretation.to_string(),
        matched_patterns,
    }
}

// ─────────────────────────────────────────────
// Assortativity
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Assortativity {
    /// Newman's degree-assortativity coefficient (Pearson r over edge
    /// endpoint degrees, both orientations of every undirected edge).
    pub value: f64,
    pub interpretation: String,
}

pub fn assortativity(graph: &Graph) -> Assortativity {
    let mut xs: Vec<f64> = Vec::with_capacity(graph.undirected_edge_count() * 2);
    let mut ys: Vec<f64> = Vec::with_capacity(graph.undirected_edge_count() * 2);
    for &(u, v) in graph.undirected_edges() {
        let du = graph.degree(u) as f64;
        let dv = graph.degree(v) as f64;
        xs.push(du);
        ys.push(dv);
        xs.push(dv);
        ys.push(du);
    }

    let value = pearson(&xs, &ys).unwrap_or(0.0);
    let interpretation = if value < -0.1 {
        "disassortative: hubs attach to low-degree peripherals"
    } else if value < 0.1 {
        "neutral degree mixing"
    } else {
        "assortative: well-connected nodes interlink"
    };

    Assortativity {
        value: round4(value),
        interpretation: interpretation.to_string(),
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    if xs.len() < 2 {
        return None;
    }
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    let denom = (vx * vy).sqrt();
    if denom > 0.0 {
        Some(cov / denom)
    } else {
        None
    }
}

// ─────────────────────────────────────────────
// Transitivity
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Transitivity {
    /// Global clustering coefficient: closed triplets / all triplets.
    pub global: f64,
    /// Mean local clustering coefficient across all nodes.
    pub average_clustering: f64,
    pub interpretation: String,
}

pub fn transitivity(graph: &Graph) -> Transitivity {
    let n = graph.node_count();
    let mut triplets = 0.0_f64;
    let mut closed = 0.0_f64;
    let mut local_sum = 0.0_f64;

    for v in 0..n {
        let nbrs = graph.neighbors(v);
        let d = nbrs.len();
        if d < 2 {
            continue;
        }
        let possible = (d * (d - 1) / 2) as f64;
        let mut links = 0usize;
        for (a_pos, &a) in nbrs.iter().enumerate() {
            for &b in &nbrs[a_pos + 1..] {
                if graph.has_undirected_edge(a, b) {
                    links += 1;
                }
            }
        }
        triplets += possible;
        closed += links as f64;
        local_sum += links as f64 / possible;
    }

    let global = if triplets > 0.0 { closed / triplets } else { 0.0 };
    let average_clustering = if n > 0 { local_sum / n as f64 } else { 0.0 };

    let interpretation = if global < 0.15 {
        "low clustering: contacts rarely close into triangles"
    } else if global < 0.35 {
        "moderate clustering"
    } else {
        "high clustering: dense triangle structure"
    };

    Transitivity {
        global: round4(global),
        average_clustering: round4(average_clustering),
        interpretation: interpretation.to_string(),
    }
}

// ─────────────────────────────────────────────
// Small-world test
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SmallWorld {
    pub sigma: f64,
    pub avg_path_length: f64,
    pub clustering: f64,
    pub random_path_length: f64,
    pub random_clustering: f64,
    pub is_small_world: bool,
}

/// Compare observed clustering/path length against the Erdős–Rényi
/// expectation with the same size and density. Defined only for
/// connected graphs dense enough that `N·p > 1`.
pub fn small_world(
    graph: &Graph,
    components: &ComponentResult,
    avg_clustering: f64,
) -> Outcome<SmallWorld> {
    if !components.is_connected() {
        return Outcome::failed("graph is disconnected; average path length is undefined");
    }

    let n = graph.node_count() as f64;
    let e = graph.undirected_edge_count() as f64;
    let p = 2.0 * e / (n * (n - 1.0));
    if n * p <= 1.0 {
        return Outcome::failed("graph is too sparse for the random-graph comparison");
    }

    let avg_path_length = average_path_length(graph);
    let random_path_length = n.ln() / (n * p).ln();
    let random_clustering = p;

    if avg_path_length <= 0.0 || random_path_length <= 0.0 || random_clustering <= 0.0 {
        return Outcome::failed("degenerate path-length ratio in small-world test");
    }

    let sigma = (avg_clustering / random_clustering) / (avg_path_length / random_path_length);

    Outcome::Computed(SmallWorld {
        sigma: round4(sigma),
        avg_path_length: round4(avg_path_length),
        clustering: round4(avg_clustering),
        random_path_length: round4(random_path_length),
        random_clustering: round4(random_clustering),
        is_small_world: sigma > 1.0,
    })
}

/// Mean shortest-path length over ordered reachable pairs (BFS from
/// every node; the caller guarantees connectivity).
fn average_path_length(graph: &Graph) -> f64 {
    let n = graph.node_count();
    let mut total = 0u64;
    let mut pairs = 0u64;
    let mut dist = vec![-1_i64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        for d in dist.iter_mut() {
            *d = -1;
        }
        dist[s] = 0;
        queue.clear();
        queue.push_back(s);
        while let Some(v) = queue.pop_front() {
            for &w in graph.neighbors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    total += dist[w] as u64;
                    pairs += 1;
                    queue.push_back(w);
                }
            }
        }
    }

    if pairs == 0 {
        0.0
    } else {
        total as f64 / pairs as f64
    }
}

// ─────────────────────────────────────────────
// Centralization
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Centralization {
    /// Share of all degree held by the single most-connected node.
    pub degree_share: f64,
    /// Freeman degree centralization over normalized degree centralities.
    pub freeman: f64,
    pub interpretation: String,
    pub matched_patterns: Vec<&'static str>,
}

pub fn centralization(graph: &Graph) -> Centralization {
    let n = graph.node_count();
    let total_degree: usize = (0..n).map(|i| graph.degree(i)).sum();
    let max_degree = (0..n).map(|i| graph.degree(i)).max().unwrap_or(0);

    let degree_share = if total_degree > 0 {
        max_degree as f64 / total_degree as f64
    } else {
        0.0
    };

    let denom = (n - 1) as f64;
    let dc: Vec<f64> = (0..n).map(|i| graph.degree(i) as f64 / denom).collect();
    let max_dc = dc.iter().cloned().fold(0.0_f64, f64::max);
    let freeman = dc.iter().map(|c| max_dc - c).sum::<f64>() / (n - 2) as f64;

    let (interpretation, matched_patterns) = if freeman > 0.5 {
        (
            "extreme hub dominance",
            vec!["coercive_control", "ponzi_fraud", "trafficking"],
        )
    } else if freeman > 0.3 {
        (
            "high centralization",
            vec!["sexual_exploitation", "corruption_patronage"],
        )
    } else if freeman > 0.15 {
        ("moderate centralization", vec!["organized_crime"])
    } else {
        (
            "decentralized",
            vec!["intelligence_covert", "money_laundering", "social_network_baseline"],
        )
    };

    Centralization {
        degree_share: round4(degree_share),
        freeman: round4(freeman),
        interpretation: interpretation.to_string(),
        matched_patterns,
    }
}

// ─────────────────────────────────────────────
// Brokers
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Broker {
    pub entity: String,
    /// `betweenness / max(degree, 1) · N`: high when a node carries far
    /// more shortest-path traffic than its degree suggests.
    pub score: f64,
}

pub fn brokers(graph: &Graph, betweenness: &[f64]) -> Vec<Broker> {
    let n = graph.node_count();
    let mut scored: Vec<Broker> = (0..n)
        .map(|i| Broker {
            entity: graph.id(i).to_string(),
            score: round4(betweenness[i] / (graph.degree(i).max(1) as f64) * n as f64),
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entity.cmp(&b.entity))
    });
    scored.truncate(10);
    scored
}

// ─────────────────────────────────────────────
// Core–periphery
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CorePeriphery {
    pub max_coreness: u32,
    pub core_size: usize,
    pub periphery_size: usize,
    pub core_density: f64,
    pub periphery_density: f64,
    pub strong_core_periphery: bool,
}

pub fn core_periphery(graph: &Graph, coreness: &[u32]) -> CorePeriphery {
    let max_coreness = coreness.iter().copied().max().unwrap_or(0);
    let in_core: Vec<bool> = coreness.iter().map(|&c| c == max_coreness).collect();
    let core_size = in_core.iter().filter(|&&c| c).count();
    let periphery_size = coreness.len() - core_size;

    let core_density = induced_density(graph, &in_core, true);
    let periphery_density = induced_density(graph, &in_core, false);

    CorePeriphery {
        max_coreness,
        core_size,
        periphery_size,
        core_density: round4(core_density),
        periphery_density: round4(periphery_density),
        strong_core_periphery: core_density > 0.5 && periphery_density < 0.1,
    }
}

fn induced_density(graph: &Graph, in_core: &[bool], core: bool) -> f64 {
    let k = in_core.iter().filter(|&&c| c == core).count();
    if k < 2 {
        return 0.0;
    }
    let internal = graph
        .undirected_edges()
        .iter()
        .filter(|&&(u, v)| in_core[u] == core && in_core[v] == core)
        .count();
    internal as f64 / (k * (k - 1) / 2) as f64
}

// ─────────────────────────────────────────────
// Reciprocity
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Reciprocity {
    /// Fraction of directed edges whose reverse edge also exists.
    pub value: f64,
    /// Undirected-edge count over directed-edge count. Corpora that
    /// store every relation as a forward+reverse pair sit at 0.5 here
    /// while naive reciprocity saturates at 1.0.
    pub edge_symmetry: f64,
    pub true_asymmetry: f64,
    pub interpretation: String,
}

pub fn reciprocity(graph: &Graph) -> Reciprocity {
    let directed = graph.directed_edge_count();
    if directed == 0 {
        return Reciprocity {
            value: 0.0,
            edge_symmetry: 0.0,
            true_asymmetry: 0.0,
            interpretation: "no directed edges".to_string(),
        };
    }

    let mutual = graph
        .directed_edges()
        .iter()
        .filter(|&&(u, v)| graph.has_directed_edge(v, u))
        .count();
    let value = mutual as f64 / directed as f64;
    let edge_symmetry = graph.undirected_edge_count() as f64 / directed as f64;

    let interpretation = if value > 0.5 {
        "high reciprocity: mutual, co-offending ties"
    } else if value > 0.25 {
        "moderate reciprocity"
    } else {
        "low reciprocity: hierarchical flow"
    };

    Reciprocity {
        value: round4(value),
        edge_symmetry: round4(edge_symmetry),
        true_asymmetry: round4(1.0 - edge_symmetry),
        interpretation: interpretation.to_string(),
    }
}

// ─────────────────────────────────────────────
// Modularity summary
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ModularitySummary {
    pub value: f64,
    pub community_count: usize,
    pub interpretation: String,
}

pub fn modularity_summary(value: f64, community_count: usize) -> ModularitySummary {
    let interpretation = if value > 0.4 {
        "compartmentalized: strong cell structure"
    } else if value > 0.25 {
        "moderate community structure"
    } else {
        "weak community separation"
    };
    ModularitySummary {
        value: round4(value),
        community_count,
        interpretation: interpretation.to_string(),
    }
}
