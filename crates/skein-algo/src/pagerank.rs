//! PageRank via power iteration.

use skein_graph::Graph;
use tracing::debug;

use crate::outcome::Outcome;

#[derive(Debug, Clone)]
pub struct PageRankConfig {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

/// PageRank on the directed graph.
///
/// Scores sum to 1.0. Convergence is measured by the L1 norm of the
/// score-delta vector falling below the threshold. Dangling nodes (zero
/// out-degree) redistribute their rank mass uniformly across all nodes
/// each iteration. Non-convergence degrades to the uniform distribution
/// `1/n`.
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> Outcome<Vec<f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Outcome::Computed(vec![]);
    }

    let d = config.damping_factor;
    let base = (1.0 - d) / n as f64;
    let uniform = 1.0 / n as f64;

    let mut scores = vec![uniform; n];
    let mut new_scores = vec![0.0_f64; n];

    for iteration in 0..config.max_iterations {
        for s in new_scores.iter_mut() {
            *s = base;
        }

        // Distribute rank along out-edges; dangling mass spreads evenly.
        let mut dangling_mass = 0.0_f64;
        for u in 0..n {
            let out_deg = graph.out_degree(u);
            if out_deg == 0 {
                dangling_mass += scores[u];
            } else {
                let share = d * scores[u] / out_deg as f64;
                for &v in graph.out_neighbors(u) {
                    new_scores[v] += share;
                }
            }
        }
        let dangling_share = d * dangling_mass / n as f64;
        for s in new_scores.iter_mut() {
            *s += dangling_share;
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if diff < config.convergence_threshold {
            debug!(iterations = iteration + 1, "pagerank converged");
            return Outcome::Computed(scores);
        }
    }

    Outcome::fallback(
        vec![uniform; n],
        format!(
            "power iteration did not converge within {} iterations; using uniform distribution",
            config.max_iterations
        ),
    )
}
