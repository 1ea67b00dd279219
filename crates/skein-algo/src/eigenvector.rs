//! Eigenvector centrality via power iteration.

use skein_graph::Graph;
use tracing::debug;

use crate::outcome::Outcome;

#[derive(Debug, Clone)]
pub struct EigenvectorConfig {
    pub max_iterations: usize,
    pub convergence_threshold: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            convergence_threshold: 1e-6,
        }
    }
}

/// Eigenvector centrality on the undirected view.
///
/// Power iteration on `x' = x + A·x` (the `+ x` term keeps bipartite
/// graphs from oscillating), L2-normalized every step; converged when
/// the L1 change drops below `n · threshold`. Non-convergence degrades
/// to normalized degree centrality `deg/(n-1)`.
pub fn eigenvector(graph: &Graph, config: &EigenvectorConfig) -> Outcome<Vec<f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Outcome::Computed(vec![]);
    }

    let mut x = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];

    for iteration in 0..config.max_iterations {
        for i in 0..n {
            next[i] = x[i];
        }
        for u in 0..n {
            for &v in graph.neighbors(u) {
                next[v] += x[u];
            }
        }

        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in next.iter_mut() {
                *v /= norm;
            }
        }

        let diff: f64 = x.iter().zip(next.iter()).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut x, &mut next);

        if diff < n as f64 * config.convergence_threshold {
            debug!(iterations = iteration + 1, "eigenvector centrality converged");
            return Outcome::Computed(x);
        }
    }

    let degree_fallback = degree_substitute(graph);
    Outcome::fallback(
        degree_fallback,
        format!(
            "power iteration did not converge within {} iterations; using degree centrality",
            config.max_iterations
        ),
    )
}

fn degree_substitute(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    (0..n).map(|i| graph.degree(i) as f64 / denom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_graph::{Link, Node, NodeLinkDocument};

    fn graph(ids: &[&str], links: &[(&str, &str)]) -> Graph {
        let doc = NodeLinkDocument {
            nodes: ids.iter().map(|id| Node::new(*id)).collect(),
            links: links.iter().map(|(s, t)| Link::new(*s, *t)).collect(),
        };
        Graph::from_document(&doc).unwrap()
    }

    #[test]
    fn empty_graph_is_empty_map() {
        let out = eigenvector(&graph(&[], &[]), &EigenvectorConfig::default());
        assert_eq!(out, Outcome::Computed(vec![]));
    }

    #[test]
    fn complete_graph_is_symmetric() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let scores = eigenvector(&g, &EigenvectorConfig::default()).into_value().unwrap();
        let expected = 1.0 / 3.0_f64.sqrt();
        for s in &scores {
            assert!((s - expected).abs() < 1e-4, "score = {s}");
        }
    }

    #[test]
    fn star_center_dominates() {
        let g = graph(
            &["c", "l1", "l2", "l3"],
            &[("c", "l1"), ("c", "l2"), ("c", "l3")],
        );
        let scores = eigenvector(&g, &EigenvectorConfig::default()).into_value().unwrap();
        for leaf in 1..4 {
            assert!(scores[0] > scores[leaf]);
        }
    }

    #[test]
    fn values_stay_in_unit_range() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "a"), ("a", "c")],
        );
        for s in eigenvector(&g, &EigenvectorConfig::default()).into_value().unwrap() {
            assert!((0.0..=1.0).contains(&s), "out of range: {s}");
        }
    }

    #[test]
    fn non_convergence_falls_back_to_degree() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let config = EigenvectorConfig { max_iterations: 0, ..Default::default() };
        let out = eigenvector(&g, &config);
        assert!(out.is_fallback());
        let scores = out.into_value().unwrap();
        assert!((scores[0] - 0.5).abs() < 1e-12);
        assert!((scores[1] - 1.0).abs() < 1e-12);
        assert!((scores[2] - 0.5).abs() < 1e-12);
    }
}
