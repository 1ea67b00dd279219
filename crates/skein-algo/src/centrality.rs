//! Centrality: Betweenness (Brandes) and degree centrality.

use std::collections::VecDeque;

use skein_graph::Graph;

/// Betweenness centrality via Brandes' algorithm on the undirected view.
///
/// BFS from every source accumulates shortest-path counts, then a
/// back-propagation pass over each BFS DAG accumulates pair
/// dependencies. Scores are normalized by `1/((n-1)(n-2))` for n ≥ 3;
/// each unordered pair is accumulated from both endpoints, so this
/// equals the conventional `2/((n-1)(n-2))` on pair counts. Graphs with
/// fewer than three nodes have no intermediate vertices and score 0.0
/// everywhere.
pub fn betweenness(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let mut bc = vec![0.0_f64; n];
    if n < 3 {
        return bc;
    }

    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![vec![]; n];
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut queue: VecDeque<usize> = VecDeque::new();

    for s in 0..n {
        // Reset per-source state
        for i in 0..n {
            sigma[i] = 0.0;
            dist[i] = -1;
            delta[i] = 0.0;
            predecessors[i].clear();
        }
        stack.clear();
        queue.clear();

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in graph.neighbors(v) {
                if dist[w] < 0 {
                    queue.push_back(w);
                    dist[w] = dist[v] + 1;
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Back-propagation of pair dependencies
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    for b in bc.iter_mut() {
        *b *= scale;
    }
    bc
}

/// In- and out-degree centrality: `deg / (n-1)`, zero for n ≤ 1.
pub fn degree_centrality(graph: &Graph) -> (Vec<f64>, Vec<f64>) {
    let n = graph.node_count();
    if n <= 1 {
        return (vec![0.0; n], vec![0.0; n]);
    }
    let denom = (n - 1) as f64;
    let in_dc = (0..n).map(|i| graph.in_degree(i) as f64 / denom).collect();
    let out_dc = (0..n).map(|i| graph.out_degree(i) as f64 / denom).collect();
    (in_dc, out_dc)
}
