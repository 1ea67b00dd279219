//! Community detection: Clauset–Newman–Moore greedy modularity.

use std::collections::BTreeMap;

use skein_graph::Graph;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CommunityResult {
    /// Disjoint member sets (node indices, sorted), ordered by size
    /// descending, then by smallest member.
    pub communities: Vec<Vec<usize>>,
    /// node index → position in `communities`.
    pub assignment: Vec<usize>,
    /// Modularity Q of the final partition.
    pub modularity: f64,
}

/// Greedy modularity maximization over the undirected view.
///
/// Every node starts as its own community. Each step merges the adjacent
/// community pair with the largest positive gain
/// `ΔQ = e_ij/m − 2·a_i·a_j` (with `e_ij` the raw edge count between the
/// pair and `a_i = deg_i/2m`), repeating until no positive-gain merge
/// remains. Equal-gain ties go to the smallest `(i, j)` community-id
/// pair, ids being dense indices in node input order. The candidate map
/// is a `BTreeMap`, so ascending-pair iteration is the tie-break.
pub fn detect_communities(graph: &Graph) -> CommunityResult {
    let n = graph.node_count();
    if n == 0 {
        return CommunityResult::default();
    }

    let m = graph.undirected_edge_count() as f64;

    // Community state, keyed by initial node index. `None` = absorbed.
    let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();
    let mut deg_sum: Vec<f64> = (0..n).map(|i| graph.degree(i) as f64).collect();

    // Raw edge counts between adjacent community pairs, canonical lo < hi.
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for &(u, v) in graph.undirected_edges() {
        *between.entry((u, v)).or_insert(0.0) += 1.0;
    }

    let mut merges = 0usize;
    while m > 0.0 {
        let mut best: Option<((usize, usize), f64)> = None;
        for (&pair, &e_ij) in &between {
            let (i, j) = pair;
            let gain = e_ij / m - deg_sum[i] * deg_sum[j] / (2.0 * m * m);
            match best {
                Some((_, g)) if gain <= g => {}
                _ => best = Some((pair, gain)),
            }
        }

        let Some(((i, j), gain)) = best else { break };
        if gain <= 0.0 {
            break;
        }

        // Merge j into i
        let absorbed = members[j].take().expect("absorbed community re-merged");
        members[i]
            .as_mut()
            .expect("merge target already absorbed")
            .extend(absorbed);
        deg_sum[i] += deg_sum[j];
        merges += 1;

        let stale: Vec<(usize, usize)> = between
            .keys()
            .filter(|&&(a, b)| a == j || b == j)
            .copied()
            .collect();
        for key in stale {
            let count = between.remove(&key).unwrap_or(0.0);
            let other = if key.0 == j { key.1 } else { key.0 };
            if other == i {
                continue; // now internal to the merged community
            }
            *between.entry((other.min(i), other.max(i))).or_insert(0.0) += count;
        }
    }

    // Collect surviving communities: size descending, then smallest member.
    let mut communities: Vec<Vec<usize>> = members.into_iter().flatten().collect();
    for c in communities.iter_mut() {
        c.sort_unstable();
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));

    let mut assignment = vec![0usize; n];
    for (pos, community) in communities.iter().enumerate() {
        for &node in community {
            assignment[node] = pos;
        }
    }

    let q = modularity(graph, &assignment);
    debug!(
        communities = communities.len(),
        merges,
        modularity = q,
        "greedy modularity finished"
    );

    CommunityResult {
        communities,
        assignment,
        modularity: q,
    }
}

/// Modularity `Q = Σ_c (e_c/m − (deg_c/2m)²)` of a partition given as a
/// node → community assignment. Zero for edgeless graphs.
pub fn modularity(graph: &Graph, assignment: &[usize]) -> f64 {
    let m = graph.undirected_edge_count() as f64;
    if m == 0.0 || assignment.is_empty() {
        return 0.0;
    }

    let communities = assignment.iter().copied().max().unwrap_or(0) + 1;
    let mut internal = vec![0.0_f64; communities];
    let mut deg = vec![0.0_f64; communities];

    for &(u, v) in graph.undirected_edges() {
        if assignment[u] == assignment[v] {
            internal[assignment[u]] += 1.0;
        }
    }
    for (node, &c) in assignment.iter().enumerate() {
        deg[c] += graph.degree(node) as f64;
    }

    (0..communities)
        .map(|c| {
            let a = deg[c] / (2.0 * m);
            internal[c] / m - a * a
        })
        .sum()
}
