//! K-core decomposition via Batagelj–Zaversnik peeling.

use skein_graph::Graph;

/// Coreness of every node on the undirected view.
///
/// Bucket-sorted peeling: nodes are processed in ascending current
/// degree; removing a node decrements its remaining neighbors and may
/// move them down a bucket. A node's coreness is the peeling threshold
/// in force when it is removed: monotonic nondecreasing over rounds and
/// never above the node's original degree. Runs in O(V + E).
pub fn core_numbers(graph: &Graph) -> Vec<u32> {
    let n = graph.node_count();
    if n == 0 {
        return vec![];
    }

    // `core` holds the current (remaining) degree during peeling and the
    // final coreness once a node has been processed.
    let mut core: Vec<usize> = (0..n).map(|i| graph.degree(i)).collect();
    let max_degree = core.iter().copied().max().unwrap_or(0);

    // Bucket sort nodes by degree: vert is the processing order, pos the
    // position of each node inside it, bin[d] the start of degree-d's
    // slice.
    let mut bin = vec![0usize; max_degree + 1];
    for &d in &core {
        bin[d] += 1;
    }
    let mut start = 0usize;
    for d in 0..=max_degree {
        let count = bin[d];
        bin[d] = start;
        start += count;
    }

    let mut pos = vec![0usize; n];
    let mut vert = vec![0usize; n];
    for v in 0..n {
        pos[v] = bin[core[v]];
        vert[pos[v]] = v;
        bin[core[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = vert[i];
        for &u in graph.neighbors(v) {
            if core[u] > core[v] {
                // Swap u with the first node of its degree bucket, then
                // shrink the bucket boundary and decrement its degree.
                let du = core[u];
                let pu = pos[u];
                let pw = bin[du];
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                }
                bin[du] += 1;
                core[u] -= 1;
            }
        }
    }

    core.into_iter().map(|c| c as u32).collect()
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
    fn empty_graph() {
        assert!(core_numbers(&graph(&[], &[])).is_empty());
    }

    #[test]
    fn complete_graph_coreness_is_n_minus_one() {
        let ids = ["a", "b", "c", "d"];
        let mut links = vec![];
        for i in 0..4 {
            for j in (i + 1)..4 {
                links.push((ids[i], ids[j]));
            }
        }
        for c in core_numbers(&graph(&ids, &links)) {
            assert_eq!(c, 3);
        }
    }

    #[test]
    fn coreness_never_exceeds_degree() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e")],
        );
        let cores = core_numbers(&g);
        for i in 0..g.node_count() {
            assert!(cores[i] as usize <= g.degree(i));
        }
    }

    #[test]
    fn triangle_with_tail() {
        // a-b-c triangle, d hangs off c, e hangs off d
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e")],
        );
        let cores = core_numbers(&g);
        assert_eq!(&cores[0..3], &[2, 2, 2]);
        assert_eq!(cores[3], 1);
        assert_eq!(cores[4], 1);
    }

    #[test]
    fn isolated_nodes_have_zero_coreness() {
        let cores = core_numbers(&graph(&["a", "b", "c"], &[("a", "b")]));
        assert_eq!(cores, vec![1, 1, 0]);
    }
}
