//! Connected components via Union-Find.

use std::collections::HashMap;

use skein_graph::Graph;

#[derive(Debug, Clone, Default)]
pub struct ComponentResult {
    /// node index → component id, dense in order of first appearance.
    pub assignment: Vec<usize>,
    pub component_count: usize,
    pub largest_size: usize,
    /// size of each component, indexed by component id.
    pub sizes: Vec<usize>,
}

impl ComponentResult {
    pub fn is_connected(&self) -> bool {
        self.component_count == 1
    }
}

// ── Union-Find ──────────────────────────────────────────────────────────────

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // path compression
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

/// Partition the undirected view into maximal connected subgraphs.
pub fn connected_components(graph: &Graph) -> ComponentResult {
    let n = graph.node_count();
    if n == 0 {
        return ComponentResult::default();
    }

    let mut uf = UnionFind::new(n);
    for &(u, v) in graph.undirected_edges() {
        uf.union(u, v);
    }

    let mut comp_map: HashMap<usize, usize> = HashMap::new();
    let mut sizes: Vec<usize> = Vec::new();
    let assignment: Vec<usize> = (0..n)
        .map(|i| {
            let root = uf.find(i);
            let comp_id = *comp_map.entry(root).or_insert_with(|| {
                sizes.push(0);
                sizes.len() - 1
            });
            sizes[comp_id] += 1;
            comp_id
        })
        .collect();

    let largest = sizes.iter().copied().max().unwrap_or(0);

    ComponentResult {
        assignment,
        component_count: sizes.len(),
        largest_size: largest,
        sizes,
    }
}
