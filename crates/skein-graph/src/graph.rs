use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::error::GraphError;
use crate::model::{Node, NodeLinkDocument};

// ─────────────────────────────────────────────
// Graph
// ─────────────────────────────────────────────

/// Immutable adjacency structure over the node-link input.
///
/// Nodes get dense indices in input order (first occurrence of each id).
/// Three views are materialized at build time and never change:
/// directed out-neighbors, directed in-neighbors, and the undirected
/// neighbor set (an edge and its reverse collapse to one). Parallel
/// edges collapse; self-loops and links with unknown or missing
/// endpoints are dropped during the build, not later.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    out: Vec<Vec<usize>>,
    inc: Vec<Vec<usize>>,
    und: Vec<Vec<usize>>,
    directed_edges: Vec<(usize, usize)>,
    undirected_edges: Vec<(usize, usize)>,
    dropped_links: usize,
}

impl Graph {
    /// Build the graph from a parsed node-link document.
    ///
    /// Fatal only on structurally unusable input (a node with an empty
    /// id). Unresolvable links are counted and dropped.
    pub fn from_document(doc: &NodeLinkDocument) -> Result<Self, GraphError> {
        let mut nodes: Vec<Node> = Vec::with_capacity(doc.nodes.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(doc.nodes.len());

        for (pos, node) in doc.nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(GraphError::EmptyNodeId { index: pos });
            }
            match index.get(&node.id).copied() {
                // Duplicate declaration: keep the first position, let the
                // later attribute bag win.
                Some(i) => nodes[i] = node.clone(),
                None => {
                    index.insert(node.id.clone(), nodes.len());
                    nodes.push(node.clone());
                }
            }
        }

        let n = nodes.len();
        let mut directed: BTreeSet<(usize, usize)> = BTreeSet::new();
        let mut dropped = 0usize;

        for link in &doc.links {
            let (src, dst) = match (link.source.as_deref(), link.target.as_deref()) {
                (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => (s, t),
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            match (index.get(src), index.get(dst)) {
                (Some(&u), Some(&v)) if u != v => {
                    directed.insert((u, v));
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(dropped, "dropped links with missing or undeclared endpoints");
        }

        let mut undirected: BTreeSet<(usize, usize)> = BTreeSet::new();
        for &(u, v) in &directed {
            undirected.insert((u.min(v), u.max(v)));
        }

        let mut out: Vec<Vec<usize>> = vec![vec![]; n];
        let mut inc: Vec<Vec<usize>> = vec![vec![]; n];
        let mut und: Vec<Vec<usize>> = vec![vec![]; n];
        for &(u, v) in &directed {
            out[u].push(v);
            inc[v].push(u);
        }
        for &(u, v) in &undirected {
            und[u].push(v);
            und[v].push(u);
        }
        // BTreeSet iteration already yields sorted (u, v) pairs, so `out`
        // and `inc` come out sorted; `und` needs one pass.
        for nbrs in und.iter_mut() {
            nbrs.sort_unstable();
        }

        Ok(Self {
            nodes,
            index,
            out,
            inc,
            und,
            directed_edges: directed.into_iter().collect(),
            undirected_edges: undirected.into_iter().collect(),
            dropped_links: dropped,
        })
    }

    // ── Size ───────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed edges after deduplication.
    pub fn directed_edge_count(&self) -> usize {
        self.directed_edges.len()
    }

    /// Number of undirected edges (an edge and its reverse count once).
    pub fn undirected_edge_count(&self) -> usize {
        self.undirected_edges.len()
    }

    pub fn dropped_links(&self) -> usize {
        self.dropped_links
    }

    // ── Nodes ──────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn id(&self, i: usize) -> &str {
        &self.nodes[i].id
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    // ── Adjacency ──────────────────────────────────────

    pub fn out_neighbors(&self, i: usize) -> &[usize] {
        &self.out[i]
    }

    pub fn in_neighbors(&self, i: usize) -> &[usize] {
        &self.inc[i]
    }

    /// Undirected neighbor set, sorted ascending.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.und[i]
    }

    pub fn out_degree(&self, i: usize) -> usize {
        self.out[i].len()
    }

    pub fn in_degree(&self, i: usize) -> usize {
        self.inc[i].len()
    }

    /// Undirected degree.
    pub fn degree(&self, i: usize) -> usize {
        self.und[i].len()
    }

    pub fn has_directed_edge(&self, u: usize, v: usize) -> bool {
        self.out[u].binary_search(&v).is_ok()
    }

    pub fn has_undirected_edge(&self, u: usize, v: usize) -> bool {
        self.und[u].binary_search(&v).is_ok()
    }

    /// All directed edges as `(source, target)` index pairs, sorted.
    pub fn directed_edges(&self) -> &[(usize, usize)] {
        &self.directed_edges
    }

    /// All undirected edges as `(lo, hi)` index pairs, sorted.
    pub fn undirected_edges(&self) -> &[(usize, usize)] {
        &self.undirected_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, NodeLinkDocument};

    fn doc(ids: &[&str], links: &[(&str, &str)]) -> NodeLinkDocument {
        NodeLinkDocument {
            nodes: ids.iter().map(|id| Node::new(*id)).collect(),
            links: links.iter().map(|(s, t)| Link::new(*s, *t)).collect(),
        }
    }

    #[test]
    fn build_empty() {
        let g = Graph::from_document(&NodeLinkDocument::default()).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.directed_edge_count(), 0);
        assert_eq!(g.undirected_edge_count(), 0);
    }

    #[test]
    fn empty_node_id_is_fatal() {
        let d = NodeLinkDocument {
            nodes: vec![Node::new("a"), Node::new("")],
            links: vec![],
        };
        match Graph::from_document(&d) {
            Err(GraphError::EmptyNodeId { index }) => assert_eq!(index, 1),
            other => panic!("expected EmptyNodeId, got {other:?}"),
        }
    }

    #[test]
    fn reverse_edges_collapse_in_undirected_view() {
        let g = Graph::from_document(&doc(&["a", "b"], &[("a", "b"), ("b", "a")])).unwrap();
        assert_eq!(g.directed_edge_count(), 2);
        assert_eq!(g.undirected_edge_count(), 1);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.out_degree(0), 1);
        assert_eq!(g.in_degree(0), 1);
    }

    #[test]
    fn parallel_edges_collapse() {
        let g = Graph::from_document(&doc(&["a", "b"], &[("a", "b"), ("a", "b")])).unwrap();
        assert_eq!(g.directed_edge_count(), 1);
    }

    #[test]
    fn links_to_undeclared_nodes_are_dropped() {
        let g = Graph::from_document(&doc(&["a", "b"], &[("a", "b"), ("a", "ghost")])).unwrap();
        assert_eq!(g.directed_edge_count(), 1);
        assert_eq!(g.dropped_links(), 1);
    }

    #[test]
    fn self_loops_are_dropped() {
        let g = Graph::from_document(&doc(&["a", "b"], &[("a", "a"), ("a", "b")])).unwrap();
        assert_eq!(g.directed_edge_count(), 1);
        assert_eq!(g.dropped_links(), 1);
    }

    #[test]
    fn duplicate_node_keeps_first_position_last_attrs() {
        let mut first = Node::new("a");
        first.attrs.insert("name".into(), "old".into());
        let mut second = Node::new("a");
        second.attrs.insert("name".into(), "new".into());
        let d = NodeLinkDocument {
            nodes: vec![first, Node::new("b"), second],
            links: vec![],
        };
        let g = Graph::from_document(&d).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.index_of("a"), Some(0));
        assert_eq!(g.node(0).attrs["name"], "new");
    }

    #[test]
    fn adjacency_is_sorted_and_consistent() {
        let g = Graph::from_document(&doc(
            &["a", "b", "c"],
            &[("c", "a"), ("a", "b"), ("b", "c")],
        ))
        .unwrap();
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert!(g.has_directed_edge(0, 1));
        assert!(!g.has_directed_edge(1, 0));
        assert!(g.has_undirected_edge(1, 0));
    }
}
