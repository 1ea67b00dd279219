//! Directed triad census over the 16 standard isomorphism classes.

use skein_graph::Graph;

/// The 16 triad types in MAN (mutual/asymmetric/null dyad) order.
pub const TRIAD_TYPES: [&str; 16] = [
    "003", "012", "102", "021D", "021U", "021C", "111D", "111U", "030T", "030C", "201", "120D",
    "120U", "120C", "210", "300",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriadCensus {
    /// Counts indexed like [`TRIAD_TYPES`].
    pub counts: [u64; 16],
}

impl TriadCensus {
    pub fn count(&self, triad_type: &str) -> u64 {
        TRIAD_TYPES
            .iter()
            .position(|&t| t == triad_type)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dyad {
    Null,
    /// Single arc, stored as (source, target) in global node indices.
    Asymmetric(usize, usize),
    Mutual,
}

fn dyad(graph: &Graph, u: usize, v: usize) -> Dyad {
    match (graph.has_directed_edge(u, v), graph.has_directed_edge(v, u)) {
        (true, true) => Dyad::Mutual,
        (true, false) => Dyad::Asymmetric(u, v),
        (false, true) => Dyad::Asymmetric(v, u),
        (false, false) => Dyad::Null,
    }
}

/// Classify every node triple by its dyad pattern.
///
/// Enumerates all C(n, 3) unordered triples; each is classified once by
/// counting mutual/asymmetric/null dyads and resolving the directional
/// subtypes from arc endpoints. O(n³) with O(1) edge lookups, which is
/// fine at the entity-graph sizes this engine targets.
pub fn triad_census(graph: &Graph) -> TriadCensus {
    let n = graph.node_count();
    let mut census = TriadCensus::default();

    for a in 0..n {
        for b in (a + 1)..n {
            let dab = dyad(graph, a, b);
            for c in (b + 1)..n {
                let idx = classify(a, b, c, dab, dyad(graph, a, c), dyad(graph, b, c));
                census.counts[idx] += 1;
            }
        }
    }

    census
}

/// Index into [`TRIAD_TYPES`] for the triple `(a, b, c)` with dyads
/// `dab = (a,b)`, `dac = (a,c)`, `dbc = (b,c)`.
fn classify(a: usize, b: usize, c: usize, dab: Dyad, dac: Dyad, dbc: Dyad) -> usize {
    let dyads = [dab, dac, dbc];
    let mutuals = dyads.iter().filter(|d| matches!(d, Dyad::Mutual)).count();
    let nulls = dyads.iter().filter(|d| matches!(d, Dyad::Null)).count();
    let arcs: Vec<(usize, usize)> = dyads
        .iter()
        .filter_map(|d| match d {
            Dyad::Asymmetric(s, t) => Some((*s, *t)),
            _ => None,
        })
        .collect();

    // The mutual dyad's endpoints, when exactly one exists.
    let mutual_pair = || -> [usize; 2] {
        match (dab, dac, dbc) {
            (Dyad::Mutual, _, _) => [a, b],
            (_, Dyad::Mutual, _) => [a, c],
            _ => [b, c],
        }
    };

    match (mutuals, arcs.len(), nulls) {
        (0, 0, 3) => 0, // 003
        (0, 1, 2) => 1, // 012
        (1, 0, 2) => 2, // 102
        (0, 2, 1) => {
            if arcs[0].0 == arcs[1].0 {
                3 // 021D: both arcs out of one source
            } else if arcs[0].1 == arcs[1].1 {
                4 // 021U: both arcs into one target
            } else {
                5 // 021C: chain
            }
        }
        (1, 1, 1) => {
            // The lone arc joins the third node to one member of the
            // mutual pair: entering the pair is 111D, leaving it 111U.
            let pair = mutual_pair();
            if pair.contains(&arcs[0].1) {
                6 // 111D
            } else {
                7 // 111U
            }
        }
        (0, 3, 0) => {
            // Cycle iff every node has exactly one outgoing arc.
            let nodes = [a, b, c];
            let cyclic = nodes
                .iter()
                .all(|&v| arcs.iter().filter(|&&(s, _)| s == v).count() == 1);
            if cyclic {
                9 // 030C
            } else {
                8 // 030T
            }
        }
        (1, 2, 0) => {
            let pair = mutual_pair();
            let from_outside = arcs.iter().filter(|&&(s, _)| !pair.contains(&s)).count();
            match from_outside {
                2 => 11, // 120D: third node feeds both pair members
                0 => 12, // 120U: both pair members feed the third node
                _ => 13, // 120C: chain through the third node
            }
        }
        (2, 0, 1) => 10, // 201
        (2, 1, 0) => 14, // 210
        (3, 0, 0) => 15, // 300
        _ => unreachable!("dyad counts always sum to 3"),
    }
}
