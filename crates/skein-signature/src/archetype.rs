//! Composite archetype scoring.
//!
//! Each archetype is a weighted sum of linear gradient terms over the
//! structural metrics. The term tables below are the normative constants
//! of this engine: weights sum to 1.0 per archetype and every score is
//! clamped to [0, 1].

use std::collections::BTreeMap;

use serde::Serialize;

/// Raw metric values feeding the gradient terms. A metric that could not
/// be computed for this graph enters as 0.0 (e.g. small-world σ on a
/// disconnected graph), which scores as "no evidence" rather than
/// poisoning the composite.
#[derive(Debug, Clone, Default)]
pub struct MetricInputs {
    pub degree_skewness: f64,
    pub assortativity: f64,
    pub transitivity: f64,
    pub avg_clustering: f64,
    pub small_world_sigma: f64,
    pub degree_share: f64,
    pub freeman_centralization: f64,
    pub modularity: f64,
    pub true_asymmetry: f64,
    pub core_density: f64,
    pub periphery_density: f64,
    pub max_betweenness: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum MetricKey {
    DegreeSkewness,
    Assortativity,
    Transitivity,
    AvgClustering,
    SmallWorldSigma,
    DegreeShare,
    FreemanCentralization,
    Modularity,
    TrueAsymmetry,
    CoreDensity,
    PeripheryDensity,
    MaxBetweenness,
}

impl MetricInputs {
    fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::DegreeSkewness => self.degree_skewness,
            MetricKey::Assortativity => self.assortativity,
            MetricKey::Transitivity => self.transitivity,
            MetricKey::AvgClustering => self.avg_clustering,
            MetricKey::SmallWorldSigma => self.small_world_sigma,
            MetricKey::DegreeShare => self.degree_share,
            MetricKey::FreemanCentralization => self.freeman_centralization,
            MetricKey::Modularity => self.modularity,
            MetricKey::TrueAsymmetry => self.true_asymmetry,
            MetricKey::CoreDensity => self.core_density,
            MetricKey::PeripheryDensity => self.periphery_density,
            MetricKey::MaxBetweenness => self.max_betweenness,
        }
    }
}

/// Linear gradient: 0 at `lo`, 1 at `hi`, clamped; inverted terms reward
/// the metric being low.
pub fn grad(val: f64, lo: f64, hi: f64, invert: bool) -> f64 {
    let score = ((val - lo) / (hi - lo)).clamp(0.0, 1.0);
    if invert {
        1.0 - score
    } else {
        score
    }
}

#[derive(Debug, Clone, Copy)]
struct Term {
    metric: MetricKey,
    lo: f64,
    hi: f64,
    invert: bool,
    weight: f64,
}

const fn term(metric: MetricKey, lo: f64, hi: f64, invert: bool, weight: f64) -> Term {
    Term { metric, lo, hi, invert, weight }
}

struct Archetype {
    name: &'static str,
    terms: &'static [Term],
}

use MetricKey::*;

/// The ten reference patterns, in the fixed canonical order.
pub const ARCHETYPE_NAMES: [&str; 10] = [
    "trafficking",
    "money_laundering",
    "intelligence_covert",
    "corruption_patronage",
    "coercive_control",
    "sexual_exploitation",
    "ponzi_fraud",
    "organized_crime",
    "regulatory_capture",
    "social_network_baseline",
];

static ARCHETYPES: [Archetype; 10] = [
    // Recruitment pyramid: dominant hubs, sparse triangles, one-way flow
    // into a cohesive operator core.
    Archetype {
        name: "trafficking",
        terms: &[
            term(FreemanCentralization, 0.15, 0.6, false, 0.30),
            term(DegreeSkewness, 0.5, 3.0, false, 0.25),
            term(Transitivity, 0.05, 0.4, true, 0.20),
            term(TrueAsymmetry, 0.05, 0.4, true, 0.10),
            term(CoreDensity, 0.2, 0.8, false, 0.15),
        ],
    },
    // Layering chains: long low-clustering paths, no single hub,
    // compartmentalized hops between shells.
    Archetype {
        name: "money_laundering",
        terms: &[
            term(Transitivity, 0.05, 0.3, true, 0.30),
            term(Assortativity, -0.5, 0.1, true, 0.25),
            term(FreemanCentralization, 0.1, 0.5, true, 0.20),
            term(Modularity, 0.2, 0.6, false, 0.25),
        ],
    },
    // Cell structure: strong compartments, deliberately flat and sparse.
    Archetype {
        name: "intelligence_covert",
        terms: &[
            term(Modularity, 0.25, 0.7, false, 0.35),
            term(FreemanCentralization, 0.1, 0.5, true, 0.25),
            term(AvgClustering, 0.05, 0.35, true, 0.20),
            term(TrueAsymmetry, 0.05, 0.35, true, 0.20),
        ],
    },
    // Patron hubs with a dense elite core and exchanged favors.
    Archetype {
        name: "corruption_patronage",
        terms: &[
            term(DegreeShare, 0.1, 0.5, false, 0.30),
            term(CoreDensity, 0.3, 0.9, false, 0.25),
            term(DegreeSkewness, 0.5, 2.5, false, 0.25),
            term(TrueAsymmetry, 0.1, 0.4, false, 0.20),
        ],
    },
    // One dominating node, victims isolated from each other.
    Archetype {
        name: "coercive_control",
        terms: &[
            term(FreemanCentralization, 0.3, 0.9, false, 0.35),
            term(Transitivity, 0.02, 0.25, true, 0.25),
            term(DegreeShare, 0.2, 0.6, false, 0.25),
            term(Modularity, 0.1, 0.4, true, 0.15),
        ],
    },
    // Hub plus recruiter layer over a thin periphery.
    Archetype {
        name: "sexual_exploitation",
        terms: &[
            term(DegreeSkewness, 1.0, 4.0, false, 0.30),
            term(CoreDensity, 0.3, 0.8, false, 0.25),
            term(PeripheryDensity, 0.01, 0.15, true, 0.25),
            term(FreemanCentralization, 0.2, 0.6, false, 0.20),
        ],
    },
    // Star from operator to investors: no triangles, no return edges.
    Archetype {
        name: "ponzi_fraud",
        terms: &[
            term(DegreeShare, 0.3, 0.8, false, 0.35),
            term(Transitivity, 0.01, 0.15, true, 0.30),
            term(DegreeSkewness, 1.5, 5.0, false, 0.20),
            term(TrueAsymmetry, 0.02, 0.3, true, 0.15),
        ],
    },
    // Cohesive co-offending core with mutual ties.
    Archetype {
        name: "organized_crime",
        terms: &[
            term(Transitivity, 0.15, 0.5, false, 0.30),
            term(CoreDensity, 0.4, 0.9, false, 0.25),
            term(Modularity, 0.2, 0.5, false, 0.20),
            term(TrueAsymmetry, 0.15, 0.45, false, 0.25),
        ],
    },
    // Brokers bridging two dense camps.
    Archetype {
        name: "regulatory_capture",
        terms: &[
            term(MaxBetweenness, 0.1, 0.6, false, 0.30),
            term(Modularity, 0.2, 0.5, false, 0.30),
            term(Assortativity, -0.1, 0.3, false, 0.20),
            term(Transitivity, 0.1, 0.4, false, 0.20),
        ],
    },
    // Ordinary social topology: small-world, clustered, flat.
    Archetype {
        name: "social_network_baseline",
        terms: &[
            term(SmallWorldSigma, 1.0, 3.0, false, 0.30),
            term(AvgClustering, 0.1, 0.5, false, 0.25),
            term(Assortativity, -0.1, 0.3, false, 0.20),
            term(FreemanCentralization, 0.1, 0.5, true, 0.25),
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct PatternMatch {
    /// archetype name → score in [0, 1], rounded to 2 decimals.
    pub scores: BTreeMap<String, f64>,
    pub best_match: String,
    pub best_score: f64,
}

/// Score the graph's metric profile against every archetype.
///
/// Ties on the best score go to the lexicographically smallest archetype
/// name; the scores map is a `BTreeMap`, so ascending-name iteration is
/// the tie-break.
pub fn score_archetypes(inputs: &MetricInputs) -> PatternMatch {
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();
    for archetype in &ARCHETYPES {
        let raw: f64 = archetype
            .terms
            .iter()
            .map(|t| t.weight * grad(inputs.get(t.metric), t.lo, t.hi, t.invert))
            .sum();
        let score = (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0;
        scores.insert(archetype.name.to_string(), score);
    }

    let (best_match, best_score) = scores
        .iter()
        .fold(None::<(&str, f64)>, |best, (name, &score)| match best {
            Some((_, s)) if score <= s => best,
            _ => Some((name.as_str(), score)),
        })
        .map(|(name, score)| (name.to_string(), score))
        .unwrap_or_default();

    PatternMatch { scores, best_match, best_score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grad_is_clamped_linear() {
        assert_eq!(grad(0.0, 0.2, 0.6, false), 0.0);
        assert_eq!(grad(0.6, 0.2, 0.6, false), 1.0);
        assert_eq!(grad(0.8, 0.2, 0.6, false), 1.0);
        assert!((grad(0.4, 0.2, 0.6, false) - 0.5).abs() < 1e-12);
        assert!((grad(0.4, 0.2, 0.6, true) - 0.5).abs() < 1e-12);
        assert_eq!(grad(0.0, 0.2, 0.6, true), 1.0);
    }

    #[test]
    fn weights_sum_to_one_per_archetype() {
        for archetype in &ARCHETYPES {
            let total: f64 = archetype.terms.iter().map(|t| t.weight).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "{}: weights sum to {total}",
                archetype.name
            );
            assert!((4..=5).contains(&archetype.terms.len()), "{}", archetype.name);
        }
    }

    #[test]
    fn scores_cover_all_archetypes_in_range() {
        let inputs = MetricInputs {
            degree_skewness: 2.0,
            transitivity: 0.1,
            freeman_centralization: 0.5,
            degree_share: 0.4,
            core_density: 0.6,
            ..Default::default()
        };
        let pm = score_archetypes(&inputs);
        assert_eq!(pm.scores.len(), 10);
        for name in ARCHETYPE_NAMES {
            let score = pm.scores[name];
            assert!((0.0..=1.0).contains(&score), "{name} = {score}");
        }
        assert!(ARCHETYPE_NAMES.contains(&pm.best_match.as_str()));
        assert_eq!(pm.best_score, pm.scores[&pm.best_match]);
    }

    #[test]
    fn hub_dominated_profile_prefers_coercive_shapes() {
        let inputs = MetricInputs {
            degree_skewness: 3.5,
            transitivity: 0.0,
            avg_clustering: 0.0,
            freeman_centralization: 0.95,
            degree_share: 0.7,
            modularity: 0.05,
            ..Default::default()
        };
        let pm = score_archetypes(&inputs);
        assert!(
            pm.best_match == "coercive_control" || pm.best_match == "ponzi_fraud",
            "best = {} ({:?})",
            pm.best_match,
            pm.scores
        );
    }

    #[test]
    fn zero_profile_ties_break_lexicographically() {
        // All-zero inputs: inverted terms still fire, but whatever the
        // leaders are, equal scores must resolve to the smallest name.
        let pm = score_archetypes(&MetricInputs::default());
        let max = pm.scores.values().cloned().fold(0.0_f64, f64::max);
        let expected = pm
            .scores
            .iter()
            .find(|(_, &s)| s == max)
            .map(|(n, _)| n.clone())
            .unwrap();
        assert_eq!(pm.best_match, expected);
    }
}
