//! End-to-end pipeline tests over small reference graphs.

use skein_graph::{Graph, Link, Node, NodeLinkDocument};
use skein_report::{analyze, AnalyzeOptions};

fn build(ids: &[&str], links: &[(&str, &str)]) -> Graph {
    let doc = NodeLinkDocument {
        nodes: ids.iter().map(|id| Node::new(*id)).collect(),
        links: links.iter().map(|(s, t)| Link::new(*s, *t)).collect(),
    };
    Graph::from_document(&doc).unwrap()
}

fn triangle() -> Graph {
    build(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")])
}

#[test]
fn triangle_report() {
    let report = analyze(&triangle(), &AnalyzeOptions::default());

    assert_eq!(report.meta.nodes, 3);
    assert_eq!(report.meta.edges, 3);
    for metrics in report.nodes.values() {
        assert!(metrics.betweenness.abs() < 1e-9);
        assert_eq!(metrics.coreness, 2);
        assert_eq!(metrics.community, 0);
    }

    let json = serde_json::to_value(&report).unwrap();
    let sig = &json["structural_signatures"];
    assert_eq!(sig["transitivity"]["global"], 1.0);
    assert_eq!(sig["transitivity"]["average_clustering"], 1.0);
}

#[test]
fn star_report() {
    let report = analyze(
        &build(
            &["hub", "l1", "l2", "l3", "l4"],
            &[("hub", "l1"), ("hub", "l2"), ("hub", "l3"), ("hub", "l4")],
        ),
        &AnalyzeOptions::default(),
    );

    let hub = &report.nodes["hub"];
    assert!((hub.betweenness - 1.0).abs() < 1e-9);
    for leaf in ["l1", "l2", "l3", "l4"] {
        let m = &report.nodes[leaf];
        assert!(m.betweenness.abs() < 1e-9);
        assert!((m.in_degree_centrality - 0.25).abs() < 1e-9);
    }
    assert_eq!(report.top_betweenness[0].entity, "hub");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["structural_signatures"]["centralization"]["freeman"],
        1.0
    );
}

#[test]
fn two_triangles_components() {
    let report = analyze(
        &build(
            &["a", "b", "c", "x", "y", "z"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("x", "y"), ("y", "z"), ("z", "x")],
        ),
        &AnalyzeOptions::default(),
    );
    assert_eq!(report.components.num_components, 2);
    assert_eq!(report.components.largest_size, 3);
    assert_eq!(report.components.connected, 2);
    assert_eq!(report.communities.len(), 2);
}

#[test]
fn pagerank_sums_to_one() {
    for graph in [
        build(&["a"], &[]),
        triangle(),
        build(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")],
        ),
    ] {
        let report = analyze(&graph, &AnalyzeOptions::default());
        let total: f64 = report.nodes.values().map(|m| m.pagerank).sum();
        assert!((total - 1.0).abs() < 1e-4, "sum = {total}");
    }
}

#[test]
fn centralities_stay_in_unit_range() {
    let report = analyze(
        &build(
            &["a", "b", "c", "d", "e", "f", "g"],
            &[
                ("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "f"), ("f", "g"),
                ("g", "a"), ("a", "d"), ("b", "f"),
            ],
        ),
        &AnalyzeOptions::default(),
    );
    for (id, m) in &report.nodes {
        for (label, value) in [
            ("betweenness", m.betweenness),
            ("pagerank", m.pagerank),
            ("eigenvector", m.eigenvector),
            ("in_degree_centrality", m.in_degree_centrality),
            ("out_degree_centrality", m.out_degree_centrality),
        ] {
            assert!((0.0..=1.0).contains(&value), "{id}.{label} = {value}");
        }
    }
}

#[test]
fn empty_graph_report_shape() {
    let report = analyze(&build(&[], &[]), &AnalyzeOptions::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["meta"]["nodes"], 0);
    assert!(json["nodes"].as_object().unwrap().is_empty());
    assert!(json["structural_signatures"]["error"].is_string());
}

#[test]
fn report_matches_output_contract() {
    let report = analyze(
        &build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a"), ("a", "c")],
        ),
        &AnalyzeOptions::default(),
    );
    let json = serde_json::to_value(&report).unwrap();

    for key in [
        "meta",
        "nodes",
        "communities",
        "components",
        "top_betweenness",
        "top_pagerank",
        "structural_signatures",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    let node = &json["nodes"]["a"];
    for key in [
        "betweenness",
        "pagerank",
        "eigenvector",
        "community",
        "in_degree_centrality",
        "out_degree_centrality",
        "coreness",
    ] {
        assert!(node.get(key).is_some(), "missing nodes.a.{key}");
    }
    let pm = &json["structural_signatures"]["pattern_match"];
    assert_eq!(pm["scores"].as_object().unwrap().len(), 10);
    assert!(pm["scores"]
        .as_object()
        .unwrap()
        .contains_key(pm["best_match"].as_str().unwrap()));
}

#[test]
fn runs_are_idempotent_except_timestamp() {
    let graph = build(
        &["a", "b", "c", "d", "e", "f"],
        &[
            ("a", "b"), ("b", "c"), ("c", "a"),
            ("d", "e"), ("e", "f"), ("f", "d"),
            ("c", "d"), ("b", "e"),
        ],
    );
    let mut first = serde_json::to_value(analyze(&graph, &AnalyzeOptions::default())).unwrap();
    let mut second = serde_json::to_value(analyze(&graph, &AnalyzeOptions::default())).unwrap();
    first["meta"]["generated"] = serde_json::Value::Null;
    second["meta"]["generated"] = serde_json::Value::Null;
    assert_eq!(first, second);
}

#[test]
fn parsed_document_round_trips_through_analysis() {
    let input = serde_json::json!({
        "nodes": [
            {"id": "epstein", "cluster": "core", "mention_count": 31363},
            {"id": "maxwell", "cluster": "core"},
            {"id": "staley", "cluster": "banking"},
            {"id": "bank", "cluster": "banking"},
        ],
        "links": [
            {"source": "epstein", "target": "maxwell"},
            {"source": "maxwell", "target": "epstein"},
            {"source": "epstein", "target": "staley"},
            {"source": "staley", "target": "bank"},
            {"source": "nobody", "target": "epstein"},
        ],
    });
    let doc: NodeLinkDocument = serde_json::from_value(input).unwrap();
    let graph = Graph::from_document(&doc).unwrap();
    assert_eq!(graph.dropped_links(), 1);

    let report = analyze(&graph, &AnalyzeOptions::default());
    assert_eq!(report.meta.nodes, 4);
    assert_eq!(report.meta.edges, 3);
    assert!(report.nodes.contains_key("epstein"));
    // epstein bridges maxwell and the banking chain
    assert!(report.nodes["epstein"].betweenness > report.nodes["maxwell"].betweenness);
}
