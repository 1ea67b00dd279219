use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────

/// An entity in the input graph.
///
/// Only `id` is interpreted. Every other field of the input object lands
/// in `attrs` and is carried through untouched; the engine never
/// branches on attribute content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier. Links reference nodes by this string.
    pub id: String,

    /// Arbitrary key→value attributes (name, cluster tag, mention count, …).
    #[serde(flatten)]
    pub attrs: serde_json::Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), attrs: serde_json::Map::new() }
    }
}

// ─────────────────────────────────────────────
// Link
// ─────────────────────────────────────────────

/// A documented connection between two entities.
///
/// `source`/`target` are optional at the parse layer: a link missing
/// either endpoint is dropped during graph construction, matching the
/// build-time invariant that every retained edge references declared
/// node ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub target: Option<String>,

    /// Opaque link attributes, passed through unmodified.
    #[serde(flatten)]
    pub attrs: serde_json::Map<String, Value>,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            attrs: serde_json::Map::new(),
        }
    }
}

// ─────────────────────────────────────────────
// NodeLinkDocument
// ─────────────────────────────────────────────

/// The node-link JSON input document: `{"nodes": [...], "links": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_attrs_are_preserved() {
        let json = r#"{"id": "maxwell", "name": "G. Maxwell", "cluster": "core", "mention_count": 15306}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, "maxwell");
        assert_eq!(node.attrs["cluster"], "core");
        assert_eq!(node.attrs["mention_count"], 15306);
    }

    #[test]
    fn node_without_id_fails_to_parse() {
        let json = r#"{"name": "nobody"}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn link_endpoints_are_optional_at_parse_time() {
        let json = r#"{"target": "epstein", "kind": "payment"}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert!(link.source.is_none());
        assert_eq!(link.target.as_deref(), Some("epstein"));
        assert_eq!(link.attrs["kind"], "payment");
    }

    #[test]
    fn document_defaults_to_empty() {
        let doc: NodeLinkDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.links.is_empty());
    }
}
