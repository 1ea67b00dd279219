//! # skein-graph
//!
//! Graph model for the skein analysis engine.
//!
//! Provides the node-link input document and the immutable adjacency
//! structure every downstream algorithm reads:
//! - [`model::Node`]: entity with an opaque attribute bag
//! - [`model::NodeLinkDocument`]: the `{nodes, links}` input format
//! - [`graph::Graph`]: directed + undirected adjacency, built once

pub mod error;
pub mod graph;
pub mod model;

pub use error::GraphError;
pub use graph::Graph;
pub use model::{Link, Node, NodeLinkDocument};
