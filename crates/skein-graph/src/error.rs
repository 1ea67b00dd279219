use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node at position {index} has an empty id")]
    EmptyNodeId { index: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
