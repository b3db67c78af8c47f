use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Why the store refused a mutation. The graph is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("Connecting '{source_id}' to '{target_id}' would create a cycle")]
    CycleDetected { source_id: NodeId, target_id: NodeId },

    #[error("A connection from '{source_id}' to '{target_id}' already exists")]
    DuplicateEdge { source_id: NodeId, target_id: NodeId },

    #[error("Node '{target_id}' already has {limit} inputs (maximum)")]
    InputLimitExceeded { target_id: NodeId, limit: usize },

    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid flow snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

/// Errors raised while reading or writing a flow snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Failed to parse flow JSON: {0}")]
    Json(String),

    #[error("Malformed flow snapshot: {0}")]
    InvalidShape(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err.to_string())
    }
}

/// Errors raised while loading a store configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to parse store config: {0}")]
    Json(String),

    #[error("Invalid store config: {0}")]
    Invalid(String),
}
