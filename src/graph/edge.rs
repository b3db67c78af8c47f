use super::node::{NodeId, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a connection (`e0`, `e1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn numeric_suffix(&self, prefix: char) -> Option<u64> {
        self.0.strip_prefix(prefix).unwrap_or(&self.0).parse().ok()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A directed connection `source -> target`.
///
/// The `operation` tag only drives edge coloring; computation always reads
/// the target Step's own operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
}

impl Edge {
    pub fn new(id: EdgeId, source_id: NodeId, target_id: NodeId) -> Self {
        Self {
            id,
            source_id,
            target_id,
            operation: None,
        }
    }

    pub fn with_operation(mut self, operation: Option<Operation>) -> Self {
        self.operation = operation;
        self
    }

    pub fn connects(&self, source: &NodeId, target: &NodeId) -> bool {
        &self.source_id == source && &self.target_id == target
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source_id == node || &self.target_id == node
    }
}
