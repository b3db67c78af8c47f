//! JSON import/export of a whole board.
//!
//! The wire shape is `{ projectName, nodes: { id: Node }, edges: [Edge],
//! timestamp }`. Only the top-level shape is validated: `nodes` must be a
//! mapping and `edges` a sequence. Individual entries that do not parse are
//! dropped with a warning and the evaluator treats them as absent.

use crate::error::SnapshotError;
use crate::graph::{Edge, Node, NodeId};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl FlowSnapshot {
    pub fn new(nodes: impl IntoIterator<Item = Node>, edges: Vec<Edge>) -> Self {
        Self {
            project_name: None,
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges,
            timestamp: None,
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Caller-supplied save time; the engine never reads the clock.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: JsonValue) -> Result<Self, SnapshotError> {
        let JsonValue::Object(mut root) = value else {
            return Err(SnapshotError::InvalidShape(
                "flow must be a JSON object".to_string(),
            ));
        };
        let Some(JsonValue::Object(raw_nodes)) = root.remove("nodes") else {
            return Err(SnapshotError::InvalidShape(
                "`nodes` must be a mapping of id to node".to_string(),
            ));
        };
        let Some(JsonValue::Array(raw_edges)) = root.remove("edges") else {
            return Err(SnapshotError::InvalidShape(
                "`edges` must be a sequence".to_string(),
            ));
        };

        let mut nodes = BTreeMap::new();
        for (key, mut raw) in raw_nodes {
            // The mapping key is authoritative for the node's identity.
            if let JsonValue::Object(fields) = &mut raw {
                fields.insert("id".to_string(), JsonValue::String(key.clone()));
            }
            match serde_json::from_value::<Node>(raw) {
                Ok(node) => {
                    nodes.insert(node.id.clone(), node);
                }
                Err(e) => tracing::warn!(node = %key, error = %e, "skipping malformed node"),
            }
        }

        let edges = raw_edges
            .into_iter()
            .enumerate()
            .filter_map(|(position, raw)| match serde_json::from_value::<Edge>(raw) {
                Ok(edge) => Some(edge),
                Err(e) => {
                    tracing::warn!(position, error = %e, "skipping malformed edge");
                    None
                }
            })
            .collect();

        let text = |field: Option<JsonValue>| match field {
            Some(JsonValue::String(s)) => Some(s),
            Some(JsonValue::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            project_name: text(root.remove("projectName")),
            nodes,
            edges,
            timestamp: text(root.remove("timestamp")),
        })
    }
}
