//! Common test utilities for building boards.
use cardflow::prelude::*;

/// Shorthand for a node id literal.
#[allow(dead_code)]
pub fn nid(id: &str) -> NodeId {
    NodeId::from(id)
}

/// Adds a Source holding `value`.
#[allow(dead_code)]
pub fn source(store: &mut GraphStore, value: f64) -> NodeId {
    let id = store.add_node(NodeType::Source, None);
    store
        .update_node(&id, NodePatch::value(value))
        .expect("fresh node must exist");
    id
}

/// Adds an unconnected Step with the given operation and stored operand.
#[allow(dead_code)]
pub fn step(store: &mut GraphStore, operation: Operation, value: Option<f64>) -> NodeId {
    let id = store.add_node(NodeType::Step, None);
    store
        .update_node(
            &id,
            NodePatch::operation(operation).with_value(value),
        )
        .expect("fresh node must exist");
    id
}

/// Builds `start -> step(op, value) -> ...` and returns the last step.
#[allow(dead_code)]
pub fn chain_from(store: &mut GraphStore, start: &NodeId, links: &[(Operation, f64)]) -> NodeId {
    let mut current = start.clone();
    for (operation, value) in links {
        let next = store
            .add_step_from(&current, *operation)
            .expect("source exists");
        store
            .update_node(&next, NodePatch::value(*value))
            .expect("fresh node must exist");
        current = next;
    }
    current
}

/// A calculator-style board: Source(first) followed by `links`, ending in
/// a Result. Returns the Result id.
#[allow(dead_code)]
pub fn calculator(
    store: &mut GraphStore,
    first: f64,
    links: &[(Operation, f64)],
    eval_precedence: bool,
) -> NodeId {
    let head = source(store, first);
    let last = chain_from(store, &head, links);
    store
        .add_result_from(&last, eval_precedence)
        .expect("chain tail exists")
}

/// Two two-input steps: `600 ÷ 30` and `400 + 150`.
#[allow(dead_code)]
pub const MERGE_FLOW_JSON: &str = r#"{
    "projectName": "Pricing",
    "nodes": {
        "n0": { "id": "n0", "type": "source", "value": 600, "position": { "x": 0, "y": 0 } },
        "n1": { "id": "n1", "type": "source", "value": 30, "position": { "x": 0, "y": 80 } },
        "n2": { "id": "n2", "type": "step", "value": null, "operation": "÷", "position": { "x": 200, "y": 40 } },
        "n3": { "id": "n3", "type": "source", "value": 400, "position": { "x": 0, "y": 200 } },
        "n4": { "id": "n4", "type": "source", "value": 150, "position": { "x": 0, "y": 280 } },
        "n5": { "id": "n5", "type": "step", "value": 0, "operation": "+", "position": { "x": 200, "y": 240 } }
    },
    "edges": [
        { "id": "e0", "sourceId": "n0", "targetId": "n2", "operation": "÷" },
        { "id": "e1", "sourceId": "n1", "targetId": "n2", "operation": "÷" },
        { "id": "e2", "sourceId": "n3", "targetId": "n5", "operation": "+" },
        { "id": "e3", "sourceId": "n4", "targetId": "n5", "operation": "+" }
    ],
    "timestamp": "2026-01-01T00:00:00.000Z"
}"#;

/// Every edge in `store`, as `(source, target)` pairs.
#[allow(dead_code)]
pub fn edge_pairs(store: &GraphStore) -> Vec<(String, String)> {
    store
        .edges()
        .iter()
        .map(|e| (e.source_id.to_string(), e.target_id.to_string()))
        .collect()
}
