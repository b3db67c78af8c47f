//! Tests for JSON import/export of whole boards.
mod common;
use cardflow::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_import_reads_metadata() {
    let snapshot = FlowSnapshot::from_json(MERGE_FLOW_JSON).unwrap();
    assert_eq!(snapshot.project_name.as_deref(), Some("Pricing"));
    assert_eq!(
        snapshot.timestamp.as_deref(),
        Some("2026-01-01T00:00:00.000Z")
    );
    assert_eq!(snapshot.nodes.len(), 6);
    assert_eq!(snapshot.edges.len(), 4);

    let divide = &snapshot.nodes[&nid("n2")];
    assert_eq!(divide.operation(), Some(Operation::Divide));
    assert_eq!(divide.stored_value(), None);
    assert_eq!(divide.position, Position::new(200.0, 40.0));
    assert_eq!(snapshot.edges[0].operation, Some(Operation::Divide));
}

#[test]
fn test_export_then_import_restores_board() {
    let mut store = GraphStore::new();
    store.load_json(MERGE_FLOW_JSON).unwrap();
    let result = calculator(&mut store, 3.0, &[(Operation::Multiply, 7.0)], true);
    store
        .update_node(&result, NodePatch::default().with_title("Total"))
        .unwrap();

    let exported = store
        .snapshot()
        .with_project_name("Pricing")
        .with_timestamp("2026-02-03T04:05:06.000Z");
    let json = exported.to_json().unwrap();
    let imported = FlowSnapshot::from_json(&json).unwrap();
    assert_eq!(imported, exported);

    let mut restored = GraphStore::new();
    restored.load_snapshot(imported);
    assert_eq!(restored.values(), store.values());
    assert_eq!(restored.value(&result), Some(21.0));
    assert_eq!(
        restored.node(&result).unwrap().title.as_deref(),
        Some("Total")
    );
}

#[test]
fn test_wire_shape_of_nodes_and_edges() {
    let mut store = GraphStore::new();
    let a = source(&mut store, 4.0);
    let times = store.add_step_from(&a, Operation::Multiply).unwrap();
    let result = store.add_result_from(&times, true).unwrap();

    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(
        value["nodes"]["n0"],
        json!({ "id": "n0", "type": "source", "value": 4.0, "position": { "x": 0.0, "y": 0.0 } })
    );
    assert_eq!(value["nodes"]["n1"]["type"], "step");
    assert_eq!(value["nodes"]["n1"]["operation"], "×");
    assert_eq!(value["nodes"][result.as_str()]["evalPrecedence"], true);
    assert_eq!(
        value["edges"][0],
        json!({ "id": "e0", "sourceId": "n0", "targetId": "n1", "operation": "×" })
    );
    // The Result edge carries no operation tag.
    assert!(value["edges"][1].get("operation").is_none());
    assert!(value.get("projectName").is_none());
}

#[test]
fn test_shape_is_validated() {
    let cases = [
        r#"[]"#,
        r#"{ "edges": [] }"#,
        r#"{ "nodes": [], "edges": [] }"#,
        r#"{ "nodes": {} }"#,
        r#"{ "nodes": {}, "edges": {} }"#,
    ];
    for case in cases {
        assert!(
            matches!(
                FlowSnapshot::from_json(case),
                Err(SnapshotError::InvalidShape(_))
            ),
            "{case} should be refused"
        );
    }
    assert!(matches!(
        FlowSnapshot::from_json("{"),
        Err(SnapshotError::Json(_))
    ));

    let empty = FlowSnapshot::from_json(r#"{ "nodes": {}, "edges": [] }"#).unwrap();
    assert!(empty.nodes.is_empty());
    assert!(empty.edges.is_empty());
    assert_eq!(empty.project_name, None);
}

#[test]
fn test_malformed_entries_are_skipped() {
    let value = json!({
        "nodes": {
            "n0": { "type": "source", "value": 2 },
            "n1": { "type": "widget" },
            "n2": "not a node",
            "n3": { "type": "step", "value": 3, "operation": "*" }
        },
        "edges": [
            { "id": "e0", "sourceId": "n0", "targetId": "n3" },
            { "id": "e1", "sourceId": "n0" },
            42
        ]
    });
    let snapshot = FlowSnapshot::from_value(value).unwrap();

    let ids: Vec<&str> = snapshot.nodes.keys().map(NodeId::as_str).collect();
    assert_eq!(ids, vec!["n0", "n3"]);
    assert_eq!(snapshot.edges.len(), 1);

    let mut store = GraphStore::new();
    store.load_snapshot(snapshot);
    assert_eq!(store.value(&nid("n3")), Some(6.0));
}

#[test]
fn test_mapping_key_wins_over_embedded_id() {
    let value = json!({
        "nodes": { "n7": { "id": "n1", "type": "source", "value": 1 } },
        "edges": []
    });
    let snapshot = FlowSnapshot::from_value(value).unwrap();
    let node = &snapshot.nodes[&nid("n7")];
    assert_eq!(node.id, nid("n7"));
}

#[test]
fn test_lenient_field_decoding() {
    let value = json!({
        "projectName": "Legacy",
        "timestamp": 1735689600000u64,
        "nodes": {
            "n0": { "type": "source", "value": null },
            "n1": { "type": "step", "operation": "/" },
            "n2": { "type": "step", "value": 1, "operation": "−" },
            "n3": { "type": "result" }
        },
        "edges": []
    });
    let snapshot = FlowSnapshot::from_value(value).unwrap();

    assert_eq!(snapshot.timestamp.as_deref(), Some("1735689600000"));
    assert_eq!(snapshot.nodes[&nid("n0")].stored_value(), Some(0.0));
    assert_eq!(
        snapshot.nodes[&nid("n1")].operation(),
        Some(Operation::Divide)
    );
    assert_eq!(snapshot.nodes[&nid("n1")].stored_value(), None);
    assert_eq!(
        snapshot.nodes[&nid("n2")].operation(),
        Some(Operation::Subtract)
    );
    assert_eq!(
        snapshot.nodes[&nid("n3")].kind,
        NodeKind::Result {
            eval_precedence: false
        }
    );
    assert_eq!(snapshot.nodes[&nid("n3")].position, Position::ORIGIN);
}

#[test]
fn test_imports_boards_saved_with_portuguese_card_types() {
    let json = r#"{
        "nodes": {
            "n0": { "id": "n0", "type": "origem", "value": 600, "position": { "x": 0, "y": 0 } },
            "n1": { "id": "n1", "type": "origem", "value": 30, "position": { "x": 0, "y": 80 } },
            "n2": { "id": "n2", "type": "etapa", "value": null, "operation": "÷", "position": { "x": 200, "y": 40 } },
            "n3": { "id": "n3", "type": "origem", "value": 400, "position": { "x": 0, "y": 200 } },
            "n4": { "id": "n4", "type": "origem", "value": 150, "position": { "x": 0, "y": 280 } },
            "n5": { "id": "n5", "type": "etapa", "value": 0, "operation": "+", "position": { "x": 200, "y": 240 } },
            "n6": { "id": "n6", "type": "resultado", "evalPrecedence": true, "position": { "x": 400, "y": 240 } }
        },
        "edges": [
            { "id": "e0", "sourceId": "n0", "targetId": "n2", "operation": "÷" },
            { "id": "e1", "sourceId": "n1", "targetId": "n2", "operation": "÷" },
            { "id": "e2", "sourceId": "n3", "targetId": "n5", "operation": "+" },
            { "id": "e3", "sourceId": "n4", "targetId": "n5", "operation": "+" },
            { "id": "e4", "sourceId": "n5", "targetId": "n6" }
        ]
    }"#;
    let mut store = GraphStore::new();
    store.load_json(json).unwrap();

    assert_eq!(store.nodes().len(), 7);
    assert_eq!(store.value(&nid("n2")), Some(20.0));
    assert_eq!(store.value(&nid("n5")), Some(550.0));
    assert_eq!(
        store.node(&nid("n6")).unwrap().kind,
        NodeKind::Result {
            eval_precedence: true
        }
    );
    // Calculator mode falls back to pass-through on the two-input step.
    assert_eq!(store.value(&nid("n6")), Some(550.0));

    // Exports always use the English tags.
    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(value["nodes"]["n0"]["type"], "source");
    assert_eq!(value["nodes"]["n2"]["type"], "step");
    assert_eq!(value["nodes"]["n6"]["type"], "result");
}
