//! Tests for infix formula rendering.
mod common;
use cardflow::prelude::*;
use common::*;

#[test]
fn test_mixed_chain_groups_multiplicative_runs() {
    let mut store = GraphStore::new();
    let result = calculator(
        &mut store,
        2.0,
        &[(Operation::Multiply, 3.0), (Operation::Add, 4.0)],
        true,
    );
    assert_eq!(store.formula(&result).as_deref(), Some("(n0 × n1) + n2"));
}

#[test]
fn test_run_in_the_middle_of_a_chain() {
    let mut store = GraphStore::new();
    let result = calculator(
        &mut store,
        1.0,
        &[
            (Operation::Add, 2.0),
            (Operation::Multiply, 3.0),
            (Operation::Divide, 4.0),
            (Operation::Subtract, 5.0),
        ],
        false,
    );
    assert_eq!(
        store.formula(&result).as_deref(),
        Some("n0 + (n1 × n2 ÷ n3) - n4")
    );
}

#[test]
fn test_single_tier_chains_have_no_parentheses() {
    let mut store = GraphStore::new();
    let additive = calculator(
        &mut store,
        1.0,
        &[(Operation::Add, 2.0), (Operation::Subtract, 3.0)],
        false,
    );
    assert_eq!(store.formula(&additive).as_deref(), Some("n0 + n1 - n2"));

    let mut store = GraphStore::new();
    let multiplicative = calculator(
        &mut store,
        1.0,
        &[(Operation::Multiply, 2.0), (Operation::Divide, 3.0)],
        false,
    );
    assert_eq!(
        store.formula(&multiplicative).as_deref(),
        Some("n0 × n1 ÷ n2")
    );
}

#[test]
fn test_result_on_bare_source() {
    let mut store = GraphStore::new();
    let result = calculator(&mut store, 5.0, &[], false);
    assert_eq!(store.formula(&result).as_deref(), Some("n0"));
}

#[test]
fn test_upstream_result_is_a_single_reference() {
    let mut store = GraphStore::new();
    let inner = calculator(&mut store, 1.0, &[(Operation::Add, 2.0)], false);
    let times = chain_from(&mut store, &inner, &[(Operation::Multiply, 3.0)]);
    let outer = store.add_result_from(&times, false).unwrap();

    assert_eq!(inner.as_str(), "n2");
    assert_eq!(store.formula(&outer).as_deref(), Some("n2 × n3"));
    assert_eq!(store.formula(&inner).as_deref(), Some("n0 + n1"));
    assert_eq!(store.value(&outer), Some(9.0));
}

#[test]
fn test_merge_point_ends_the_walk() {
    let mut store = GraphStore::new();
    let a = source(&mut store, 1.0);
    let b = source(&mut store, 2.0);
    let merge = source(&mut store, 0.0);
    store.add_edge(&a, &merge, None).unwrap();
    store.add_edge(&b, &merge, None).unwrap();
    let times = chain_from(&mut store, &merge, &[(Operation::Multiply, 4.0)]);
    let result = store.add_result_from(&times, false).unwrap();

    assert_eq!(store.formula(&result).as_deref(), Some("n2 × n3"));
    assert_eq!(store.value(&result), Some(12.0));
}

#[test]
fn test_no_formula_for_branched_or_missing_chains() {
    let mut store = GraphStore::new();
    let a = source(&mut store, 2.0);
    let b = source(&mut store, 3.0);
    let sum = step(&mut store, Operation::Add, None);
    store.add_edge(&a, &sum, None).unwrap();
    store.add_edge(&b, &sum, None).unwrap();
    let result = store.add_result_from(&sum, false).unwrap();
    let unconnected = store.add_node(NodeType::Result, None);

    assert_eq!(store.formula(&result), None);
    assert_eq!(store.formula(&unconnected), None);
    // Only Results have formulas.
    assert_eq!(store.formula(&sum), None);
    assert_eq!(store.formula(&nid("ghost")), None);
}

#[test]
fn test_titled_formula_falls_back_to_ids() {
    let mut store = GraphStore::new();
    let result = calculator(
        &mut store,
        10.0,
        &[(Operation::Multiply, 3.0), (Operation::Subtract, 1.0)],
        true,
    );
    store
        .update_node(&nid("n0"), NodePatch::default().with_title("Price"))
        .unwrap();
    store
        .update_node(&nid("n1"), NodePatch::default().with_title("   "))
        .unwrap();
    store
        .update_node(&nid("n2"), NodePatch::default().with_title("Discount"))
        .unwrap();

    assert_eq!(
        store.titled_formula(&result).as_deref(),
        Some("(Price × n1) - Discount")
    );
    assert_eq!(store.formula(&result).as_deref(), Some("(n0 × n1) - n2"));
}

#[test]
fn test_render_with_custom_labels() {
    let mut store = GraphStore::new();
    let result = calculator(
        &mut store,
        6.0,
        &[(Operation::Subtract, 5.0), (Operation::Multiply, 2.0)],
        true,
    );

    let formula = FormulaRenderer::render_with(&result, store.nodes(), store.edges(), |node| {
        format_value(node.stored_value())
    });
    assert_eq!(formula.as_deref(), Some("6 - (5 × 2)"));
}
