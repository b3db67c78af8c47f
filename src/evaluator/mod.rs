//! Topological evaluation of the board.
//!
//! Nodes are ordered with Kahn's algorithm and each one is computed after
//! all of its inputs, using a rule that depends on its kind:
//!
//! - **Source**: its stored value, or the sum of its inputs when it is a
//!   merge point. Missing inputs count as `0` in that sum.
//! - **Step**: `input1 <op> input2`, where the second operand is the second
//!   incoming edge if there is one and the step's own value otherwise.
//! - **Result**: pass-through of its single input, or (calculator mode) the
//!   precedence-aware value of the linear chain feeding it.

use crate::analysis::linear_chain;
use crate::graph::{Edge, Node, NodeKind, NodeTable, Operation, Topology, ValueTable};
use std::collections::VecDeque;

pub mod precedence;

pub use precedence::{Token, eval_with_precedence};

/// Kahn ordering of node indices. Nodes caught in a cycle never reach
/// in-degree zero and are left out.
pub fn topological_order(topology: &Topology<'_>) -> Vec<usize> {
    let mut in_degrees: Vec<usize> = (0..topology.len())
        .map(|i| topology.in_degree(i))
        .collect();
    let mut queue: VecDeque<usize> = (0..topology.len())
        .filter(|&i| in_degrees[i] == 0)
        .collect();
    let mut order = Vec::with_capacity(topology.len());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &successor in topology.outputs(node) {
            in_degrees[successor] -= 1;
            if in_degrees[successor] == 0 {
                queue.push_back(successor);
            }
        }
    }
    order
}

/// Computes the full value table for a node table and edge list.
pub fn evaluate(nodes: &NodeTable, edges: &[Edge]) -> ValueTable {
    let topology = Topology::new(nodes, edges);
    let order = topological_order(&topology);
    if order.len() != topology.len() {
        tracing::warn!(
            skipped = topology.len() - order.len(),
            "nodes left out of evaluation: edge set contains a cycle"
        );
    }

    let mut values = ValueTable::new();
    for index in order {
        let id = topology.id(index);
        let Some(node) = nodes.get(id) else {
            continue;
        };
        let inputs: Vec<Option<f64>> = topology
            .inputs(index)
            .iter()
            .map(|&i| values.get(topology.id(i)))
            .collect();

        let value = match &node.kind {
            NodeKind::Source { value } => source_value(*value, &inputs),
            NodeKind::Step { value, operation } => step_value(*value, *operation, &inputs),
            NodeKind::Result { eval_precedence } => {
                result_value(node, *eval_precedence, &inputs, nodes, &topology)
            }
        };
        values.insert(id.clone(), value);
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        evaluated = values.len(),
        "graph recomputed"
    );
    values
}

fn source_value(stored: f64, inputs: &[Option<f64>]) -> Option<f64> {
    if inputs.is_empty() {
        return Some(stored);
    }
    // Merge point: lenient sum, unevaluable inputs contribute nothing.
    let sum: f64 = inputs.iter().flatten().sum();
    (!sum.is_nan()).then_some(sum)
}

fn step_value(
    stored: Option<f64>,
    operation: Operation,
    inputs: &[Option<f64>],
) -> Option<f64> {
    match inputs {
        [] => stored,
        [first] => operation.apply((*first)?, stored?),
        [first, second, ..] => operation.apply((*first)?, (*second)?),
    }
}

fn result_value(
    node: &Node,
    eval_precedence: bool,
    inputs: &[Option<f64>],
    nodes: &NodeTable,
    topology: &Topology<'_>,
) -> Option<f64> {
    let passthrough = *inputs.first()?;
    if !eval_precedence {
        return passthrough;
    }

    let Some(chain) = linear_chain(&node.id, nodes, topology) else {
        return passthrough;
    };
    let Some((head, rest)) = chain.split_first() else {
        return passthrough;
    };

    let mut tokens = vec![Token::Number(head.stored_value().unwrap_or(0.0))];
    for link in rest {
        if let NodeKind::Step { value, operation } = link.kind {
            tokens.push(Token::Operator(operation));
            tokens.push(Token::Number(value.unwrap_or(0.0)));
        }
    }

    if tokens.len() > 1 {
        eval_with_precedence(&tokens)
    } else {
        head.stored_value()
    }
}
