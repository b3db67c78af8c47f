//! Infix rendering of the chain feeding a Result card.

use crate::analysis::formula_chain;
use crate::graph::{Edge, Node, NodeId, NodeTable, Operation, Topology};
use itertools::Itertools;

/// Renders a Result's upstream chain as an infix formula such as
/// `(n0 × n1) + n2`.
pub struct FormulaRenderer;

impl FormulaRenderer {
    /// Formula for `result_id` using node ids as operands.
    pub fn render(result_id: &NodeId, nodes: &NodeTable, edges: &[Edge]) -> Option<String> {
        Self::render_with(result_id, nodes, edges, |node| node.id.to_string())
    }

    /// Formula for `result_id`, labelling each operand with `label`.
    ///
    /// Returns `None` if `result_id` is not a Result, if the walk back to a
    /// Source (or an upstream Result) hits a branch, or if nothing feeds it.
    pub fn render_with<F>(
        result_id: &NodeId,
        nodes: &NodeTable,
        edges: &[Edge],
        label: F,
    ) -> Option<String>
    where
        F: Fn(&Node) -> String,
    {
        if !nodes.get(result_id)?.is_result() {
            return None;
        }
        let topology = Topology::new(nodes, edges);
        let chain = formula_chain(result_id, nodes, &topology)?;
        let (_, upstream) = chain.split_last()?;
        Self::render_chain(upstream, label)
    }

    /// Renders an upstream-first chain (without the terminal Result).
    ///
    /// Runs of `×`/`÷` are parenthesized only when the chain also contains
    /// `+` or `-`.
    pub fn render_chain<F>(chain: &[&Node], label: F) -> Option<String>
    where
        F: Fn(&Node) -> String,
    {
        if chain.is_empty() {
            return None;
        }
        // ops[i] sits between operand i and operand i + 1.
        let ops: Vec<Option<Operation>> = chain[1..].iter().map(|n| n.operation()).collect();

        let has_additive = ops.iter().flatten().any(|op| !op.is_multiplicative());
        let has_multiplicative = ops.iter().flatten().any(|op| op.is_multiplicative());

        let mut opens = vec![false; chain.len()];
        let mut closes = vec![false; chain.len()];
        if has_additive && has_multiplicative {
            let runs = ops
                .iter()
                .enumerate()
                .chunk_by(|(_, op)| op.is_some_and(Operation::is_multiplicative));
            for (multiplicative, run) in &runs {
                if !multiplicative {
                    continue;
                }
                let positions: Vec<usize> = run.map(|(i, _)| i).collect();
                if let (Some(&first), Some(&last)) = (positions.first(), positions.last()) {
                    opens[first] = true;
                    closes[last + 1] = true;
                }
            }
        }

        let formula = chain
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let mut part = String::new();
                if opens[i] {
                    part.push('(');
                }
                part.push_str(&label(node));
                if closes[i] {
                    part.push(')');
                }
                if let Some(op) = ops.get(i) {
                    part.push(' ');
                    if let Some(op) = op {
                        part.push_str(op.symbol());
                        part.push(' ');
                    }
                }
                part
            })
            .join("");

        Some(formula.split_whitespace().join(" "))
    }
}
