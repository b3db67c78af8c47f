use crate::graph::{Node, NodeId, NodeTable, Topology};

/// Where a backward chain walk is allowed to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStop {
    /// Only a Source node terminates the walk (calculator evaluation).
    Source,
    /// A Source, or any Result other than the starting one (formula display).
    SourceOrResult,
}

/// Walks from `start` to the Source feeding it through single-input nodes.
///
/// Returns the chain ordered upstream-first, `start` included as the last
/// element, or `None` when a node on the way has zero or several inputs.
pub fn linear_chain<'a>(
    start: &NodeId,
    nodes: &'a NodeTable,
    topology: &Topology<'_>,
) -> Option<Vec<&'a Node>> {
    walk_chain(start, nodes, topology, ChainStop::Source)
}

/// Like [`linear_chain`], but an upstream Result also ends the walk so a
/// nested calculation shows up as a single reference.
pub fn formula_chain<'a>(
    start: &NodeId,
    nodes: &'a NodeTable,
    topology: &Topology<'_>,
) -> Option<Vec<&'a Node>> {
    walk_chain(start, nodes, topology, ChainStop::SourceOrResult)
}

pub fn walk_chain<'a>(
    start: &NodeId,
    nodes: &'a NodeTable,
    topology: &Topology<'_>,
    stop: ChainStop,
) -> Option<Vec<&'a Node>> {
    let mut chain = Vec::new();
    let mut visited = vec![false; topology.len()];
    let mut current = topology.index_of(start)?;

    loop {
        // Revisiting means the edge set has a cycle the store did not catch.
        if std::mem::replace(&mut visited[current], true) {
            return None;
        }
        let node = nodes.get(topology.id(current))?;
        chain.push(node);

        let reached_end = node.is_source()
            || (stop == ChainStop::SourceOrResult && node.is_result() && &node.id != start);
        if reached_end {
            chain.reverse();
            return Some(chain);
        }

        match topology.inputs(current) {
            [single] => current = *single,
            _ => return None,
        }
    }
}
