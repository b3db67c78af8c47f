use super::{Edge, NodeId, NodeTable};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Interned adjacency view over a node table and edge list.
///
/// Node ids are mapped to dense indices once, so every traversal (Kahn
/// ordering, chain walking, component search) works on `usize` slices
/// instead of re-scanning the edge list. Edges whose endpoints are not in
/// the node table are left out.
pub struct Topology<'a> {
    ids: Vec<&'a NodeId>,
    index: AHashMap<&'a NodeId, usize>,
    /// Incoming neighbours per node, in edge-list order.
    inputs: Vec<Vec<usize>>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Topology<'a> {
    pub fn new(nodes: &'a NodeTable, edges: &'a [Edge]) -> Self {
        let mut ids: Vec<&NodeId> = nodes.keys().collect();
        ids.sort_by(|a, b| {
            a.numeric_suffix('n')
                .cmp(&b.numeric_suffix('n'))
                .then_with(|| a.cmp(b))
        });
        let index: AHashMap<&NodeId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut inputs = vec![Vec::new(); ids.len()];
        let mut outputs = vec![Vec::new(); ids.len()];
        for edge in edges {
            if let (Some(&source), Some(&target)) =
                (index.get(&edge.source_id), index.get(&edge.target_id))
            {
                inputs[target].push(source);
                outputs[source].push(target);
            }
        }

        Self {
            ids,
            index,
            inputs,
            outputs,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn id(&self, index: usize) -> &'a NodeId {
        self.ids[index]
    }

    pub fn inputs(&self, index: usize) -> &[usize] {
        &self.inputs[index]
    }

    pub fn outputs(&self, index: usize) -> &[usize] {
        &self.outputs[index]
    }

    pub fn in_degree(&self, index: usize) -> usize {
        self.inputs[index].len()
    }

    /// Ids of the nodes feeding `id`, in edge-list order.
    pub fn input_ids(&self, id: &NodeId) -> Vec<&'a NodeId> {
        self.index_of(id)
            .map(|i| self.inputs[i].iter().map(|&s| self.ids[s]).collect())
            .unwrap_or_default()
    }

    /// Every node reachable from `start` following edges in either
    /// direction, `start` included. Empty if `start` is not in the table.
    pub fn component(&self, start: &NodeId) -> AHashSet<&'a NodeId> {
        let mut seen = AHashSet::new();
        let Some(start) = self.index_of(start) else {
            return seen;
        };

        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(current) = queue.pop_front() {
            seen.insert(self.ids[current]);
            for &next in self.inputs[current].iter().chain(&self.outputs[current]) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}
