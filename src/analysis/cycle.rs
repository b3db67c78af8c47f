use crate::graph::{Edge, NodeId};
use ahash::AHashMap;

/// Reports whether adding `source -> target` to `edges` would close a cycle.
///
/// Builds an adjacency list over the existing edges plus the proposed one
/// and runs a depth-first search from every node, tracking the nodes on the
/// current recursion stack. Reaching a node that is still on the stack is a
/// back edge. Nothing is mutated.
pub fn would_create_cycle<'a>(
    edges: &'a [Edge],
    source: &'a NodeId,
    target: &'a NodeId,
) -> bool {
    let mut interner = Interner::default();
    let mut successors: Vec<Vec<usize>> = Vec::new();

    let proposed = std::iter::once((source, target));
    for (from, to) in edges
        .iter()
        .map(|e| (&e.source_id, &e.target_id))
        .chain(proposed)
    {
        let from = interner.intern(from, &mut successors);
        let to = interner.intern(to, &mut successors);
        successors[from].push(to);
    }

    let mut visited = vec![false; successors.len()];
    let mut on_stack = vec![false; successors.len()];
    (0..successors.len()).any(|node| {
        !visited[node] && dfs_has_cycle(node, &successors, &mut visited, &mut on_stack)
    })
}

fn dfs_has_cycle(
    node: usize,
    successors: &[Vec<usize>],
    visited: &mut [bool],
    on_stack: &mut [bool],
) -> bool {
    visited[node] = true;
    on_stack[node] = true;

    for &next in &successors[node] {
        if !visited[next] {
            if dfs_has_cycle(next, successors, visited, on_stack) {
                return true;
            }
        } else if on_stack[next] {
            return true;
        }
    }

    on_stack[node] = false;
    false
}

#[derive(Default)]
struct Interner<'a> {
    index: AHashMap<&'a NodeId, usize>,
}

impl<'a> Interner<'a> {
    fn intern(&mut self, id: &'a NodeId, successors: &mut Vec<Vec<usize>>) -> usize {
        *self.index.entry(id).or_insert_with(|| {
            successors.push(Vec::new());
            successors.len() - 1
        })
    }
}
