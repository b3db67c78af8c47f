//! The board aggregate: owns the node table, the edge list and the derived
//! value table, and recomputes values after every mutation.

use crate::analysis::would_create_cycle;
use crate::error::MutationError;
use crate::evaluator;
use crate::formula::FormulaRenderer;
use crate::graph::{
    Edge, EdgeId, Node, NodeId, NodeKind, NodePatch, NodeTable, NodeType, Operation, Position,
    Topology, ValueTable,
};
use crate::snapshot::FlowSnapshot;
use ahash::AHashSet;

mod config;
mod layout;

pub use config::{LayoutConfig, StoreConfig};

/// A Step is a binary operator, so it never takes more inputs than this.
const STEP_OPERANDS: usize = 2;

/// A single board of cards.
///
/// Every mutation runs to completion, including a full recompute, before it
/// returns, so [`values`](Self::values) always matches the current graph.
/// A rejected mutation returns `Err` and leaves all three collections
/// untouched.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: NodeTable,
    edges: Vec<Edge>,
    values: ValueTable,
    config: StoreConfig,
    next_node_id: u64,
    next_edge_id: u64,
}

pub struct GraphStoreBuilder {
    config: StoreConfig,
}

impl GraphStoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_inputs(mut self, max_inputs: usize) -> Self {
        self.config.max_inputs = max_inputs.max(1);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn build(self) -> GraphStore {
        GraphStore {
            nodes: NodeTable::new(),
            edges: Vec::new(),
            values: ValueTable::new(),
            config: self.config,
            next_node_id: 0,
            next_edge_id: 0,
        }
    }
}

impl Default for GraphStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        GraphStoreBuilder::new().build()
    }

    pub fn builder() -> GraphStoreBuilder {
        GraphStoreBuilder::new()
    }

    // --- Queries ---

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// Derived value of a node; `None` when unevaluable or unknown.
    pub fn value(&self, id: &NodeId) -> Option<f64> {
        self.values.get(id)
    }

    /// Ids of the nodes feeding `id`, in connection order.
    pub fn inputs_of(&self, id: &NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| &e.target_id == id)
            .map(|e| e.source_id.clone())
            .collect()
    }

    /// Undirected connected component of `node_id`, itself included.
    pub fn get_connected_nodes(&self, node_id: &NodeId) -> AHashSet<NodeId> {
        Topology::new(&self.nodes, &self.edges)
            .component(node_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// How many cards [`remove_flow`](Self::remove_flow) would delete.
    pub fn connected_count(&self, node_id: &NodeId) -> usize {
        Topology::new(&self.nodes, &self.edges)
            .component(node_id)
            .len()
    }

    /// Infix formula of a Result's upstream chain, using node ids.
    pub fn formula(&self, result_id: &NodeId) -> Option<String> {
        FormulaRenderer::render(result_id, &self.nodes, &self.edges)
    }

    /// Infix formula labelled with titles, falling back to ids.
    pub fn titled_formula(&self, result_id: &NodeId) -> Option<String> {
        FormulaRenderer::render_with(result_id, &self.nodes, &self.edges, |node| {
            node.title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| node.id.to_string())
        })
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot::new(self.nodes.values().cloned(), self.edges.clone())
    }

    /// Recomputes the value table from scratch.
    pub fn recompute(&mut self) {
        self.values = evaluator::evaluate(&self.nodes, &self.edges);
    }

    // --- Node mutations ---

    /// Creates a node with default payload: value `0` for Sources and Steps,
    /// operation `+` for Steps. Without a position it lands at the origin.
    pub fn add_node(&mut self, node_type: NodeType, position: Option<Position>) -> NodeId {
        let position = position
            .unwrap_or_else(|| layout::next_position(&self.nodes, None, &self.config.layout));
        let id = self.insert_node(NodeKind::new(node_type), position, None);
        self.recompute();
        id
    }

    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| reject(MutationError::NodeNotFound(id.clone())))?;
        node.apply_patch(patch);
        self.recompute();
        Ok(())
    }

    /// Deletes the node and every edge touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<(), MutationError> {
        if self.nodes.remove(id).is_none() {
            return Err(reject(MutationError::NodeNotFound(id.clone())));
        }
        self.edges.retain(|e| !e.touches(id));
        self.recompute();
        Ok(())
    }

    /// Structural copy of a node (type, payload, title) with no edges,
    /// placed beside the original.
    pub fn duplicate_node(&mut self, id: &NodeId) -> Option<NodeId> {
        let original = self.nodes.get(id)?;
        let kind = original.kind.clone();
        let title = original.title.clone();
        let position =
            layout::next_position(&self.nodes, Some(original.position), &self.config.layout);

        let copy = self.insert_node(kind, position, title);
        self.recompute();
        Some(copy)
    }

    /// Creates a Step applying `operation`, wired from `source_id`.
    pub fn add_step_from(
        &mut self,
        source_id: &NodeId,
        operation: Operation,
    ) -> Result<NodeId, MutationError> {
        let kind = NodeKind::Step {
            value: Some(0.0),
            operation,
        };
        self.spawn_from(source_id, kind, Some(operation))
    }

    /// Creates a Result wired from `source_id`; `eval_precedence` selects
    /// calculator mode.
    pub fn add_result_from(
        &mut self,
        source_id: &NodeId,
        eval_precedence: bool,
    ) -> Result<NodeId, MutationError> {
        self.spawn_from(source_id, NodeKind::Result { eval_precedence }, None)
    }

    fn spawn_from(
        &mut self,
        source_id: &NodeId,
        kind: NodeKind,
        operation: Option<Operation>,
    ) -> Result<NodeId, MutationError> {
        let source = self
            .nodes
            .get(source_id)
            .ok_or_else(|| reject(MutationError::NodeNotFound(source_id.clone())))?;
        let position =
            layout::next_position(&self.nodes, Some(source.position), &self.config.layout);

        let id = self.insert_node(kind, position, None);
        // A fresh node has no edges, so this link can never be refused.
        let edge = Edge::new(self.allocate_edge_id(), source_id.clone(), id.clone())
            .with_operation(operation);
        self.edges.push(edge);
        self.recompute();
        Ok(id)
    }

    // --- Edge mutations ---

    /// Connects `source_id -> target_id`.
    ///
    /// Refused on a self loop, an unknown endpoint, a cycle, a duplicate, or
    /// a target already at its input cap. Steps are capped at two inputs
    /// whatever `max_inputs` says. A Result target first drops its
    /// current input so it keeps a single one.
    pub fn add_edge(
        &mut self,
        source_id: &NodeId,
        target_id: &NodeId,
        operation: Option<Operation>,
    ) -> Result<EdgeId, MutationError> {
        self.check_connection(&self.edges, source_id, target_id)
            .map_err(reject)?;

        if self.is_result(target_id) {
            self.edges.retain(|e| &e.target_id != target_id);
        }
        let id = self.allocate_edge_id();
        self.edges.push(
            Edge::new(id.clone(), source_id.clone(), target_id.clone()).with_operation(operation),
        );
        self.recompute();
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<(), MutationError> {
        let before = self.edges.len();
        self.edges.retain(|e| &e.id != id);
        if self.edges.len() == before {
            return Err(reject(MutationError::EdgeNotFound(id.clone())));
        }
        self.recompute();
        Ok(())
    }

    /// Drops every edge into `node_id`; returns how many were removed.
    pub fn remove_all_inputs(&mut self, node_id: &NodeId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| &e.target_id != node_id);
        self.recompute();
        before - self.edges.len()
    }

    /// Drops every edge out of `node_id`; returns how many were removed.
    pub fn remove_all_outputs(&mut self, node_id: &NodeId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| &e.source_id != node_id);
        self.recompute();
        before - self.edges.len()
    }

    /// Moves an existing edge to new endpoints in one step.
    ///
    /// The checks of [`add_edge`](Self::add_edge) run against the edge set
    /// without the edge being moved, so it never collides with itself and
    /// reconnecting to its current endpoints succeeds.
    pub fn reconnect_edge(
        &mut self,
        edge_id: &EdgeId,
        new_source: &NodeId,
        new_target: &NodeId,
    ) -> Result<(), MutationError> {
        if new_source == new_target {
            return Err(reject(MutationError::SelfLoop(new_source.clone())));
        }
        let Some(index) = self.edges.iter().position(|e| &e.id == edge_id) else {
            return Err(reject(MutationError::EdgeNotFound(edge_id.clone())));
        };

        let others: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| &e.id != edge_id)
            .cloned()
            .collect();
        self.check_connection(&others, new_source, new_target)
            .map_err(reject)?;

        let edge = &mut self.edges[index];
        edge.source_id = new_source.clone();
        edge.target_id = new_target.clone();
        if self.is_result(new_target) {
            self.edges
                .retain(|e| &e.id == edge_id || &e.target_id != new_target);
        }
        self.recompute();
        Ok(())
    }

    // --- Whole-flow operations ---

    /// Deletes the undirected connected component of `node_id`. Returns the
    /// number of nodes removed.
    pub fn remove_flow(&mut self, node_id: &NodeId) -> usize {
        let doomed = self.get_connected_nodes(node_id);
        self.nodes.retain(|id, _| !doomed.contains(id));
        self.edges
            .retain(|e| !doomed.contains(&e.source_id) && !doomed.contains(&e.target_id));
        self.recompute();
        doomed.len()
    }

    /// Replaces the node table and edge list in one transition and moves the
    /// id counters past every imported numeric suffix.
    pub fn load_flow(&mut self, nodes: NodeTable, edges: Vec<Edge>) {
        let max_node = nodes
            .keys()
            .filter_map(|id| id.numeric_suffix('n'))
            .max()
            .unwrap_or(0);
        let max_edge = edges
            .iter()
            .filter_map(|e| e.id.numeric_suffix('e'))
            .max()
            .unwrap_or(0);

        self.nodes = nodes;
        self.edges = edges;
        self.next_node_id = max_node.saturating_add(1);
        self.next_edge_id = max_edge.saturating_add(1);
        self.recompute();
    }

    pub fn load_snapshot(&mut self, snapshot: FlowSnapshot) {
        let nodes = snapshot.nodes.into_iter().collect();
        self.load_flow(nodes, snapshot.edges);
    }

    /// Imports a JSON snapshot. A payload whose `nodes` is not a mapping or
    /// whose `edges` is not a sequence is refused and nothing changes.
    pub fn load_json(&mut self, json: &str) -> Result<FlowSnapshot, MutationError> {
        let snapshot = FlowSnapshot::from_json(json).map_err(|e| reject(e.into()))?;
        self.load_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    // --- Internals ---

    fn is_result(&self, id: &NodeId) -> bool {
        self.nodes.get(id).is_some_and(Node::is_result)
    }

    fn check_connection(
        &self,
        edges: &[Edge],
        source_id: &NodeId,
        target_id: &NodeId,
    ) -> Result<(), MutationError> {
        if source_id == target_id {
            return Err(MutationError::SelfLoop(source_id.clone()));
        }
        for id in [source_id, target_id] {
            if !self.nodes.contains_key(id) {
                return Err(MutationError::NodeNotFound(id.clone()));
            }
        }
        if would_create_cycle(edges, source_id, target_id) {
            return Err(MutationError::CycleDetected {
                source_id: source_id.clone(),
                target_id: target_id.clone(),
            });
        }
        if edges.iter().any(|e| e.connects(source_id, target_id)) {
            return Err(MutationError::DuplicateEdge {
                source_id: source_id.clone(),
                target_id: target_id.clone(),
            });
        }
        let limit = match self.nodes.get(target_id).map(Node::node_type) {
            Some(NodeType::Result) => return Ok(()),
            Some(NodeType::Step) => self.config.max_inputs.min(STEP_OPERANDS),
            _ => self.config.max_inputs,
        };
        let existing = edges.iter().filter(|e| &e.target_id == target_id).count();
        if existing >= limit {
            return Err(MutationError::InputLimitExceeded {
                target_id: target_id.clone(),
                limit,
            });
        }
        Ok(())
    }

    fn insert_node(
        &mut self,
        kind: NodeKind,
        position: Position,
        title: Option<String>,
    ) -> NodeId {
        let id = loop {
            // Wraps past the largest suffix; taken ids are skipped.
            let candidate = NodeId::new(format!("n{}", self.next_node_id));
            self.next_node_id = self.next_node_id.wrapping_add(1);
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        self.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                kind,
                position,
                title,
            },
        );
        id
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        loop {
            let candidate = EdgeId::new(format!("e{}", self.next_edge_id));
            self.next_edge_id = self.next_edge_id.wrapping_add(1);
            if !self.edges.iter().any(|e| e.id == candidate) {
                return candidate;
            }
        }
    }
}

fn reject(err: MutationError) -> MutationError {
    tracing::warn!(reason = %err, "mutation rejected");
    err
}
