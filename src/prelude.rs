//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build, mutate and read a board.
//!
//! # Example
//!
//! ```rust
//! use cardflow::prelude::*;
//!
//! let mut store = GraphStore::new();
//! let a = store.add_node(NodeType::Source, None);
//! let b = store.add_node(NodeType::Source, None);
//! let step = store.add_node(NodeType::Step, None);
//! store.update_node(&a, NodePatch::value(600.0)).unwrap();
//! store.update_node(&b, NodePatch::value(30.0)).unwrap();
//! store.update_node(&step, NodePatch::operation(Operation::Divide)).unwrap();
//! store.add_edge(&a, &step, Some(Operation::Divide)).unwrap();
//! store.add_edge(&b, &step, Some(Operation::Divide)).unwrap();
//!
//! assert_eq!(store.value(&step), Some(20.0));
//! ```

// Store and configuration
pub use crate::store::{GraphStore, GraphStoreBuilder, LayoutConfig, StoreConfig};

// Data model
pub use crate::graph::{
    Edge, EdgeId, Node, NodeId, NodeKind, NodePatch, NodeTable, NodeType, Operation, Position,
    ValueTable, format_value,
};

// Evaluation and rendering
pub use crate::evaluator::{Token, eval_with_precedence, evaluate};
pub use crate::formula::FormulaRenderer;

// Import/export
pub use crate::snapshot::FlowSnapshot;

// Error types
pub use crate::error::{ConfigError, MutationError, SnapshotError};
