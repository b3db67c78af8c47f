//! # Cardflow - Live Evaluation Engine for Numeric Card Boards
//!
//! **Cardflow** keeps a directed acyclic graph of numeric "cards" and the value
//! of every card up to date as the graph changes. It is the engine behind a
//! whiteboard-style calculator: the drawing surface calls into a
//! [`GraphStore`](store::GraphStore) and re-renders from its value table.
//!
//! ## Cards
//!
//! - **Source**: a typed-in number. With incoming edges it becomes a merge
//!   point and sums them.
//! - **Step**: one of `+ - × ÷` applied to two operands: two incoming edges,
//!   or one edge plus the step's own number.
//! - **Result**: shows its single input (pipeline mode), or evaluates the
//!   linear chain behind it with `×`/`÷` before `+`/`-` (calculator mode).
//!
//! ## Core Workflow
//!
//! 1.  **Build**: add cards and connect them through the store's mutation API.
//!     Connections that would close a cycle, duplicate an edge or overflow a
//!     card's inputs are refused and leave the board untouched.
//! 2.  **Read**: after every mutation the store has already recomputed the
//!     whole value table. `None` marks a card that cannot be evaluated.
//! 3.  **Explain**: [`GraphStore::formula`](store::GraphStore::formula) renders
//!     a Result's chain back into an infix expression.
//! 4.  **Persist**: [`FlowSnapshot`](snapshot::FlowSnapshot) round-trips a
//!     board through JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardflow::prelude::*;
//!
//! let mut store = GraphStore::new();
//!
//! // 6 - 5 × 2, evaluated as a calculator would.
//! let six = store.add_node(NodeType::Source, None);
//! store.update_node(&six, NodePatch::value(6.0)).unwrap();
//!
//! let minus = store.add_step_from(&six, Operation::Subtract).unwrap();
//! store.update_node(&minus, NodePatch::value(5.0)).unwrap();
//!
//! let times = store.add_step_from(&minus, Operation::Multiply).unwrap();
//! store.update_node(&times, NodePatch::value(2.0)).unwrap();
//!
//! let calculator = store.add_result_from(&times, true).unwrap();
//! let pipeline = store.add_result_from(&times, false).unwrap();
//!
//! assert_eq!(store.value(&calculator), Some(-4.0)); // 6 - (5 × 2)
//! assert_eq!(store.value(&pipeline), Some(2.0)); // (6 - 5) × 2
//! assert_eq!(store.formula(&calculator).as_deref(), Some("n0 - (n1 × n2)"));
//! ```

pub mod analysis;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod graph;
pub mod prelude;
pub mod snapshot;
pub mod store;
