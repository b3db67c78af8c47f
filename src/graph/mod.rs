//! Board data model: cards (nodes), connections (edges) and the derived
//! value table, plus an interned adjacency view used by every traversal.

pub mod edge;
pub mod node;
pub mod topology;
pub mod values;

pub use edge::*;
pub use node::*;
pub use topology::*;
pub use values::*;

use ahash::AHashMap;

/// The node table, keyed by id.
pub type NodeTable = AHashMap<NodeId, Node>;
