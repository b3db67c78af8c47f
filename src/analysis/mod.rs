//! Pure graph predicates and walks used by the store and the evaluator.

pub mod chain;
pub mod cycle;

pub use chain::{ChainStop, formula_chain, linear_chain, walk_chain};
pub use cycle::would_create_cycle;
