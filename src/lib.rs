#[macro_use]
pub mod tree;

pub use tree::common::{NetworkFile, NodeReport, PropagationError};
pub use tree::{BeliefNetwork, BeliefTree, NodeId, Outcome};
