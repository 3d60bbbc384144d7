pub mod common;
pub mod inference;
pub mod model;
pub mod scenarios;

// Re-export color printing macros
pub use crate::print_blue;
pub use crate::print_green;
pub use crate::print_red;
pub use crate::print_yellow;

pub use common::errors::{PropagationError, Result};
pub use inference::BeliefNetwork;
pub use model::{BeliefTree, Node, NodeId, Outcome, Pair, ProbabilityTable};
