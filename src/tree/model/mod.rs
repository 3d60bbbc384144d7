pub mod objects;
pub mod node;
pub mod creators;

pub use node::{BeliefTree, Node, NodeId};
pub use objects::{Outcome, Pair, ProbabilityTable};
