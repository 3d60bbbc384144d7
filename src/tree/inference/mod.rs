pub mod lambda;
pub mod pi;
pub mod belief;
pub mod engine;
pub mod bayesian_network;

pub use bayesian_network::BeliefNetwork;
pub use engine::{initialize, instantiate};
