use crate::tree::common::errors::Result;
use crate::tree::model::{BeliefTree, Outcome};

/// Builds a ready-to-initialize tree along with the evidence it is usually run with.
pub trait ScenarioMaker {
    fn name(&self) -> &str;

    fn build_tree(&self) -> Result<BeliefTree>;

    fn default_evidence(&self) -> Vec<(char, Outcome)> {
        Vec::new()
    }
}
