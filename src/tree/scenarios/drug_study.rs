use crate::tree::common::errors::Result;
use crate::tree::common::interface::ScenarioMaker;
use crate::tree::model::creators::{conditional, prior};
use crate::tree::model::{BeliefTree, Outcome};

/// Two-node chain: being in a drug study (D) influences being cured (C).
/// The usual evidence is meeting a cured patient.
pub struct DrugStudy {}

impl ScenarioMaker for DrugStudy {
    fn name(&self) -> &str {
        "drug_study"
    }

    fn build_tree(&self) -> Result<BeliefTree> {
        let mut tree = BeliefTree::new();
        let drug = tree.add_node("Being in drug study", 'D', prior(0.9, 0.1))?;
        let cured = tree.add_node("Patient cured", 'C', conditional([0.5, 0.25], [0.5, 0.75]))?;
        tree.attach_child(drug, cured)?;
        Ok(tree)
    }

    fn default_evidence(&self) -> Vec<(char, Outcome)> {
        vec![('C', Outcome::Present)]
    }
}
