use crate::tree::common::errors::Result;
use crate::tree::common::interface::ScenarioMaker;
use crate::tree::model::creators::{conditional, prior};
use crate::tree::model::{BeliefTree, Outcome};

/// Neapolitan's cheating spouse network:
///
/// ```text
///        A  spouse cheating
///       / \
///      B   D  strange caller on the phone
///      |
///      C  spouse reported seen dining with another
/// ```
pub struct CheatingSpouse {}

impl ScenarioMaker for CheatingSpouse {
    fn name(&self) -> &str {
        "cheating_spouse"
    }

    fn build_tree(&self) -> Result<BeliefTree> {
        let mut tree = BeliefTree::new();
        let cheating = tree.add_node("Spouse cheating", 'A', prior(0.9, 0.1))?;
        let dining = tree.add_node(
            "Spouse dining with another",
            'B',
            conditional([0.8, 0.3], [0.2, 0.7]),
        )?;
        let seen = tree.add_node(
            "Spouse reported seen dining with another",
            'C',
            conditional([0.999, 0.6], [0.001, 0.4]),
        )?;
        let caller = tree.add_node(
            "Strange man/lady calls on the phone",
            'D',
            conditional([0.6, 0.2], [0.4, 0.8]),
        )?;
        tree.attach_child(cheating, dining)?;
        tree.attach_child(cheating, caller)?;
        tree.attach_child(dining, seen)?;
        Ok(tree)
    }

    fn default_evidence(&self) -> Vec<(char, Outcome)> {
        vec![('C', Outcome::Present)]
    }
}
