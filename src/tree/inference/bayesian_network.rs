use log::info;

use crate::tree::common::errors::Result;
use crate::tree::common::lookup::find_node;
use crate::tree::common::report::{NodeReport, report_node, report_tree};
use crate::tree::model::{BeliefTree, NodeId, Outcome, Pair};

use super::engine::{initialize, instantiate};

/// BeliefNetwork owns an initialized tree and addresses nodes by identifier.
/// This serves as the entry point for callers that do not track `NodeId`s.
#[derive(Debug, Clone)]
pub struct BeliefNetwork {
    tree: BeliefTree,
    root: NodeId,
}

impl BeliefNetwork {
    /// Takes a built tree and initializes it from its single root.
    pub fn new(tree: BeliefTree) -> Result<Self> {
        let root = tree.root()?;
        Self::with_root(tree, root)
    }

    pub fn with_root(mut tree: BeliefTree, root: NodeId) -> Result<Self> {
        initialize(&mut tree, root)?;
        Ok(BeliefNetwork { tree, root })
    }

    pub fn tree(&self) -> &BeliefTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn find(&self, identifier: char) -> Result<NodeId> {
        find_node(&self.tree, self.root, identifier)
    }

    /// Instantiates the node named `identifier` and propagates the evidence.
    pub fn observe(&mut self, identifier: char, outcome: Outcome) -> Result<NodeId> {
        let id = self.find(identifier)?;
        instantiate(&mut self.tree, id, outcome)?;
        Ok(id)
    }

    /// Applies evidence in order, stopping at the first failure.
    pub fn observe_all(&mut self, evidence: &[(char, Outcome)]) -> Result<()> {
        for &(identifier, outcome) in evidence {
            self.observe(identifier, outcome)?;
        }
        info!("applied {} piece(s) of evidence", evidence.len());
        Ok(())
    }

    pub fn belief(&self, identifier: char) -> Result<Pair> {
        self.tree.belief(self.find(identifier)?)
    }

    /// Posterior probability that the event of `identifier` occurred.
    pub fn probability(&self, identifier: char) -> Result<f64> {
        Ok(self.belief(identifier)?[1])
    }

    pub fn report_node(&self, identifier: char) -> Result<NodeReport> {
        report_node(&self.tree, self.find(identifier)?)
    }

    pub fn report(&self) -> Result<Vec<NodeReport>> {
        report_tree(&self.tree, self.root)
    }
}
