use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::common::interface::ScenarioMaker;
use crate::tree::model::creators::{conditional_on, prior};
use crate::tree::model::{BeliefTree, Outcome};

const IDENTIFIERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Randomly shaped tree with random tables, reproducible from its seed.
/// Each node after the first picks a uniformly random earlier node as parent.
pub struct RandomTree {
    pub nodes: usize,
    pub seed: u64,
}

impl RandomTree {
    pub fn max_nodes() -> usize {
        IDENTIFIERS.len()
    }
}

fn probability(rng: &mut StdRng) -> f64 {
    rng.gen_range(0.05..0.95)
}

impl ScenarioMaker for RandomTree {
    fn name(&self) -> &str {
        "random"
    }

    fn build_tree(&self) -> Result<BeliefTree> {
        if self.nodes == 0 || self.nodes > Self::max_nodes() {
            return Err(PropagationError::InvalidTopology(format!(
                "random tree needs between 1 and {} nodes, got {}",
                Self::max_nodes(),
                self.nodes
            )));
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut tree = BeliefTree::new();
        let mut ids = Vec::with_capacity(self.nodes);
        for (i, identifier) in IDENTIFIERS.chars().take(self.nodes).enumerate() {
            let label = format!("Random event {}", identifier);
            if i == 0 {
                let p = probability(&mut rng);
                ids.push(tree.add_node(label, identifier, prior(1.0 - p, p))?);
                continue;
            }
            let table = conditional_on(probability(&mut rng), probability(&mut rng));
            let id = tree.add_node(label, identifier, table)?;
            let parent = ids[rng.gen_range(0..i)];
            tree.attach_child(parent, id)?;
            ids.push(id);
        }
        debug!("built random tree with {} nodes from seed {}", self.nodes, self.seed);
        Ok(tree)
    }

    /// The last generated node is observed as present.
    fn default_evidence(&self) -> Vec<(char, Outcome)> {
        IDENTIFIERS
            .chars()
            .take(self.nodes)
            .last()
            .map(|identifier| vec![(identifier, Outcome::Present)])
            .unwrap_or_default()
    }
}
