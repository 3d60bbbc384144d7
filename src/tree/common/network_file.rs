//! JSON description of a tree network, optionally with evidence to apply.
//!
//! ```json
//! {
//!   "nodes": [
//!     {"identifier": "D", "label": "Being in drug study", "table": [0.9, 0.1]},
//!     {"identifier": "C", "label": "Patient cured", "parent": "D",
//!      "table": [[0.5, 0.25], [0.5, 0.75]]}
//!   ],
//!   "evidence": [{"identifier": "C", "outcome": 1}]
//! }
//! ```

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::inference::BeliefNetwork;
use crate::tree::model::{BeliefTree, NodeId, Outcome, ProbabilityTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub identifier: char,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<char>,
    pub table: ProbabilityTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSpec {
    pub identifier: char,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub evidence: Vec<EvidenceSpec>,
}

impl NetworkFile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse network description")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("Loading network from file: {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read network file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid network file {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize network")?;
        fs::write(path, json).with_context(|| format!("Failed to write network file {}", path.display()))
    }

    /// Describes the tree under `root`, nodes in pre-order.
    pub fn from_tree(tree: &BeliefTree, root: NodeId, evidence: &[(char, Outcome)]) -> Result<Self> {
        let nodes = tree
            .pre_order(root)?
            .into_iter()
            .map(|id| -> Result<NodeSpec> {
                let node = tree.node(id)?;
                let parent = match node.parent() {
                    Some(parent) => Some(tree.node(parent)?.identifier()),
                    None => None,
                };
                Ok(NodeSpec {
                    identifier: node.identifier(),
                    label: node.label().to_string(),
                    parent,
                    table: *node.table(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let evidence = evidence
            .iter()
            .map(|&(identifier, outcome)| EvidenceSpec { identifier, outcome })
            .collect();
        Ok(NetworkFile { nodes, evidence })
    }

    /// Builds and validates the described tree without initializing it.
    ///
    /// Unlike the engine, this checks every table is a proper distribution,
    /// every parent exists and exactly one node is parentless.
    pub fn build_tree(&self) -> Result<BeliefTree> {
        let mut tree = BeliefTree::new();
        for spec in &self.nodes {
            spec.table.validate(spec.identifier)?;
            tree.add_node(spec.label.clone(), spec.identifier, spec.table)?;
        }
        for spec in &self.nodes {
            let Some(parent) = spec.parent else { continue };
            let parent_id = tree.id_of(parent).ok_or_else(|| {
                PropagationError::InvalidTopology(format!(
                    "node '{}' names unknown parent '{}'",
                    spec.identifier, parent
                ))
            })?;
            let child_id = tree
                .id_of(spec.identifier)
                .ok_or(PropagationError::IdentifierNotFound(spec.identifier))?;
            tree.attach_child(parent_id, child_id)?;
        }
        let root = tree.root()?;
        let root_node = tree.node(root)?;
        if root_node.table().prior().is_none() {
            return Err(PropagationError::TableMismatch {
                identifier: root_node.identifier(),
                expected: "prior",
            });
        }
        Ok(tree)
    }

    /// Builds, initializes and applies the listed evidence in order.
    pub fn build_network(&self) -> Result<BeliefNetwork> {
        let mut network = BeliefNetwork::new(self.build_tree()?)?;
        network.observe_all(&self.evidence())?;
        Ok(network)
    }

    pub fn evidence(&self) -> Vec<(char, Outcome)> {
        self.evidence.iter().map(|e| (e.identifier, e.outcome)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRUG_STUDY: &str = r#"{
        "nodes": [
            {"identifier": "D", "label": "Being in drug study", "table": [0.9, 0.1]},
            {"identifier": "C", "label": "Patient cured", "parent": "D",
             "table": [[0.5, 0.25], [0.5, 0.75]]}
        ],
        "evidence": [{"identifier": "c", "outcome": 1}]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let file = NetworkFile::from_json(DRUG_STUDY).unwrap();
        assert_eq!(file.nodes.len(), 2);
        assert_eq!(file.evidence(), vec![('c', Outcome::Present)]);

        let network = file.build_network().unwrap();
        let drug = network.belief('D').unwrap();
        assert!((drug[0] - 0.857).abs() < 1e-3);
        assert!((drug[1] - 0.143).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_bad_outcome_and_unknown_parent() {
        let bad_outcome = DRUG_STUDY.replace("\"outcome\": 1", "\"outcome\": 3");
        assert!(NetworkFile::from_json(&bad_outcome).is_err());

        let orphan = DRUG_STUDY.replace("\"parent\": \"D\"", "\"parent\": \"X\"");
        let file = NetworkFile::from_json(&orphan).unwrap();
        assert!(matches!(file.build_tree(), Err(PropagationError::InvalidTopology(_))));
    }

    #[test]
    fn test_rejects_invalid_tables_and_forests() {
        let skewed = DRUG_STUDY.replace("[0.9, 0.1]", "[0.9, 0.2]");
        let file = NetworkFile::from_json(&skewed).unwrap();
        assert!(matches!(
            file.build_tree(),
            Err(PropagationError::InvalidTable { identifier: 'D', .. })
        ));

        let forest = DRUG_STUDY.replace(", \"parent\": \"D\"", "");
        let file = NetworkFile::from_json(&forest).unwrap();
        assert!(matches!(file.build_tree(), Err(PropagationError::InvalidTopology(_))));
    }
}
