//! Structured snapshots of node state, independent of how they are displayed.

use serde::Serialize;
use std::fmt;

use crate::tree::common::errors::Result;
use crate::tree::model::{BeliefTree, NodeId, Outcome, Pair, ProbabilityTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    /// Event in `P(C1|D0)` notation.
    pub event: String,
    pub probability: f64,
}

/// Everything the algorithm knows about one node at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub identifier: char,
    pub label: String,
    pub parent: Option<char>,
    pub table: Vec<TableEntry>,
    pub belief: Pair,
    pub pi_value: Pair,
    pub lambda_value: Pair,
    pub pi_message: Pair,
    pub lambda_message: Pair,
    pub evidence: Option<Outcome>,
}

fn table_entries(identifier: char, parent: Option<char>, table: &ProbabilityTable) -> Vec<TableEntry> {
    match table {
        ProbabilityTable::Prior(pair) => (0..2)
            .map(|i| TableEntry {
                event: format!("P({}{})", identifier, i),
                probability: pair[i],
            })
            .collect(),
        ProbabilityTable::Conditional(rows) => {
            let parent = parent.unwrap_or('?');
            let mut entries = Vec::with_capacity(4);
            for (i, row) in rows.iter().enumerate() {
                for (j, &probability) in row.iter().enumerate() {
                    entries.push(TableEntry {
                        event: format!("P({}{}|{}{})", identifier, i, parent, j),
                        probability,
                    });
                }
            }
            entries
        }
    }
}

pub fn report_node(tree: &BeliefTree, id: NodeId) -> Result<NodeReport> {
    let node = tree.node(id)?;
    let parent = match node.parent() {
        Some(parent) => Some(tree.node(parent)?.identifier()),
        None => None,
    };
    Ok(NodeReport {
        identifier: node.identifier(),
        label: node.label().to_string(),
        parent,
        table: table_entries(node.identifier(), parent, node.table()),
        belief: node.belief,
        pi_value: node.pi_value,
        lambda_value: node.lambda_value,
        pi_message: node.pi_message,
        lambda_message: node.lambda_message,
        evidence: node.evidence(),
    })
}

/// Reports for the whole subtree under `root`, in pre-order.
pub fn report_tree(tree: &BeliefTree, root: NodeId) -> Result<Vec<NodeReport>> {
    tree.pre_order(root)?
        .into_iter()
        .map(|id| report_node(tree, id))
        .collect()
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node: {}", self.identifier)?;
        writeln!(f, "Event: {}", self.label)?;
        for entry in &self.table {
            writeln!(f, "{} = {:.3}", entry.event, entry.probability)?;
        }
        writeln!(f, "P'({}0) = {:.3}", self.identifier, self.belief[0])?;
        writeln!(f, "P'({}1) = {:.3}", self.identifier, self.belief[1])?;
        if let Some(outcome) = self.evidence {
            writeln!(f, "Evidence: {}", outcome)?;
        }
        writeln!(f, "Pi value: ({:.3}, {:.3})", self.pi_value[0], self.pi_value[1])?;
        writeln!(f, "Lambda value: ({:.3}, {:.3})", self.lambda_value[0], self.lambda_value[1])?;
        writeln!(f, "Pi message: ({:.3}, {:.3})", self.pi_message[0], self.pi_message[1])?;
        write!(f, "Lambda message: ({:.3}, {:.3})", self.lambda_message[0], self.lambda_message[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::inference::engine::initialize;
    use crate::tree::model::creators::{conditional, prior};

    #[test]
    fn test_report_drug_study() {
        let mut tree = BeliefTree::new();
        let d = tree.add_node("Being in drug study", 'D', prior(0.9, 0.1)).unwrap();
        let c = tree
            .add_node("Patient cured", 'C', conditional([0.5, 0.25], [0.5, 0.75]))
            .unwrap();
        tree.attach_child(d, c).unwrap();
        initialize(&mut tree, d).unwrap();

        let reports = report_tree(&tree, d).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].parent, None);
        assert_eq!(reports[1].parent, Some('D'));
        let events: Vec<&str> = reports[1].table.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, vec!["P(C0|D0)", "P(C0|D1)", "P(C1|D0)", "P(C1|D1)"]);

        let text = reports[1].to_string();
        assert!(text.contains("P(C1|D1) = 0.750"));
        assert!(text.contains("P'(C1) = 0.525"));
        assert!(text.contains("Lambda value: (1.000, 1.000)"));
    }

    #[test]
    fn test_report_serializes() {
        let mut tree = BeliefTree::new();
        let a = tree.add_node("Spouse cheating", 'A', prior(0.9, 0.1)).unwrap();
        let json = serde_json::to_value(report_node(&tree, a).unwrap()).unwrap();
        assert_eq!(json["identifier"], "A");
        assert_eq!(json["table"][1]["event"], "P(A1)");
        assert!(json["evidence"].is_null());
    }
}
