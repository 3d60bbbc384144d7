use log::trace;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::tree::common::errors::{PropagationError, Result};

use super::objects::{Outcome, Pair, ProbabilityTable, is_one_hot};

/// Index of a node inside the `BeliefTree` arena that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One binary random variable together with the algorithm's working vectors.
#[derive(Debug, Clone)]
pub struct Node {
    identifier: char,
    label: String,
    table: ProbabilityTable,
    /// Posterior `(P'(absent), P'(present))`.
    pub belief: Pair,
    pub pi_value: Pair,
    pub pi_message: Pair,
    pub lambda_value: Pair,
    pub lambda_message: Pair,
    pub(crate) evidence: Option<Outcome>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn new(label: impl Into<String>, identifier: char, table: ProbabilityTable) -> Self {
        Node {
            identifier,
            label: label.into(),
            table,
            belief: [0.0, 0.0],
            pi_value: [0.0, 0.0],
            pi_message: [0.0, 0.0],
            lambda_value: [0.0, 0.0],
            lambda_message: [0.0, 0.0],
            evidence: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn identifier(&self) -> char {
        self.identifier
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The outcome this node was instantiated to, if any.
    pub fn evidence(&self) -> Option<Outcome> {
        self.evidence
    }

    /// True once the belief is pinned to `(1, 0)` or `(0, 1)`.
    pub fn is_determined(&self) -> bool {
        is_one_hot(&self.belief)
    }

    /// Case-insensitive identifier comparison.
    pub fn matches_identifier(&self, identifier: char) -> bool {
        self.identifier.to_lowercase().eq(identifier.to_lowercase())
    }
}

fn identifier_key(identifier: char) -> String {
    identifier.to_lowercase().collect()
}

/// Arena owning every node of a tree. Children are owned top-down through the
/// arena; the parent link is a plain index.
#[derive(Debug, Clone, Default)]
pub struct BeliefTree {
    nodes: Vec<Node>,
    identifiers: HashMap<String, NodeId>,
    initialized: bool,
}

impl BeliefTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        identifier: char,
        table: ProbabilityTable,
    ) -> Result<NodeId> {
        let key = identifier_key(identifier);
        if self.identifiers.contains_key(&key) {
            return Err(PropagationError::DuplicateIdentifier(identifier));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(label, identifier, table));
        self.identifiers.insert(key, id);
        trace!("BeliefTree::add_node - '{}' as {}", identifier, id);
        Ok(id)
    }

    /// Appends `child` to `parent`'s children and links it back.
    ///
    /// The shape is frozen once the tree has been initialized.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.initialized {
            return Err(PropagationError::InvalidTopology(
                "cannot attach children after initialization".to_string(),
            ));
        }
        let child_node = &self.nodes[child.0];
        if parent == child {
            return Err(PropagationError::InvalidTopology(format!(
                "node '{}' cannot be its own child",
                child_node.identifier
            )));
        }
        if let Some(existing) = child_node.parent {
            return Err(PropagationError::InvalidTopology(format!(
                "node '{}' already has parent '{}'",
                child_node.identifier, self.nodes[existing.0].identifier
            )));
        }
        if child_node.table.conditional().is_none() {
            return Err(PropagationError::TableMismatch {
                identifier: child_node.identifier,
                expected: "conditional",
            });
        }
        if self.is_ancestor(child, parent) {
            return Err(PropagationError::InvalidTopology(format!(
                "attaching '{}' under '{}' would create a cycle",
                child_node.identifier, self.nodes[parent.0].identifier
            )));
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Whether `ancestor` lies on the path from `node` up to its root (inclusive).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|n| n.parent);
        }
        false
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(PropagationError::UnknownNode(id))
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(PropagationError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(PropagationError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn belief(&self, id: NodeId) -> Result<Pair> {
        Ok(self.node(id)?.belief)
    }

    /// Constant-time identifier index maintained by `add_node`.
    pub fn id_of(&self, identifier: char) -> Option<NodeId> {
        self.identifiers.get(&identifier_key(identifier)).copied()
    }

    /// Every node without a parent.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
            .collect()
    }

    /// The single parentless node; fails if the arena holds a forest.
    pub fn root(&self) -> Result<NodeId> {
        match self.roots().as_slice() {
            [root] => Ok(*root),
            [] => Err(PropagationError::InvalidTopology("tree has no root".to_string())),
            many => Err(PropagationError::InvalidTopology(format!(
                "tree has {} parentless nodes",
                many.len()
            ))),
        }
    }

    /// Pre-order traversal of the subtree under `start`, children left to right.
    pub fn pre_order(&self, start: NodeId) -> Result<Vec<NodeId>> {
        self.check(start)?;
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        Ok(order)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}
