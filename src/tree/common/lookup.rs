use log::trace;

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::{BeliefTree, NodeId};

/// Finds the node under `root` whose identifier matches, ignoring case.
///
/// Every subtree is searched in pre-order; an unknown identifier is reported as
/// `IdentifierNotFound` rather than ignored.
pub fn find_node(tree: &BeliefTree, root: NodeId, identifier: char) -> Result<NodeId> {
    tree.check(root)?;
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.node(id)?;
        if node.matches_identifier(identifier) {
            trace!("find_node - '{}' resolved to {}", identifier, id);
            return Ok(id);
        }
        stack.extend(node.children().iter().rev());
    }
    Err(PropagationError::IdentifierNotFound(identifier))
}
