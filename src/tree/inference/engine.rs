//! Initialization and evidence propagation over a `BeliefTree`.
//!
//! Both passes walk the tree with explicit worklists: downward passes visit
//! nodes in pre-order, the upward pass climbs leaf-to-root one parent at a
//! time. Call-stack usage does not depend on tree depth.

use log::{debug, info, trace};

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::objects::{Outcome, Pair, VACUOUS, one_hot};
use crate::tree::model::{BeliefTree, NodeId};

use super::{belief, lambda, pi};

/// Seeds prior beliefs over the tree hanging from `root`.
///
/// Every lambda value and message becomes `(1, 1)`, the root's belief and pi
/// value come straight from its prior, and pi messages flow down to every
/// node. Nodes already pinned to one outcome are not perturbed and their
/// subtrees are left alone.
pub fn initialize(tree: &mut BeliefTree, root: NodeId) -> Result<()> {
    let root_node = tree.node(root)?;
    if let Some(parent) = root_node.parent() {
        return Err(PropagationError::InvalidTopology(format!(
            "can only initialize from the root of a tree; '{}' has parent '{}'",
            root_node.identifier(),
            tree.node(parent)?.identifier()
        )));
    }
    let prior = *root_node
        .table()
        .prior()
        .ok_or(PropagationError::TableMismatch {
            identifier: root_node.identifier(),
            expected: "prior",
        })?;
    info!(
        "initializing tree from root '{}' ({})",
        root_node.identifier(),
        root_node.label()
    );

    for id in tree.pre_order(root)? {
        let node = tree.node_mut(id)?;
        node.lambda_value = VACUOUS;
        node.lambda_message = VACUOUS;
    }

    let root_node = tree.node_mut(root)?;
    root_node.belief = prior;
    root_node.pi_value = prior;
    root_node.evidence = None;

    let children = tree.children(root)?.to_vec();
    send_pi_messages(tree, root, children)?;
    tree.mark_initialized();
    Ok(())
}

/// Fixes `id` to `outcome` and re-equilibrates every belief in its tree.
///
/// Instantiating a node again with the same outcome is allowed and repeats the
/// whole pass; switching an instantiated node to the other outcome is rejected
/// since evidence cannot be retracted.
pub fn instantiate(tree: &mut BeliefTree, id: NodeId, outcome: Outcome) -> Result<()> {
    if !tree.is_initialized() {
        return Err(PropagationError::NotInitialized);
    }
    let node = tree.node_mut(id)?;
    if let Some(existing) = node.evidence {
        if existing != outcome {
            return Err(PropagationError::ConflictingEvidence {
                identifier: node.identifier(),
                existing,
                requested: outcome,
            });
        }
    }
    info!("instantiating '{}' ({}) as {}", node.identifier(), node.label(), outcome);
    node.evidence = Some(outcome);
    node.belief = one_hot(outcome);
    refresh_lambda_value(tree, id)?;

    // (ancestor, child the update arrived from), bottom-up
    let mut climbed: Vec<(NodeId, NodeId)> = Vec::new();
    let mut child = id;
    while let Some(parent) = tree.node(child)?.parent() {
        let message = lambda::lambda_message(tree.node(child)?)?;
        let child_node = tree.node_mut(child)?;
        child_node.lambda_message = message;
        trace!("lambda message {} -> parent: {:?}", child_node.identifier(), message);

        if tree.node(parent)?.is_determined() {
            debug!("upward pass stops at determined node '{}'", tree.node(parent)?.identifier());
            break;
        }
        refresh_lambda_value(tree, parent)?;
        update_belief(tree, parent)?;
        climbed.push((parent, child));
        child = parent;
    }

    for (ancestor, arrived_from) in climbed.into_iter().rev() {
        let siblings: Vec<NodeId> = tree
            .children(ancestor)?
            .iter()
            .copied()
            .filter(|&c| c != arrived_from)
            .collect();
        send_pi_messages(tree, ancestor, siblings)?;
    }

    let children = tree.children(id)?.to_vec();
    send_pi_messages(tree, id, children)
}

/// Downward pass: `from` sends pi messages to `targets`, and each target that
/// is not pinned recomputes its belief and forwards to its own children.
fn send_pi_messages(tree: &mut BeliefTree, from: NodeId, targets: Vec<NodeId>) -> Result<()> {
    let mut stack: Vec<(NodeId, NodeId)> = targets.into_iter().rev().map(|c| (c, from)).collect();
    while let Some((id, parent)) = stack.pop() {
        let parent_belief = tree.node(parent)?.belief;
        let node = tree.node_mut(id)?;
        let message = pi::pi_message(node, &parent_belief)?;
        node.pi_message = message;
        trace!("pi message -> {}: {:?}", node.identifier(), message);

        if node.is_determined() {
            debug!("downward pass stops at determined node '{}'", node.identifier());
            continue;
        }
        let value = pi::pi_value(node)?;
        node.pi_value = value;
        stack.extend(node.children().iter().rev().map(|&c| (c, id)));
        update_belief(tree, id)?;
    }
    Ok(())
}

fn refresh_lambda_value(tree: &mut BeliefTree, id: NodeId) -> Result<()> {
    let node = tree.node(id)?;
    let messages = node
        .children()
        .iter()
        .map(|&c| tree.node(c).map(|child| child.lambda_message))
        .collect::<Result<Vec<Pair>>>()?;
    let value = lambda::lambda_value(node, &messages);
    tree.node_mut(id)?.lambda_value = value;
    Ok(())
}

fn update_belief(tree: &mut BeliefTree, id: NodeId) -> Result<()> {
    let node = tree.node_mut(id)?;
    let posterior = belief::posterior_belief(node)?;
    node.belief = posterior;
    debug!("belief of '{}' is now {:?}", node.identifier(), posterior);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::model::creators::{conditional, prior};

    fn drug_study() -> (BeliefTree, NodeId, NodeId) {
        let mut tree = BeliefTree::new();
        let d = tree.add_node("Being in drug study", 'D', prior(0.9, 0.1)).unwrap();
        let c = tree
            .add_node("Patient cured", 'C', conditional([0.5, 0.25], [0.5, 0.75]))
            .unwrap();
        tree.attach_child(d, c).unwrap();
        (tree, d, c)
    }

    #[test]
    fn test_initialize_sets_priors() {
        let (mut tree, d, c) = drug_study();
        initialize(&mut tree, d).unwrap();
        assert_eq!(tree.belief(d).unwrap(), [0.9, 0.1]);
        let cured = tree.node(c).unwrap();
        assert!((cured.belief[0] - 0.475).abs() < 1e-12);
        assert!((cured.belief[1] - 0.525).abs() < 1e-12);
        assert_eq!(cured.lambda_value, VACUOUS);
        assert_eq!(cured.pi_message, [0.9, 0.1]);
    }

    #[test]
    fn test_initialize_rejects_non_root() {
        let (mut tree, _, c) = drug_study();
        assert!(matches!(initialize(&mut tree, c), Err(PropagationError::InvalidTopology(_))));
        assert!(!tree.is_initialized());
    }

    #[test]
    fn test_instantiate_leaf_updates_root() {
        let (mut tree, d, c) = drug_study();
        initialize(&mut tree, d).unwrap();
        instantiate(&mut tree, c, Outcome::Present).unwrap();
        assert_eq!(tree.belief(c).unwrap(), [0.0, 1.0]);
        assert_eq!(tree.node(c).unwrap().lambda_message, [0.5, 0.75]);
        let drug = tree.belief(d).unwrap();
        assert!((drug[0] - 0.45 / 0.525).abs() < 1e-12);
        assert!((drug[1] - 0.075 / 0.525).abs() < 1e-12);
    }

    #[test]
    fn test_instantiate_requires_initialization() {
        let (mut tree, _, c) = drug_study();
        assert_eq!(
            instantiate(&mut tree, c, Outcome::Absent),
            Err(PropagationError::NotInitialized)
        );
    }
}
