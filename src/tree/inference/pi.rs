//! Causal support flowing downward from the evidence above a node.

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::Node;
use crate::tree::model::objects::{Pair, one_hot, one_hot_outcome};

/// Message a parent with belief `parent_belief` sends to `node`.
///
/// Hard parent evidence is passed through unchanged. Otherwise the parent's
/// belief has this child's own contribution, its last lambda message, divided
/// back out.
pub fn pi_message(node: &Node, parent_belief: &Pair) -> Result<Pair> {
    if let Some(outcome) = one_hot_outcome(parent_belief) {
        return Ok(one_hot(outcome));
    }
    let divisor = node.lambda_message;
    if divisor[0] == 0.0 || divisor[1] == 0.0 {
        return Err(PropagationError::UndefinedPiMessage {
            identifier: node.identifier(),
        });
    }
    Ok([parent_belief[0] / divisor[0], parent_belief[1] / divisor[1]])
}

/// `pi[i] = sum_j P(node = i | parent = j) * pi_message[j]`.
pub fn pi_value(node: &Node) -> Result<Pair> {
    let rows = node
        .table()
        .conditional()
        .ok_or(PropagationError::TableMismatch {
            identifier: node.identifier(),
            expected: "conditional",
        })?;
    let msg = node.pi_message;
    Ok([
        rows[0][0] * msg[0] + rows[0][1] * msg[1],
        rows[1][0] * msg[0] + rows[1][1] * msg[1],
    ])
}
