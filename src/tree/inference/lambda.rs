//! Diagnostic support flowing upward from the evidence below a node.

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::Node;
use crate::tree::model::objects::{Pair, VACUOUS, one_hot, one_hot_outcome};

/// Message from `node` to its parent, expressed over the parent's outcomes:
/// `msg[j] = sum_i P(node = i | parent = j) * lambda(node = i)`.
pub fn lambda_message(node: &Node) -> Result<Pair> {
    let rows = node
        .table()
        .conditional()
        .ok_or(PropagationError::TableMismatch {
            identifier: node.identifier(),
            expected: "conditional",
        })?;
    let lambda = node.lambda_value;
    Ok([
        rows[0][0] * lambda[0] + rows[1][0] * lambda[1],
        rows[0][1] * lambda[0] + rows[1][1] * lambda[1],
    ])
}

/// Scales `pair` so its larger component is 1. Lambda only matters up to a
/// constant factor, and a long product of messages would otherwise underflow.
fn rescale(pair: Pair) -> Pair {
    let largest = pair[0].max(pair[1]);
    if largest > 0.0 {
        [pair[0] / largest, pair[1] / largest]
    } else {
        pair
    }
}

/// Lambda value of `node` given the messages its children last sent.
///
/// A node whose belief is pinned keeps the pinned pair; otherwise the value is
/// the elementwise product of the children's messages, `(1, 1)` for a leaf,
/// rescaled after every factor so the larger component is 1.
pub fn lambda_value<'a, I>(node: &Node, child_messages: I) -> Pair
where
    I: IntoIterator<Item = &'a Pair>,
{
    if let Some(outcome) = one_hot_outcome(&node.belief) {
        return one_hot(outcome);
    }
    child_messages
        .into_iter()
        .fold(VACUOUS, |acc, msg| rescale([acc[0] * msg[0], acc[1] * msg[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::model::creators::{conditional, prior};

    #[test]
    fn test_lambda_message_maps_into_parent_space() {
        let mut cured = Node::new("Patient cured", 'C', conditional([0.5, 0.25], [0.5, 0.75]));
        cured.lambda_value = [0.0, 1.0];
        assert_eq!(lambda_message(&cured).unwrap(), [0.5, 0.75]);

        cured.lambda_value = VACUOUS;
        assert_eq!(lambda_message(&cured).unwrap(), [1.0, 1.0]);
    }

    #[test]
    fn test_lambda_message_needs_conditional_table() {
        let root = Node::new("root", 'R', prior(0.9, 0.1));
        assert!(matches!(
            lambda_message(&root),
            Err(PropagationError::TableMismatch { identifier: 'R', .. })
        ));
    }

    #[test]
    fn test_lambda_value_products_and_collapse() {
        let mut node = Node::new("n", 'N', conditional([0.5, 0.5], [0.5, 0.5]));
        node.belief = [0.4, 0.6];
        assert_eq!(lambda_value(&node, &[]), VACUOUS);
        let product = lambda_value(&node, &[[0.5, 0.75], [2.0, 0.5]]);
        assert_eq!(product[0], 1.0);
        assert!((product[1] - 0.375).abs() < 1e-12);

        node.belief = [1.0, 0.0];
        assert_eq!(lambda_value(&node, &[[0.5, 0.75]]), [1.0, 0.0]);
    }

    #[test]
    fn test_lambda_value_survives_many_children() {
        let mut node = Node::new("n", 'N', conditional([0.5, 0.5], [0.5, 0.5]));
        node.belief = [0.4, 0.6];
        let messages = vec![[0.5, 0.5]; 2000];
        assert_eq!(lambda_value(&node, &messages), VACUOUS);

        let skewed = vec![[0.3, 0.6]; 20];
        let value = lambda_value(&node, &skewed);
        assert_eq!(value[1], 1.0);
        assert!((value[0] - 0.5f64.powi(20)).abs() < 1e-15);
        assert_eq!(lambda_value(&node, &[[0.0, 0.0]]), [0.0, 0.0]);
    }
}
