use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::{Node, Pair};

/// Normalized `lambda * pi` for `node`.
pub fn posterior_belief(node: &Node) -> Result<Pair> {
    let absent = node.lambda_value[0] * node.pi_value[0];
    let present = node.lambda_value[1] * node.pi_value[1];
    let total = absent + present;
    if total == 0.0 {
        return Err(PropagationError::DegenerateNormalization {
            identifier: node.identifier(),
        });
    }
    if total != 1.0 {
        // plain division keeps a zero component's partner at exactly 1.0
        return Ok([absent / total, present / total]);
    }
    Ok([absent, present])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::model::creators::prior;

    #[test]
    fn test_posterior_normalizes() {
        let mut node = Node::new("Being in drug study", 'D', prior(0.9, 0.1));
        node.pi_value = [0.9, 0.1];
        node.lambda_value = [0.5, 0.75];
        let belief = posterior_belief(&node).unwrap();
        assert!((belief[0] - 0.45 / 0.525).abs() < 1e-12);
        assert!((belief[0] + belief[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_posterior_keeps_exact_distribution() {
        let mut node = Node::new("n", 'N', prior(0.25, 0.75));
        node.pi_value = [0.25, 0.75];
        node.lambda_value = [1.0, 1.0];
        assert_eq!(posterior_belief(&node).unwrap(), [0.25, 0.75]);

        node.lambda_value = [0.0, 0.3];
        assert_eq!(posterior_belief(&node).unwrap(), [0.0, 1.0]);
    }

    #[test]
    fn test_posterior_degenerate() {
        let mut node = Node::new("n", 'N', prior(1.0, 0.0));
        node.pi_value = [1.0, 0.0];
        node.lambda_value = [0.0, 1.0];
        assert_eq!(
            posterior_belief(&node),
            Err(PropagationError::DegenerateNormalization { identifier: 'N' })
        );
    }
}
