#[cfg(test)]
mod test_exact_posteriors {
    use bayestree::tree::common::ScenarioMaker;
    use bayestree::tree::model::ProbabilityTable;
    use bayestree::tree::scenarios::random_tree::RandomTree;
    use bayestree::{BeliefNetwork, BeliefTree, Outcome};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    /// Posterior P(node = 1 | evidence) for every node, by summing the joint.
    fn enumerate_posteriors(tree: &BeliefTree, evidence: &[(usize, usize)]) -> Vec<f64> {
        let n = tree.len();
        let nodes: Vec<_> = tree.nodes().map(|(_, node)| node).collect();
        let parents: Vec<Option<usize>> = nodes
            .iter()
            .map(|node| node.parent().map(|p| p.index()))
            .collect();

        let mut present = vec![0.0; n];
        let mut total = 0.0;
        for assignment in 0u32..(1 << n) {
            let value = |i: usize| ((assignment >> i) & 1) as usize;
            if evidence.iter().any(|&(i, outcome)| value(i) != outcome) {
                continue;
            }
            let mut joint = 1.0;
            for (i, node) in nodes.iter().enumerate() {
                joint *= match node.table() {
                    ProbabilityTable::Prior(pair) => pair[value(i)],
                    ProbabilityTable::Conditional(rows) => {
                        rows[value(i)][value(parents[i].unwrap())]
                    }
                };
            }
            total += joint;
            for (i, sum) in present.iter_mut().enumerate() {
                if value(i) == 1 {
                    *sum += joint;
                }
            }
        }
        present.into_iter().map(|p| p / total).collect()
    }

    fn check_seed(seed: u64, nodes: usize, observations: usize) {
        let tree = RandomTree { nodes, seed }.build_tree().unwrap();
        let identifiers: Vec<char> = tree.nodes().map(|(_, node)| node.identifier()).collect();
        let mut network = BeliefNetwork::new(tree).unwrap();

        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut order: Vec<usize> = (0..nodes).collect();
        order.shuffle(&mut rng);

        let mut evidence = Vec::new();
        for &i in order.iter().take(observations) {
            let outcome = rng.gen_range(0..2usize);
            network
                .observe(identifiers[i], Outcome::try_from(outcome as u8).unwrap())
                .unwrap();
            evidence.push((i, outcome));

            let expected = enumerate_posteriors(network.tree(), &evidence);
            for (i, identifier) in identifiers.iter().enumerate() {
                let actual = network.probability(*identifier).unwrap();
                assert!(
                    (actual - expected[i]).abs() < 1e-9,
                    "seed {} after {:?}: P({}=1) is {} but enumeration gives {}",
                    seed,
                    evidence,
                    identifier,
                    actual,
                    expected[i]
                );
            }
        }
    }

    #[test]
    fn test_prior_beliefs_match_enumeration() {
        for seed in 0..10 {
            let tree = RandomTree { nodes: 9, seed }.build_tree().unwrap();
            let network = BeliefNetwork::new(tree).unwrap();
            let expected = enumerate_posteriors(network.tree(), &[]);
            for ((_, node), p) in network.tree().nodes().zip(expected) {
                assert!((node.belief[1] - p).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_single_observation_matches_enumeration() {
        for seed in 0..20 {
            check_seed(seed, 8, 1);
        }
    }

    #[test]
    fn test_observation_sequences_match_enumeration() {
        for seed in 100..130 {
            check_seed(seed, 10, 4);
        }
    }

    #[test]
    fn test_observing_every_node() {
        check_seed(7, 6, 6);
    }
}
