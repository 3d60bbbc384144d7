use std::rc::Rc;

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::common::interface::ScenarioMaker;
use crate::tree::common::setup::CommandLineOptions;

use super::{cheating_spouse::CheatingSpouse, drug_study::DrugStudy, random_tree::RandomTree};

pub const DEFAULT_RANDOM_NODES: usize = 8;
pub const DEFAULT_RANDOM_SEED: u64 = 42;

pub struct ScenarioMakerFactory;

impl ScenarioMakerFactory {
    pub fn names() -> &'static [&'static str] {
        &["drug_study", "cheating_spouse", "random"]
    }

    pub fn new_shared(name: &str) -> Result<Rc<dyn ScenarioMaker>> {
        Self::new_configured(name, DEFAULT_RANDOM_NODES, DEFAULT_RANDOM_SEED)
    }

    pub fn from_options(options: &CommandLineOptions) -> Result<Rc<dyn ScenarioMaker>> {
        Self::new_configured(&options.scenario_name, options.random_nodes, options.seed)
    }

    fn new_configured(name: &str, nodes: usize, seed: u64) -> Result<Rc<dyn ScenarioMaker>> {
        match name {
            "drug_study" => Ok(Rc::new(DrugStudy {})),
            "cheating_spouse" => Ok(Rc::new(CheatingSpouse {})),
            "random" => Ok(Rc::new(RandomTree { nodes, seed })),
            _ => Err(PropagationError::UnknownScenario(name.to_string())),
        }
    }
}
