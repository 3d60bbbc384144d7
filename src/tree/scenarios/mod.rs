pub mod cheating_spouse;
pub mod drug_study;
pub mod factory;
pub mod random_tree;

pub use factory::ScenarioMakerFactory;
