pub mod errors;
pub mod interface;
#[macro_use]
pub mod logging;
pub mod lookup;
pub mod network_file;
pub mod report;
pub mod setup;

pub use errors::{PropagationError, Result};
pub use interface::ScenarioMaker;
pub use network_file::NetworkFile;
pub use report::{NodeReport, report_node, report_tree};
