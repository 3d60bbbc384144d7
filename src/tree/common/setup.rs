use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum, builder::EnumValueParser, value_parser};
use env_logger::{Builder, Env};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::tree::common::errors::{PropagationError, Result};
use crate::tree::model::Outcome;

pub const DEFAULT_SCENARIO: &str = "drug_study";

/// How node reports are written to stdout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Human readable blocks, one per node
    #[serde(rename = "text")]
    Text,

    /// One JSON document per stage
    #[serde(rename = "json")]
    Json,
}

/// These options define the inputs from the user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommandLineOptions {
    pub scenario_name: String,
    pub network_file: Option<PathBuf>,
    pub evidence: Vec<(char, Outcome)>,
    pub format: OutputFormat,
    pub random_nodes: usize,
    pub seed: u64,
    pub export_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Parses `C=1`, `c=true`, `A=absent` into an identifier and outcome.
pub fn parse_evidence(text: &str) -> Result<(char, Outcome)> {
    let invalid = || PropagationError::InvalidOutcome(text.to_string());
    let (identifier, outcome) = text.split_once('=').ok_or_else(invalid)?;
    let mut chars = identifier.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(identifier), None) => Ok((identifier, outcome.parse()?)),
        _ => Err(invalid()),
    }
}

fn evidence_value_parser(text: &str) -> std::result::Result<(char, Outcome), String> {
    parse_evidence(text).map_err(|e| e.to_string())
}

/// Installs the `env_logger` backend; `RUST_LOG` overrides the `info` default.
/// Panics if a logger is already installed, so call it once per process.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .init();
}

pub fn build_command() -> Command {
    Command::new("BAYESTREE")
        .version("1.0")
        .about("Exact belief propagation over tree-shaped networks of binary variables.")
        .arg(
            Arg::new("scenario")
                .long("scenario")
                .value_name("NAME")
                .help("Built-in network to run: drug_study, cheating_spouse or random")
                .conflicts_with("network"),
        )
        .arg(
            Arg::new("network")
                .long("network")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("JSON network description to load instead of a built-in scenario"),
        )
        .arg(
            Arg::new("evidence")
                .long("evidence")
                .short('e')
                .value_name("ID=OUTCOME")
                .value_parser(evidence_value_parser)
                .action(ArgAction::Append)
                .help("Instantiate a node, e.g. C=1; repeatable, replaces the scenario's own evidence"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(EnumValueParser::<OutputFormat>::new())
                .help("Report format: 'text' or 'json'")
                .default_value("text"),
        )
        .arg(
            Arg::new("nodes")
                .long("nodes")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Number of nodes in the random scenario")
                .default_value("8"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .value_parser(value_parser!(u64))
                .help("Seed for the random scenario")
                .default_value("42"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write the network and applied evidence as JSON"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only print the final state of the tree")
                .action(ArgAction::SetTrue),
        )
}

fn options_from_matches(matches: &ArgMatches) -> anyhow::Result<CommandLineOptions> {
    let scenario_name = matches
        .get_one::<String>("scenario")
        .cloned()
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());
    let network_file = matches.get_one::<PathBuf>("network").cloned();
    let evidence = matches
        .get_many::<(char, Outcome)>("evidence")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Text);
    let random_nodes = *matches
        .get_one::<usize>("nodes")
        .context("nodes has a default value")?;
    let seed = *matches
        .get_one::<u64>("seed")
        .context("seed has a default value")?;
    let export_file = matches.get_one::<PathBuf>("export").cloned();
    let quiet = matches.get_flag("quiet");

    Ok(CommandLineOptions {
        scenario_name,
        network_file,
        evidence,
        format,
        random_nodes,
        seed,
        export_file,
        quiet,
    })
}

/// Parses an explicit argument list; the first item is the program name.
pub fn parse_configuration_from<I, T>(args: I) -> anyhow::Result<CommandLineOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    options_from_matches(&matches)
}

pub fn parse_configuration_options() -> anyhow::Result<CommandLineOptions> {
    init_logging();
    options_from_matches(&build_command().get_matches())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = parse_configuration_from(["bayestree"]).unwrap();
        assert_eq!(options.scenario_name, DEFAULT_SCENARIO);
        assert_eq!(options.network_file, None);
        assert!(options.evidence.is_empty());
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.random_nodes, 8);
        assert_eq!(options.seed, 42);
        assert!(!options.quiet);
    }

    #[test]
    fn test_evidence_and_format() {
        let options = parse_configuration_from([
            "bayestree",
            "--scenario",
            "cheating_spouse",
            "-e",
            "C=1",
            "--evidence",
            "d=false",
            "--format",
            "json",
            "-q",
        ])
        .unwrap();
        assert_eq!(options.scenario_name, "cheating_spouse");
        assert_eq!(
            options.evidence,
            vec![('C', Outcome::Present), ('d', Outcome::Absent)]
        );
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.quiet);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_configuration_from(["bayestree", "-e", "C=2"]).is_err());
        assert!(parse_configuration_from(["bayestree", "-e", "CD=1"]).is_err());
        assert!(
            parse_configuration_from(["bayestree", "--scenario", "x", "--network", "n.json"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_evidence() {
        assert_eq!(parse_evidence("C=1"), Ok(('C', Outcome::Present)));
        assert_eq!(parse_evidence(" b = absent"), Ok(('b', Outcome::Absent)));
        assert!(parse_evidence("C").is_err());
        assert!(parse_evidence("=1").is_err());
    }
}
