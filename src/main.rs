use anyhow::{Context, Result};
use bayestree::tree::common::setup::{CommandLineOptions, OutputFormat, parse_configuration_options};
use bayestree::tree::common::{NetworkFile, NodeReport, report_tree};
use bayestree::tree::scenarios::ScenarioMakerFactory;
use bayestree::tree::{BeliefNetwork, BeliefTree, Outcome};
use bayestree::{print_blue, print_green, print_red, print_yellow};
use log::info;

fn emit(options: &CommandLineOptions, stage: &str, reports: &[NodeReport]) -> Result<()> {
    match options.format {
        OutputFormat::Text => {
            print_blue!("**{}**\n", stage);
            for report in reports {
                println!("{}\n", report);
            }
        }
        OutputFormat::Json => {
            let document = serde_json::json!({ "stage": stage, "nodes": reports });
            println!(
                "{}",
                serde_json::to_string_pretty(&document).context("Failed to serialize reports")?
            );
        }
    }
    Ok(())
}

fn load(options: &CommandLineOptions) -> Result<(BeliefTree, Vec<(char, Outcome)>)> {
    if let Some(path) = &options.network_file {
        let file = NetworkFile::load(path)?;
        return Ok((file.build_tree()?, file.evidence()));
    }
    let scenario = ScenarioMakerFactory::from_options(options).with_context(|| {
        format!(
            "Available scenarios: {}",
            ScenarioMakerFactory::names().join(", ")
        )
    })?;
    info!("Running scenario: {}", scenario.name());
    Ok((scenario.build_tree()?, scenario.default_evidence()))
}

fn run(options: &CommandLineOptions) -> Result<()> {
    let (tree, default_evidence) = load(options)?;
    let evidence = if options.evidence.is_empty() {
        default_evidence
    } else {
        options.evidence.clone()
    };

    let root = tree.root()?;
    if !options.quiet {
        emit(options, "Before initialization", &report_tree(&tree, root)?)?;
    }

    let mut network = BeliefNetwork::with_root(tree, root)?;
    if !options.quiet {
        emit(options, "After initialization", &network.report()?)?;
    }

    for &(identifier, outcome) in &evidence {
        if options.format == OutputFormat::Text {
            print_yellow!("Instantiating {} as {}", identifier, outcome);
        }
        network.observe(identifier, outcome)?;
    }
    if !evidence.is_empty() || options.quiet {
        emit(options, "After instantiation", &network.report()?)?;
    }

    if let Some(path) = &options.export_file {
        NetworkFile::from_tree(network.tree(), network.root(), &evidence)?.save(path)?;
        if options.format == OutputFormat::Text {
            print_green!("Network written to {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let options = parse_configuration_options()?;
    if let Err(e) = run(&options) {
        print_red!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
