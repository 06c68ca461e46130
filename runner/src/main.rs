use anyhow::Context;
use tracing::{error, info};

use processor::{format_reports, Outcome, Processor, Report};

mod config;
mod dataset;
mod logging;

use config::{Config, ReportFormat};

/// Turn outcomes into reports, logging and skipping the policies that failed.
fn reports(outcomes: Vec<Outcome>) -> Vec<Report> {
    outcomes
        .into_iter()
        .filter_map(|outcome| {
            match outcome.result.and_then(|schedule| Report::new(&schedule)) {
                Ok(report) => Some(report),
                Err(err) => {
                    error!(policy = outcome.policy.as_str(), error = %err, "skipping report");
                    None
                }
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    let processes = match &config.dataset {
        Some(path) => dataset::load(path)?,
        None => dataset::demo(),
    };
    info!(
        processes = processes.len(),
        policies = config.policies.len(),
        quantum = config.quantum,
        "starting simulation"
    );

    let outcomes = Processor::run_all(&processes, &config.policies, Some(config.quantum));
    let reports = reports(outcomes);

    match config.format {
        ReportFormat::Text => print!("{}", format_reports(&reports)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
