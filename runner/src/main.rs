mod charts;
mod cli;
mod config;
mod experiments;
mod style;

#[cfg(test)]
mod cli_test;
#[cfg(test)]
mod config_test;

use clap::Parser;
use cli::Cli;
use config::ReportConfig;
use experiments::Report;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // tables go to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match ReportConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => ReportConfig::default(),
    };
    config.apply_overrides(cli.results.clone(), cli.output.clone());

    if config.preflight_checks(cli.expr) {
        error!("Preflight checks failed for experiment {:?}", cli.expr);
        return ExitCode::FAILURE;
    }

    style::prepare_style(&config.style);

    let report = Report::load(&config);
    if let Err(e) = report.execute(cli.expr, &mut std::io::stdout().lock()) {
        error!("Experiment {:?} failed: {e}", cli.expr);
        return ExitCode::FAILURE;
    }

    info!("Experiment {:?} done", cli.expr);
    ExitCode::SUCCESS
}
