use crate::experiments::Experiment;
use clap::Parser;
use std::path::PathBuf;

/// Render charts and LaTeX tables from VPIR benchmark results
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// experiment to plot
    #[arg(short, long, value_enum)]
    pub expr: Experiment,

    /// YAML config, defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// directory holding the `<scheme>.json` result files, overrides the config
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// directory charts are written to, overrides the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
