use crate::{cli::Cli, experiments::Experiment};
use clap::{error::ErrorKind, Parser};
use std::path::PathBuf;

#[test]
pub fn parse_experiment() {
    let cli = Cli::try_parse_from(["vpir-report", "-e", "performance"]).unwrap();

    assert_eq!(cli.expr, Experiment::Performance);
    assert!(cli.config.is_none());

    let cli = Cli::try_parse_from([
        "vpir-report",
        "--expr=single",
        "--results",
        "out/results",
        "-o",
        "figures",
    ])
    .unwrap();

    assert_eq!(cli.expr, Experiment::Single);
    assert_eq!(cli.results, Some(PathBuf::from("out/results")));
    assert_eq!(cli.output, Some(PathBuf::from("figures")));
}

#[test]
pub fn unknown_experiment() {
    let error = Cli::try_parse_from(["vpir-report", "--expr=foo"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidValue);
    // clap exits with a usage error code for this
    assert_ne!(error.exit_code(), 0);
    assert!(error.to_string().contains("foo"));
}

#[test]
pub fn experiment_is_required() {
    let error = Cli::try_parse_from(["vpir-report"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
}
