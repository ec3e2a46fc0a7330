use crate::{
    config::{ConfigErrors, ReportConfig, StyleConfig},
    experiments::Experiment,
};
use std::{fs, path::PathBuf};

#[test]
pub fn defaults() {
    let config = ReportConfig::default();

    assert_eq!(config.results, PathBuf::from("results/"));
    assert_eq!(config.output, PathBuf::from("."));
    assert_eq!(config.style, StyleConfig::default());
    assert_eq!(
        config.scheme_path("pirMatrix"),
        PathBuf::from("results/pirMatrix.json")
    );
}

#[test]
pub fn partial_yaml_keeps_defaults() {
    let yaml = r#"
results: bench/results
style:
  font_size: 20
"#;
    let config = ReportConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(config.results, PathBuf::from("bench/results"));
    assert_eq!(config.output, PathBuf::from("."));
    assert_eq!(config.style.font_size, 20);
    assert_eq!(config.style.width, 640);
}

#[test]
pub fn unknown_field_is_rejected() {
    match ReportConfig::from_yaml_str("resutls: somewhere\n") {
        Err(ConfigErrors::Yaml(_)) => {}
        other => panic!("expected a yaml error, got {other:?}"),
    }
}

#[test]
pub fn command_line_overrides() {
    let mut config = ReportConfig::from_yaml_str("results: a\noutput: b\n").unwrap();

    config.apply_overrides(None, Some(PathBuf::from("figures")));
    assert_eq!(config.results, PathBuf::from("a"));
    assert_eq!(config.output_path("cpu_bw.svg"), PathBuf::from("figures/cpu_bw.svg"));

    config.apply_overrides(Some(PathBuf::from("c")), None);
    assert_eq!(config.results, PathBuf::from("c"));
}

#[test]
pub fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.yaml");

    match ReportConfig::load(&path) {
        Err(ConfigErrors::FileNotFound(missing)) => assert_eq!(missing, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }

    fs::write(&path, "output: plots\n").unwrap();
    let config = ReportConfig::load(&path).unwrap();
    assert_eq!(config.output, PathBuf::from("plots"));
}

#[test]
pub fn preflight_reports_missing_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ReportConfig::default();
    config.apply_overrides(
        Some(dir.path().join("results")),
        Some(dir.path().to_path_buf()),
    );

    assert!(config.preflight_checks(Experiment::Single));

    fs::create_dir(&config.results).unwrap();
    // folder exists but the scheme files do not
    assert!(config.preflight_checks(Experiment::Single));

    for scheme in Experiment::Single.schemes() {
        fs::write(config.scheme_path(scheme.file), "{}").unwrap();
    }
    assert!(!config.preflight_checks(Experiment::Single));
}

#[test]
pub fn preflight_checks_output_only_for_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ReportConfig::default();
    config.apply_overrides(
        Some(dir.path().to_path_buf()),
        Some(dir.path().join("figures")),
    );

    for scheme in Experiment::Single.schemes() {
        fs::write(config.scheme_path(scheme.file), "{}").unwrap();
    }
    for scheme in Experiment::Benchmarks.schemes() {
        fs::write(config.scheme_path(scheme.file), "{}").unwrap();
    }

    assert!(!config.preflight_checks(Experiment::Single));
    assert!(config.preflight_checks(Experiment::Benchmarks));
}

#[test]
pub fn preflight_rejects_empty_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ReportConfig::default();
    config.apply_overrides(Some(dir.path().to_path_buf()), None);
    config.style.width = 0;

    for scheme in Experiment::Single.schemes() {
        fs::write(config.scheme_path(scheme.file), "{}").unwrap();
    }

    assert!(config.preflight_checks(Experiment::Single));
}
