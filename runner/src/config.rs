use crate::experiments::Experiment;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Config file {0:?} not found")]
    FileNotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    // folder with one `<scheme>.json` per benchmarked scheme
    #[serde(default = "default_results_path")]
    pub results: PathBuf,
    // folder charts are written to
    #[serde(default = "default_output_path")]
    pub output: PathBuf,

    #[serde(default)]
    pub style: StyleConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results: default_results_path(),
            output: default_output_path(),
            style: StyleConfig::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let yaml = match fs::read_to_string(path) {
            Ok(yaml) => yaml,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(ConfigErrors::FileNotFound(path.to_path_buf()));
            }
            Err(error) => return Err(error.into()),
        };

        let config = Self::from_yaml_str(&yaml)?;
        debug!(path = ?path, config = ?config, "Loaded config");

        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigErrors> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// command line values win over the config file
    pub fn apply_overrides(&mut self, results: Option<PathBuf>, output: Option<PathBuf>) {
        if let Some(results) = results {
            self.results = results;
        }
        if let Some(output) = output {
            self.output = output;
        }
    }

    pub fn scheme_path(&self, scheme: &str) -> PathBuf {
        self.results.join(format!("{scheme}.json"))
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output.join(file_name)
    }

    /// Check everything the experiment needs before any file is loaded. All problems are
    /// logged, not just the first one. Returns `true` if any error was found.
    pub fn preflight_checks(&self, experiment: Experiment) -> bool {
        let mut contains_error = false;

        if !self.results.is_dir() {
            error!(
                "Results folder {} does not exist or is not a directory",
                self.results.to_string_lossy()
            );
            contains_error = true;
        } else {
            for scheme in experiment.schemes() {
                let path = self.scheme_path(scheme.file);

                if !path.is_file() {
                    error!(
                        "Experiment {experiment:?} requires {} but it was not found",
                        path.to_string_lossy()
                    );
                    contains_error = true;
                }
            }
        }

        if experiment.renders_charts() && !self.output.is_dir() {
            error!(
                "Output folder {} does not exist or is not a directory",
                self.output.to_string_lossy()
            );
            contains_error = true;
        }

        if self.style.width == 0 || self.style.height == 0 {
            error!(
                "style.width and style.height must be positive, got {}x{}",
                self.style.width, self.style.height
            );
            contains_error = true;
        }

        if self.style.font_size == 0 {
            error!("style.font_size cannot be 0");
            contains_error = true;
        }

        contains_error
    }
}

fn default_results_path() -> PathBuf {
    PathBuf::from("results/")
}

fn default_output_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_font() -> String {
    String::from("sans-serif")
}

fn default_font_size() -> u32 {
    16
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}
