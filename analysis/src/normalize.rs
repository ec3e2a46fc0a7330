use crate::combine::combine;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;
use vpir_ingest::{Metric, ResultSet};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No baseline value recorded for database size {size}")]
    MissingBaseline { size: u64 },
    #[error("Division by zero while normalizing database size {size}")]
    DivisionByZero { size: u64 },
    #[error("Invalid approach grouping of {0}")]
    InvalidGrouping(usize),
    #[error("Row for database size {size} has {values} values, not a multiple of {approaches}")]
    UnevenRow {
        size: u64,
        values: usize,
        approaches: usize,
    },
}

/// `value / baseline`, refusing to produce inf or NaN for a zero baseline
pub fn ratio(size: u64, value: f64, baseline: f64) -> Result<f64, AnalysisError> {
    if baseline == 0.0 {
        Err(AnalysisError::DivisionByZero { size })
    } else {
        Ok(value / baseline)
    }
}

/// per database size values of the scheme every other scheme is compared against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baselines {
    values: BTreeMap<u64, f64>,
}

impl Baselines {
    pub fn new() -> Self {
        Self::default()
    }

    /// combined client + server means of `metric` for every size in `results`
    pub fn from_results(results: &ResultSet, metric: Metric) -> Self {
        let mut baselines = Self::new();

        for (size, record) in results.iter() {
            baselines.record(size, combine(record, metric).mean);
        }

        baselines
    }

    pub fn record(&mut self, size: u64, value: f64) {
        debug!(size, value, "Recorded baseline");

        self.values.insert(size, value);
    }

    pub fn get(&self, size: u64) -> Option<f64> {
        self.values.get(&size).copied()
    }

    pub fn normalize(&self, size: u64, value: f64) -> Result<f64, AnalysisError> {
        let baseline = self
            .get(size)
            .ok_or(AnalysisError::MissingBaseline { size })?;

        ratio(size, value, baseline)
    }
}
