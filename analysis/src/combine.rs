use crate::normalize::{ratio, AnalysisError};
use vpir_ingest::{Aggregate, Metric, Role, SizeRecord};

pub const KB: f64 = 1e3;
pub const MB: f64 = 1e6;
pub const GB: f64 = 1e9;

/// database sizes are reported in bits
pub const BITS_PER_KB: f64 = 8.0 * KB;
pub const BITS_PER_MB: f64 = 8.0 * MB;

/// unit a bandwidth value is reported in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl Unit {
    pub fn divisor(&self) -> f64 {
        match self {
            Self::Bytes => 1.0,
            Self::Kilobytes => KB,
            Self::Megabytes => MB,
            Self::Gigabytes => GB,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::Kilobytes => "KB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
        }
    }
}

/// Sum client and server values of a metric.
///
/// Standard deviations are summed linearly, not in quadrature.
pub fn combine(record: &SizeRecord, metric: Metric) -> Aggregate {
    Role::ALL
        .iter()
        .map(|role| record.role(*role).metric(metric))
        .fold(Aggregate::default(), |total, part| Aggregate {
            mean: total.mean + part.mean,
            std: total.std + part.std,
        })
}

/// like [`combine`] with both values divided by the unit divisor
pub fn combine_in(record: &SizeRecord, metric: Metric, unit: Unit) -> Aggregate {
    combine(record, metric).scaled(unit.divisor())
}

/// database size in whole megabytes (truncated), e.g. 8e6 bits -> 1
pub fn db_size_megabytes(size: u64) -> u64 {
    (size as f64 / BITS_PER_MB) as u64
}

/// database size in whole kilobytes (truncated)
pub fn db_size_kilobytes(size: u64) -> u64 {
    (size as f64 / BITS_PER_KB) as u64
}

/// requests per second for a latency in milliseconds
pub fn throughput(size: u64, cpu_ms: f64) -> Result<f64, AnalysisError> {
    ratio(size, 1000.0, cpu_ms)
}

/// requests served per gigabyte of traffic for a per-request bandwidth in bytes
pub fn requests_per_gigabyte(size: u64, bw_bytes: f64) -> Result<f64, AnalysisError> {
    ratio(size, GB, bw_bytes)
}
