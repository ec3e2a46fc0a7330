use crate::stats::Aggregate;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Result file {0:?} not found")]
    FileNotFound(PathBuf),
    #[error("Failed to read result file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse result file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Database size '{0}' is not an unsigned integer")]
    InvalidSize(String),
    #[error("Missing field '{field}' for database size {size}")]
    MissingField { size: u64, field: String },
    #[error("Field '{field}' for database size {size} has no samples")]
    EmptySamples { size: u64, field: String },
    #[error("Result file contains no database sizes")]
    EmptyResults,
}

/// side of the protocol a measurement was taken on
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Client, Role::Server];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

/// measured quantity, CPU time in ms or bandwidth in bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    Cpu,
    Bw,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Bw => "bw",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleStats {
    pub cpu: Aggregate,
    pub bw: Aggregate,
}

impl RoleStats {
    pub fn metric(&self, metric: Metric) -> Aggregate {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Bw => self.bw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRecord {
    pub client: RoleStats,
    pub server: RoleStats,
}

impl SizeRecord {
    pub fn role(&self, role: Role) -> &RoleStats {
        match role {
            Role::Client => &self.client,
            Role::Server => &self.server,
        }
    }
}

/// all records of one result file, ordered by database size
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    records: BTreeMap<u64, SizeRecord>,
}

// Shapes accepted from the benchmark output before validation. Every level is optional so
// that absent keys surface as `MissingField` with a readable path instead of a serde message.
#[derive(Deserialize, Debug)]
struct RawRecord {
    client: Option<RawRole>,
    server: Option<RawRole>,
}

#[derive(Deserialize, Debug)]
struct RawRole {
    cpu: Option<RawMetric>,
    bw: Option<RawMetric>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawMetric {
    // must stay first, a two element array would otherwise deserialize as `Summary`
    Samples(Vec<f64>),
    Summary { mean: Option<f64>, std: Option<f64> },
}

impl RawMetric {
    fn resolve(self, size: u64, field: String) -> Result<Aggregate, IngestError> {
        match self {
            Self::Summary { mean, std } => {
                let mean = mean.ok_or_else(|| IngestError::MissingField {
                    size,
                    field: format!("{field}.mean"),
                })?;
                let std = std.ok_or_else(|| IngestError::MissingField {
                    size,
                    field: format!("{field}.std"),
                })?;

                Ok(Aggregate::new(mean, std))
            }
            Self::Samples(samples) => {
                debug!(size, field = %field, samples = samples.len(), "Aggregating raw samples");

                Aggregate::from_samples(&samples).ok_or(IngestError::EmptySamples { size, field })
            }
        }
    }
}

fn resolve_role(raw: Option<RawRole>, size: u64, role: Role) -> Result<RoleStats, IngestError> {
    let raw = raw.ok_or_else(|| IngestError::MissingField {
        size,
        field: role.name().to_string(),
    })?;

    let resolve = |metric: Option<RawMetric>, which: Metric| {
        let field = format!("{}.{}", role.name(), which.name());

        match metric {
            Some(metric) => metric.resolve(size, field),
            None => Err(IngestError::MissingField { size, field }),
        }
    };

    Ok(RoleStats {
        cpu: resolve(raw.cpu, Metric::Cpu)?,
        bw: resolve(raw.bw, Metric::Bw)?,
    })
}

impl ResultSet {
    /// parse and validate a result document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let raw: BTreeMap<String, RawRecord> = serde_json::from_reader(reader)?;

        Self::from_raw(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, IngestError> {
        let raw: BTreeMap<String, RawRecord> = serde_json::from_str(json)?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, RawRecord>) -> Result<Self, IngestError> {
        let results: Self = raw
            .into_iter()
            .map(|(key, record)| {
                let size = key
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| IngestError::InvalidSize(key.clone()))?;

                let record = SizeRecord {
                    client: resolve_role(record.client, size, Role::Client)?,
                    server: resolve_role(record.server, size, Role::Server)?,
                };
                debug!(size, record = ?record, "Parsed size record");

                Ok::<_, IngestError>((size, record))
            })
            .collect::<Result<_, IngestError>>()?;

        if results.is_empty() {
            return Err(IngestError::EmptyResults);
        }

        Ok(results)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, size: u64) -> Option<&SizeRecord> {
        self.records.get(&size)
    }

    /// database sizes in ascending order
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &SizeRecord)> + '_ {
        self.records.iter().map(|(size, record)| (*size, record))
    }

    pub fn largest(&self) -> Option<(u64, &SizeRecord)> {
        self.records
            .iter()
            .next_back()
            .map(|(size, record)| (*size, record))
    }
}

impl FromIterator<(u64, SizeRecord)> for ResultSet {
    fn from_iter<T: IntoIterator<Item = (u64, SizeRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// load, validate and aggregate a single result file
#[tracing::instrument(level = "debug")]
pub fn all_stats<P: AsRef<Path> + Debug>(path: P) -> Result<ResultSet, IngestError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }
        Err(error) => return Err(error.into()),
    };

    match ResultSet::from_reader(BufReader::new(file)) {
        Ok(results) => {
            info!(path = ?path, sizes = results.len(), "Loaded result file");

            Ok(results)
        }
        Err(error) => {
            error!(path = ?path, "Failed to load result file: {error}");

            Err(error)
        }
    }
}
