use crate::{
    charts::{
        render_dual_axis_bars, render_grouped_bars, render_tradeoff, BarSeries, ChartError,
        DualAxisBars, GroupedBars, LegendEntry, Tradeoff, TradeoffSeries,
    },
    config::ReportConfig,
    style::{DARK_BLUE, DARK_GRAY, DARK_GREEN, DARK_RED, DIM_GRAY, GRAY, LIGHT_GRAY},
};
use clap::ValueEnum;
use itertools::Itertools;
use plotters::style::{RGBColor, BLACK};
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, instrument};
use vpir_analysis::{
    combine,
    combine::{db_size_kilobytes, db_size_megabytes, requests_per_gigabyte, throughput},
    combine_in,
    format::{latex_table_joint, latex_table_separate, rounder, JointTable, SeparateTable},
    AnalysisError, Baselines, Unit,
};
use vpir_ingest::{all_stats, Aggregate, IngestError, Metric, ResultSet, SizeRecord};

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Failed to load results: {0}")]
    Ingest(#[from] IngestError),
    #[error("Failed to analyse results: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Failed to render chart: {0}")]
    Chart(#[from] ChartError),
    #[error("Failed to write table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scheme {scheme} has no results for database size {size}")]
    MissingSize { scheme: &'static str, size: u64 },
    #[error("Scheme {0} has no results")]
    NoResults(&'static str),
    #[error("Experiment needs at least one scheme")]
    NoSchemes,
}

/// a benchmarked variant, stored as `<file>.json` in the results folder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheme {
    pub file: &'static str,
    pub label: &'static str,
}

const BENCHMARK_SCHEMES: [Scheme; 3] = [
    Scheme {
        file: "vpirSingleVector",
        label: "Single-bit",
    },
    Scheme {
        file: "vpirMultiVector",
        label: "Multi-bit",
    },
    Scheme {
        file: "vpirMultiVectorBlock",
        label: "Block",
    },
];

// PIR, Merkle and VPIR, first with the matrix then with the DPF optimization
const PERFORMANCE_SCHEMES: [Scheme; 6] = [
    Scheme {
        file: "pirMatrix",
        label: "PIR Matrix",
    },
    Scheme {
        file: "merkleMatrix",
        label: "Merkle Matrix",
    },
    Scheme {
        file: "vpirMultiMatrixBlock",
        label: "VPIR Matrix",
    },
    Scheme {
        file: "pirDPF",
        label: "PIR DPF",
    },
    Scheme {
        file: "merkleDPF",
        label: "Merkle DPF",
    },
    Scheme {
        file: "vpirMultiVectorBlockDPF",
        label: "VPIR DPF",
    },
];
const PERFORMANCE_APPROACHES: usize = 3;
const PERFORMANCE_FAMILIES: [&str; PERFORMANCE_APPROACHES] = ["PIR", "Merkle", "VPIR"];
const PERFORMANCE_OPTIMIZATIONS: [&str; 2] = ["Matrix", "DPF"];

const SINGLE_SCHEMES: [Scheme; 2] = [
    Scheme {
        file: "computationalPir",
        label: "w/o integrity",
    },
    Scheme {
        file: "computationalVpir",
        label: "w/ integrity",
    },
];
const SINGLE_APPROACHES: usize = 2;

const BENCHMARK_COLORS: [RGBColor; 3] = [BLACK, GRAY, LIGHT_GRAY];
const RATIO_COLORS: [RGBColor; 3] = [DIM_GRAY, DARK_GRAY, LIGHT_GRAY];
const TRADEOFF_COLORS: [RGBColor; 3] = [DARK_RED, DARK_GREEN, DARK_BLUE];

const CHART_BW_UNIT: Unit = Unit::Kilobytes;
const TABLE_BW_UNIT: Unit = Unit::Megabytes;
const MS_PER_S: f64 = 1000.0;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Experiment {
    /// CPU cost of the VPIR variants over growing databases
    Benchmarks,
    /// PIR, Merkle and VPIR compared with matrix and DPF optimizations
    Performance,
    /// computational PIR with and without integrity, as a LaTeX table
    Single,
}

impl Experiment {
    pub fn schemes(&self) -> &'static [Scheme] {
        match self {
            Self::Benchmarks => &BENCHMARK_SCHEMES,
            Self::Performance => &PERFORMANCE_SCHEMES,
            Self::Single => &SINGLE_SCHEMES,
        }
    }

    pub fn renders_charts(&self) -> bool {
        !matches!(self, Self::Single)
    }
}

pub type LoadedSchemes = Vec<(Scheme, ResultSet)>;

fn record_for<'a>(
    scheme: &Scheme,
    results: &'a ResultSet,
    size: u64,
) -> Result<&'a SizeRecord, ExperimentError> {
    results.get(size).ok_or(ExperimentError::MissingSize {
        scheme: scheme.file,
        size,
    })
}

/// every size any scheme reports, ascending. Each scheme is then required to cover all of
/// them, so no table row or chart group silently loses a scheme.
fn all_sizes(loaded: &[(Scheme, ResultSet)]) -> Result<Vec<u64>, ExperimentError> {
    if loaded.is_empty() {
        return Err(ExperimentError::NoSchemes);
    }

    Ok(loaded
        .iter()
        .flat_map(|(_, results)| results.sizes())
        .sorted()
        .dedup()
        .collect())
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Combined client + server CPU time per database size for every scheme
pub fn benchmark_bars(loaded: &[(Scheme, ResultSet)]) -> Result<GroupedBars, ExperimentError> {
    let sizes = all_sizes(loaded)?;

    let series = loaded
        .iter()
        .zip(BENCHMARK_COLORS.iter().cycle())
        .map(|((scheme, results), color)| {
            let values = sizes
                .iter()
                .map(|size| {
                    Ok::<_, ExperimentError>(combine(
                        record_for(scheme, results, *size)?,
                        Metric::Cpu,
                    ))
                })
                .collect::<Result<Vec<_>, ExperimentError>>()?;

            Ok::<_, ExperimentError>(BarSeries {
                label: scheme.label.to_string(),
                color: *color,
                filled: true,
                values,
            })
        })
        .collect::<Result<Vec<_>, ExperimentError>>()?;

    Ok(GroupedBars {
        x_desc: String::from("DB size [KB]"),
        y_desc: String::from("CPU time [ms]"),
        groups: sizes
            .iter()
            .map(|size| db_size_kilobytes(*size).to_string())
            .collect(),
        legend: series.iter().map(LegendEntry::from).collect(),
        series,
        error_bars: true,
        annotate: one_decimal,
    })
}

/// CPU [ms] and bandwidth of the largest database of every scheme
pub fn cpu_bw_bars(loaded: &[(Scheme, ResultSet)]) -> Result<DualAxisBars, ExperimentError> {
    let (_, first) = loaded.first().ok_or(ExperimentError::NoSchemes)?;
    let (largest, _) = first
        .largest()
        .ok_or(ExperimentError::NoResults(loaded[0].0.file))?;

    let mut chart = DualAxisBars {
        title: format!("Retrieval from a {} KB database", db_size_kilobytes(largest)),
        labels: Vec::with_capacity(loaded.len()),
        cpu_desc: String::from("CPU time [ms]"),
        cpu: Vec::with_capacity(loaded.len()),
        bw_desc: format!("Bandwidth [{}]", CHART_BW_UNIT.suffix()),
        bw: Vec::with_capacity(loaded.len()),
    };

    for (scheme, results) in loaded {
        let (size, record) = results
            .largest()
            .ok_or(ExperimentError::NoResults(scheme.file))?;
        debug!(scheme = scheme.file, size, "Using largest database size");

        chart.labels.push(scheme.label.to_string());
        chart.cpu.push(combine(record, Metric::Cpu));
        chart.bw.push(combine_in(record, Metric::Bw, CHART_BW_UNIT));
    }

    Ok(chart)
}

/// CPU time of every scheme relative to the first scheme at the same database size
pub fn performance_ratio_bars(
    loaded: &[(Scheme, ResultSet)],
) -> Result<GroupedBars, ExperimentError> {
    let sizes = all_sizes(loaded)?;
    let baselines = Baselines::from_results(&loaded[0].1, Metric::Cpu);

    let series = loaded
        .iter()
        .enumerate()
        .map(|(i, (scheme, results))| {
            let values = sizes
                .iter()
                .map(|size| {
                    let cpu = combine(record_for(scheme, results, *size)?, Metric::Cpu).mean;

                    Ok::<_, ExperimentError>(Aggregate::new(baselines.normalize(*size, cpu)?, 0.0))
                })
                .collect::<Result<Vec<_>, ExperimentError>>()?;

            Ok::<_, ExperimentError>(BarSeries {
                label: scheme.label.to_string(),
                color: if i == 0 {
                    DARK_RED
                } else {
                    RATIO_COLORS[i % PERFORMANCE_APPROACHES]
                },
                // matrix variants filled, DPF variants hollow
                filled: i < PERFORMANCE_APPROACHES,
                values,
            })
        })
        .collect::<Result<Vec<_>, ExperimentError>>()?;

    // colors name the scheme family, fill names the optimization
    let families = PERFORMANCE_FAMILIES
        .iter()
        .zip(RATIO_COLORS)
        .map(|(family, color)| LegendEntry {
            label: family.to_string(),
            color,
            filled: true,
        });
    let optimizations = PERFORMANCE_OPTIMIZATIONS
        .iter()
        .enumerate()
        .map(|(i, optimization)| LegendEntry {
            label: optimization.to_string(),
            color: BLACK,
            filled: i == 0,
        });

    Ok(GroupedBars {
        x_desc: String::from("Database size [MB]"),
        y_desc: format!("Ratio to {} latency", loaded[0].0.label),
        groups: sizes
            .iter()
            .map(|size| db_size_megabytes(*size).to_string())
            .collect(),
        legend: families.chain(optimizations).collect(),
        series,
        error_bars: false,
        annotate: rounder,
    })
}

/// Throughput against requests per GB for every scheme, plus the CPU [ms] and bandwidth
/// tables with one column per scheme.
pub fn performance_tradeoff(
    loaded: &[(Scheme, ResultSet)],
) -> Result<(Tradeoff, SeparateTable, SeparateTable), ExperimentError> {
    let sizes = all_sizes(loaded)?;

    let mut cpu_table = SeparateTable::new();
    let mut bw_table = SeparateTable::new();
    let mut chart = Tradeoff {
        sizes: sizes
            .iter()
            .map(|size| format!("{}MB", db_size_megabytes(*size)))
            .collect(),
        series: Vec::with_capacity(loaded.len()),
    };

    for (i, (scheme, results)) in loaded.iter().enumerate() {
        let mut points = Vec::with_capacity(sizes.len());

        for size in sizes.iter().copied() {
            let record = record_for(scheme, results, size)?;
            let cpu = combine(record, Metric::Cpu).mean;
            let bw = combine(record, Metric::Bw).mean;

            cpu_table.entry(size).or_default().push(cpu);
            bw_table
                .entry(size)
                .or_default()
                .push(combine_in(record, Metric::Bw, CHART_BW_UNIT).mean);
            points.push((throughput(size, cpu)?, requests_per_gigabyte(size, bw)?));
        }

        chart.series.push(TradeoffSeries {
            label: scheme.label.to_string(),
            color: TRADEOFF_COLORS[i % PERFORMANCE_APPROACHES],
            dashed: i >= PERFORMANCE_APPROACHES,
            points,
        });
    }

    Ok((chart, cpu_table, bw_table))
}

/// (CPU [s], bandwidth [MB]) per scheme and database size
pub fn single_table(loaded: &[(Scheme, ResultSet)]) -> Result<JointTable, ExperimentError> {
    let mut table = JointTable::new();

    for size in all_sizes(loaded)? {
        let row = loaded
            .iter()
            .map(|(scheme, results)| {
                let record = record_for(scheme, results, size)?;

                Ok::<_, ExperimentError>((
                    combine(record, Metric::Cpu).mean / MS_PER_S,
                    combine_in(record, Metric::Bw, TABLE_BW_UNIT).mean,
                ))
            })
            .collect::<Result<Vec<_>, ExperimentError>>()?;

        table.insert(size, row);
    }

    Ok(table)
}

/// runs one experiment against the folders of a config
pub struct Report<'a> {
    config: &'a ReportConfig,
}

impl<'a> Report<'a> {
    pub fn load(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    fn load_schemes(&self, schemes: &[Scheme]) -> Result<LoadedSchemes, ExperimentError> {
        schemes
            .iter()
            .map(|scheme| {
                Ok::<_, ExperimentError>((*scheme, all_stats(self.config.scheme_path(scheme.file))?))
            })
            .collect()
    }

    fn write_rows<W: Write>(out: &mut W, rows: Vec<String>) -> Result<(), ExperimentError> {
        for row in rows {
            writeln!(out, "{row}")?;
        }

        Ok(())
    }

    /// render the charts of `experiment` and write its LaTeX tables to `out`
    #[instrument(skip(self, out), level = "info")]
    pub fn execute<W: Write>(
        &self,
        experiment: Experiment,
        out: &mut W,
    ) -> Result<(), ExperimentError> {
        let loaded = self.load_schemes(experiment.schemes())?;

        match experiment {
            Experiment::Benchmarks => {
                render_grouped_bars(
                    &self.config.output_path("multi_benchmarks.svg"),
                    &benchmark_bars(&loaded)?,
                )?;
                render_dual_axis_bars(
                    &self.config.output_path("cpu_bw.svg"),
                    &cpu_bw_bars(&loaded)?,
                )?;
            }
            Experiment::Performance => {
                let (tradeoff, cpu_table, bw_table) = performance_tradeoff(&loaded)?;

                render_tradeoff(&self.config.output_path("multi_performance.svg"), &tradeoff)?;

                info!("CPU time [ms] table");
                Self::write_rows(out, latex_table_separate(&cpu_table, PERFORMANCE_APPROACHES)?)?;
                info!("Bandwidth [{}] table", CHART_BW_UNIT.suffix());
                Self::write_rows(out, latex_table_separate(&bw_table, PERFORMANCE_APPROACHES)?)?;

                render_grouped_bars(
                    &self.config.output_path("multi_performance_bar_cpu.svg"),
                    &performance_ratio_bars(&loaded)?,
                )?;
            }
            Experiment::Single => {
                info!(
                    "CPU time [s] and bandwidth [{}] table",
                    TABLE_BW_UNIT.suffix()
                );
                Self::write_rows(
                    out,
                    latex_table_joint(&single_table(&loaded)?, SINGLE_APPROACHES)?,
                )?;
            }
        }

        Ok(())
    }
}
