//! LaTeX table rows and number rounding for the paper tables and chart labels

use crate::{
    combine::db_size_megabytes,
    normalize::{ratio, AnalysisError},
};
use itertools::Itertools;
use std::collections::BTreeMap;

/// database size -> one value per approach
pub type SeparateTable = BTreeMap<u64, Vec<f64>>;
/// database size -> one (cpu, bandwidth) pair per approach
pub type JointTable = BTreeMap<u64, Vec<(f64, f64)>>;

/// chart annotation rounding: whole numbers from 3 upwards, one decimal below
pub fn rounder(x: f64) -> String {
    if x >= 3.0 {
        format!("{x:.0}")
    } else {
        format!("{x:.1}")
    }
}

/// table rounding with thousands separators: whole numbers above 5, one decimal otherwise
///
/// The threshold is checked on the value rounded to one decimal, so 5.04 stays "5.0"
/// while 5.06 becomes "5".
pub fn rounder2(x: f64) -> String {
    let tenths = format!("{x:.1}");

    if tenths.parse::<f64>().unwrap_or(x) > 5.0 {
        group_thousands(&format!("{x:.0}"))
    } else {
        group_thousands(&tenths)
    }
}

/// insert `,` between groups of three digits of the integer part
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    // NaN and inf
    if integer.is_empty() || !integer.bytes().all(|byte| byte.is_ascii_digit()) {
        return number.to_string();
    }

    let digits = integer.chars().collect_vec();
    let grouped = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",");

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// first cell of a table row, e.g. `1\,MB`
pub fn size_label(size: u64) -> String {
    format!("{}\\,MB", db_size_megabytes(size))
}

/// a row missing an approach would shift every later value onto the wrong baseline
fn check_row(size: u64, values: usize, approaches: usize) -> Result<(), AnalysisError> {
    if values == 0 || values % approaches != 0 {
        return Err(AnalysisError::UnevenRow {
            size,
            values,
            approaches,
        });
    }

    Ok(())
}

/// One row per database size listing every approach.
///
/// Approaches come in groups of `num_approaches`; the first of each group is its baseline
/// and every other approach is followed by its ratio to that baseline.
pub fn latex_table_separate(
    table: &SeparateTable,
    num_approaches: usize,
) -> Result<Vec<String>, AnalysisError> {
    if num_approaches == 0 {
        return Err(AnalysisError::InvalidGrouping(num_approaches));
    }

    table
        .iter()
        .map(|(size, values)| {
            check_row(*size, values.len(), num_approaches)?;
            let mut row = format!("{} ", size_label(*size));

            for (i, value) in values.iter().enumerate() {
                row.push_str(&format!("& {} ", rounder2(*value)));

                if i % num_approaches != 0 {
                    let baseline = values[(i / num_approaches) * num_approaches];

                    row.push_str(&format!("& {} ", rounder2(ratio(*size, *value, baseline)?)));
                }
            }
            row.push_str("\\\\");

            Ok(row)
        })
        .collect()
}

/// One row per database size with (cpu, bandwidth) pairs per approach.
///
/// The last approach of every group is followed by the ratios of both values to the
/// approach right before it.
pub fn latex_table_joint(
    table: &JointTable,
    num_approaches: usize,
) -> Result<Vec<String>, AnalysisError> {
    // a ratio needs a preceding approach within the same group
    if num_approaches < 2 {
        return Err(AnalysisError::InvalidGrouping(num_approaches));
    }

    table
        .iter()
        .map(|(size, values)| {
            check_row(*size, values.len(), num_approaches)?;
            let mut row = format!("{} ", size_label(*size));

            for (i, (cpu, bw)) in values.iter().enumerate() {
                row.push_str(&format!("& {} & {} ", rounder2(*cpu), rounder2(*bw)));

                if i % num_approaches == num_approaches - 1 {
                    let (previous_cpu, previous_bw) = values[i - 1];

                    row.push_str(&format!(
                        "& {} & {} ",
                        rounder2(ratio(*size, *cpu, previous_cpu)?),
                        rounder2(ratio(*size, *bw, previous_bw)?)
                    ));
                }
            }
            row.push_str("\\\\");

            Ok(row)
        })
        .collect()
}
