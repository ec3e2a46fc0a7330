pub mod bars;
pub mod lines;

use plotters::drawing::DrawingAreaErrorKind;
use std::ops::Range;
use thiserror::Error;

pub use bars::{
    render_dual_axis_bars, render_grouped_bars, BarSeries, DualAxisBars, GroupedBars, LegendEntry,
};
pub use lines::{render_tradeoff, Tradeoff, TradeoffSeries};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Drawing failed: {0}")]
    Render(String),
    #[error("Chart '{0}' has no positive values to place on a log axis")]
    NoData(&'static str),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(error.to_string())
    }
}

/// decade aligned bounds covering every positive, finite value
pub fn log_range<I>(chart: &'static str, values: I) -> Result<Range<f64>, ChartError>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|value| value.is_finite() && *value > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });

    if !min.is_finite() {
        return Err(ChartError::NoData(chart));
    }

    Ok(10f64.powf(min.log10().floor())..10f64.powf(max.log10().floor() + 1.0))
}

/// Groups are centered on whole x coordinates, any tick in between stays unlabelled.
pub fn group_label(labels: &[String], x: f64) -> String {
    let index = x.round();

    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }

    labels.get(index as usize).cloned().unwrap_or_default()
}

/// x bounds leaving half a group of space around `groups` groups centered on 0, 1, ...
pub fn group_range(groups: usize) -> std::ops::Range<f64> {
    -0.5..(groups as f64 - 0.5)
}
