use super::{group_label, group_range, log_range, ChartError};
use crate::style::{style, GRAY};
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::path::Path;
use tracing::info;
use vpir_ingest::Aggregate;

const DUAL_BAR_WIDTH: f64 = 0.35;
const GROUPED_BAR_WIDTH: f64 = 0.15;

/// One bar per scheme on each of two log scaled axes, CPU on the left and bandwidth on the
/// right. Both come with error bars.
#[derive(Clone, Debug)]
pub struct DualAxisBars {
    pub title: String,
    pub labels: Vec<String>,
    pub cpu_desc: String,
    pub cpu: Vec<Aggregate>,
    pub bw_desc: String,
    pub bw: Vec<Aggregate>,
}

#[derive(Clone, Debug)]
pub struct BarSeries {
    pub label: String,
    pub color: RGBColor,
    /// hollow bars are drawn with an outline only
    pub filled: bool,
    /// one value per group
    pub values: Vec<Aggregate>,
}

/// legend swatch, drawn filled or as an outline like the bars it stands for
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    pub filled: bool,
}

impl From<&BarSeries> for LegendEntry {
    fn from(series: &BarSeries) -> Self {
        Self {
            label: series.label.clone(),
            color: series.color,
            filled: series.filled,
        }
    }
}

/// bars of every series side by side for each group (database size)
#[derive(Clone, Debug)]
pub struct GroupedBars {
    pub x_desc: String,
    pub y_desc: String,
    pub groups: Vec<String>,
    pub series: Vec<BarSeries>,
    pub legend: Vec<LegendEntry>,
    pub error_bars: bool,
    /// text drawn on top of every bar
    pub annotate: fn(f64) -> String,
}

fn bar_style(color: RGBColor, filled: bool) -> ShapeStyle {
    if filled {
        color.filled()
    } else {
        color.stroke_width(2)
    }
}

pub fn render_dual_axis_bars(path: &Path, chart: &DualAxisBars) -> Result<(), ChartError> {
    let style = style();
    let count = chart.labels.len();

    let cpu_range = log_range(
        "cpu_bw",
        chart
            .cpu
            .iter()
            .flat_map(|cpu| [cpu.mean - cpu.std, cpu.mean + cpu.std, cpu.mean]),
    )?;
    let bw_range = log_range(
        "cpu_bw",
        chart
            .bw
            .iter()
            .flat_map(|bw| [bw.mean - bw.std, bw.mean + bw.std, bw.mean]),
    )?;
    let x_range = group_range(count);

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut plot = ChartBuilder::on(&root)
        .caption(&chart.title, style.text())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), cpu_range.clone().log_scale())?
        .set_secondary_coord(x_range, bw_range.clone().log_scale());

    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&|x| group_label(&chart.labels, *x))
        .y_desc(chart.cpu_desc.as_str())
        .axis_desc_style(style.text())
        .label_style(style.small_text())
        .draw()?;
    plot.configure_secondary_axes()
        .y_desc(chart.bw_desc.as_str())
        .axis_desc_style(style.text())
        .label_style(style.small_text())
        .draw()?;

    plot.draw_series(chart.cpu.iter().enumerate().map(|(i, cpu)| {
        Rectangle::new(
            [(i as f64 - DUAL_BAR_WIDTH, cpu_range.start), (i as f64, cpu.mean)],
            BLACK.filled(),
        )
    }))?
    .label("CPU")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLACK.filled()));
    plot.draw_series(chart.cpu.iter().enumerate().map(|(i, cpu)| {
        let x = i as f64 - DUAL_BAR_WIDTH / 2.0;

        ErrorBar::new_vertical(
            x,
            (cpu.mean - cpu.std).max(cpu_range.start),
            cpu.mean,
            cpu.mean + cpu.std,
            GRAY,
            8,
        )
    }))?;

    plot.draw_secondary_series(chart.bw.iter().enumerate().map(|(i, bw)| {
        let x = i as f64;

        Rectangle::new(
            [(x, bw_range.start), (x + DUAL_BAR_WIDTH, bw.mean)],
            GRAY.filled(),
        )
    }))?
    .label("Bandwidth")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], GRAY.filled()));
    plot.draw_secondary_series(chart.bw.iter().enumerate().map(|(i, bw)| {
        let x = i as f64 + DUAL_BAR_WIDTH / 2.0;

        ErrorBar::new_vertical(
            x,
            (bw.mean - bw.std).max(bw_range.start),
            bw.mean,
            bw.mean + bw.std,
            BLACK,
            8,
        )
    }))?;

    plot.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(style.small_text())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = ?path, "Wrote chart");

    Ok(())
}

pub fn render_grouped_bars(path: &Path, chart: &GroupedBars) -> Result<(), ChartError> {
    let style = style();
    let groups = chart.groups.len();
    let series = chart.series.len();

    let y_range = log_range(
        "grouped bars",
        chart.series.iter().flat_map(|series| {
            series
                .values
                .iter()
                .flat_map(|value| [value.mean, value.mean + value.std])
        }),
    )?;
    // leave a decade of headroom for the annotations
    let y_range = y_range.start..y_range.end * 10.0;

    // series are spread around the group center
    let offset = GROUPED_BAR_WIDTH * (series as f64 - 1.0) / 2.0;

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut plot = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(group_range(groups), y_range.clone().log_scale())?;

    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(groups)
        .x_label_formatter(&|x| group_label(&chart.groups, *x))
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .axis_desc_style(style.text())
        .label_style(style.small_text())
        .draw()?;

    let annotation_style = style.small_text().pos(Pos::new(HPos::Center, VPos::Bottom));

    for (i, bars) in chart.series.iter().enumerate() {
        let center = |j: usize| j as f64 + i as f64 * GROUPED_BAR_WIDTH - offset;

        let color = bars.color;
        let filled = bars.filled;
        plot.draw_series(bars.values.iter().enumerate().map(|(j, value)| {
            let x = center(j);

            Rectangle::new(
                [
                    (x - GROUPED_BAR_WIDTH / 2.0, y_range.start),
                    (x + GROUPED_BAR_WIDTH / 2.0, value.mean),
                ],
                bar_style(color, filled),
            )
        }))?;

        if chart.error_bars {
            plot.draw_series(bars.values.iter().enumerate().map(|(j, value)| {
                ErrorBar::new_vertical(
                    center(j),
                    (value.mean - value.std).max(y_range.start),
                    value.mean,
                    value.mean + value.std,
                    BLACK,
                    6,
                )
            }))?;
        }

        plot.draw_series(bars.values.iter().enumerate().map(|(j, value)| {
            let top = if chart.error_bars {
                value.mean + value.std
            } else {
                value.mean
            };

            Text::new(
                (chart.annotate)(value.mean),
                (center(j), top),
                annotation_style.clone(),
            )
        }))?;
    }

    // legend only, nothing is drawn for these
    for entry in &chart.legend {
        let color = entry.color;
        let filled = entry.filled;

        plot.draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
            .label(entry.label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], bar_style(color, filled))
            });
    }

    plot.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(style.small_text())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = ?path, "Wrote chart");

    Ok(())
}
