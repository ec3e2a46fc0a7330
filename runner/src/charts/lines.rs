use super::{log_range, ChartError};
use crate::style::style;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug)]
pub struct TradeoffSeries {
    pub label: String,
    pub color: RGBColor,
    pub dashed: bool,
    /// (requests/s, requests/GB), one point per database size
    pub points: Vec<(f64, f64)>,
}

/// throughput against traffic cost for every scheme, one marker shape per database size
#[derive(Clone, Debug)]
pub struct Tradeoff {
    pub sizes: Vec<String>,
    pub series: Vec<TradeoffSeries>,
}

/// axis tick label for a reciprocal coordinate
fn reciprocal_label(value: f64) -> String {
    let value = 1.0 / value;

    if value >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Both axes are inverted log axes, which is the same as placing `1 / value` on a regular
/// log axis and labelling ticks with the reciprocal again. Better schemes end up bottom left.
pub fn render_tradeoff(path: &Path, chart: &Tradeoff) -> Result<(), ChartError> {
    let style = style();

    let inverted = chart
        .series
        .iter()
        .map(|series| {
            series
                .points
                .iter()
                .map(|(x, y)| (1.0 / x, 1.0 / y))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let x_range = log_range("tradeoff", inverted.iter().flatten().map(|(x, _)| *x))?;
    let y_range = log_range("tradeoff", inverted.iter().flatten().map(|(_, y)| *y))?;

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut plot = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

    plot.configure_mesh()
        .x_desc("Requests/s")
        .y_desc("Requests/GB")
        .x_label_formatter(&|x| reciprocal_label(*x))
        .y_label_formatter(&|y| reciprocal_label(*y))
        .axis_desc_style(style.text())
        .label_style(style.small_text())
        .draw()?;

    for (series, points) in chart.series.iter().zip(inverted.iter()) {
        let color = series.color;
        let line = color.stroke_width(2);

        if series.dashed {
            plot.draw_series(DashedLineSeries::new(points.clone(), 10, 6, line))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 8, y)], color.stroke_width(2))
                });
        } else {
            plot.draw_series(LineSeries::new(points.clone(), line))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        for (j, point) in points.iter().copied().enumerate() {
            match j % 4 {
                0 => plot.draw_series(std::iter::once(Circle::new(point, 4, color.filled())))?,
                1 => plot.draw_series(std::iter::once(TriangleMarker::new(
                    point,
                    6,
                    color.filled(),
                )))?,
                2 => plot.draw_series(std::iter::once(Cross::new(
                    point,
                    5,
                    color.stroke_width(2),
                )))?,
                _ => plot.draw_series(std::iter::once(
                    EmptyElement::at(point) + Rectangle::new([(-4, -4), (4, 4)], color.filled()),
                ))?,
            };
        }
    }

    // legend entries for the marker shapes, nothing is drawn for them
    for (j, size) in chart.sizes.iter().enumerate() {
        let anno = plot
            .draw_series(std::iter::empty::<Circle<(f64, f64), u32>>())?
            .label(size.as_str());

        match j % 4 {
            0 => anno.legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.filled())),
            1 => anno.legend(|(x, y)| TriangleMarker::new((x + 10, y), 6, BLACK.filled())),
            2 => anno.legend(|(x, y)| Cross::new((x + 10, y), 5, BLACK.stroke_width(2))),
            _ => anno.legend(|(x, y)| Rectangle::new([(x + 6, y - 4), (x + 14, y + 4)], BLACK.filled())),
        };
    }

    plot.configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .label_font(style.small_text())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = ?path, "Wrote chart");

    Ok(())
}
