//! PNG line charts of trajectories.

use std::ops::Range;
use std::path::Path;

use pendulum::{SweepRun, Trajectory};
use plotters::prelude::*;

use crate::{Error, Result};

/// Chart size: 10 x 6 inches at 300 dpi.
pub const CHART_SIZE: (u32, u32) = (3000, 1800);

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Z Position (m)";

/// blue, green, red, purple, orange, brown
const PALETTE: [RGBColor; 6] = [
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(255, 0, 0),
    RGBColor(128, 0, 128),
    RGBColor(255, 165, 0),
    RGBColor(165, 42, 42),
];

/// Renders every series of a sweep onto one chart.
///
/// # Errors
///
/// Returns [`Error::Plot`] if the backend fails to draw or encode.
pub fn render_sweep(path: &Path, run: &SweepRun) -> Result<()> {
    let series: Vec<_> = run
        .series
        .iter()
        .map(|s| (s.label.as_str(), &s.trajectory))
        .collect();
    render_chart(path, run.title(), &series)
}

/// Renders a single labelled trajectory.
///
/// # Errors
///
/// Returns [`Error::Plot`] if the backend fails to draw or encode.
pub fn render_trajectory(path: &Path, title: &str, label: &str, trajectory: &Trajectory) -> Result<()> {
    render_chart(path, title, &[(label, trajectory)])
}

fn render_chart(path: &Path, title: &str, series: &[(&str, &Trajectory)]) -> Result<()> {
    let (x_range, y_range) = bounds(series.iter().map(|(_, t)| *t));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(title, ("sans-serif", 72))
        .x_label_area_size(120)
        .y_label_area_size(160)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(("sans-serif", 56))
        .label_style(("sans-serif", 44))
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .bold_line_style(RGBColor(200, 200, 200).stroke_width(2))
        .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
        .draw()
        .map_err(plot_err)?;

    for (i, (label, trajectory)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                trajectory.iter().map(|p| (p.time, p.height)),
                color.stroke_width(4),
            ))
            .map_err(plot_err)?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 60, y)], color.stroke_width(4)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 44))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), series = series.len(), "rendered chart");
    Ok(())
}

/// Axis ranges covering every sample, with 5% vertical padding.
fn bounds<'a>(trajectories: impl Iterator<Item = &'a Trajectory>) -> (Range<f64>, Range<f64>) {
    let mut x_max = 0.0f64;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for point in trajectories.flat_map(Trajectory::iter) {
        x_max = x_max.max(point.time);
        y_min = y_min.min(point.height);
        y_max = y_max.max(point.height);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return (0.0..1.0, -1.0..1.0);
    }
    if x_max <= 0.0 {
        x_max = 1.0;
    }
    let pad = 0.05 * (y_max - y_min).max(1e-3);
    (0.0..x_max, (y_min - pad)..(y_max + pad))
}

fn plot_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Plot(err.to_string())
}
