//! Equity-curve charts.
//!
//! Curves show compounded growth of one unit, `Π(1 + r)`, against a
//! fractional-year x axis. Charts are written as PNG through the plotters
//! bitmap backend.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use rotation_eval::BacktestResult;
use rotation_traits::{Date, Result, ReturnSeries, RotationError};
use tracing::debug;

/// File name of the chart combining every curve.
pub const COMBINED_CHART: &str = "equity_curves.png";

/// File name of the benchmark-only chart.
pub const BENCHMARK_CHART: &str = "equity_benchmark.png";

/// Chart rendering settings.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Image width (pixels)
    pub width: u32,
    /// Image height (pixels)
    pub height: u32,
    /// Background colour
    pub background: RGBColor,
    /// Stroke width of strategy curves
    pub line_width: u32,
    /// Stroke width of the benchmark curve
    pub benchmark_width: u32,
    /// Blank border around the plot (pixels)
    pub margin: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: WHITE,
            line_width: 2,
            benchmark_width: 4,
            margin: 20,
        }
    }
}

/// One line of a chart.
#[derive(Debug, Clone)]
pub struct Curve {
    /// Series label
    pub label: String,
    /// `(fractional year, growth)` points
    pub points: Vec<(f64, f64)>,
    /// Line style
    pub style: ShapeStyle,
}

impl Curve {
    /// Compounded growth curve of a return series.
    ///
    /// The first point is `1 + r_1` for the first period of the series.
    pub fn growth(series: &ReturnSeries, style: ShapeStyle) -> Self {
        let points = series
            .dates()
            .iter()
            .zip(series.cumulative_growth())
            .map(|(&date, level)| (fractional_year(date), level))
            .collect();
        Self {
            label: series.label().to_string(),
            points,
            style,
        }
    }
}

/// Equity-curve chart renderer.
#[derive(Debug, Clone, Default)]
pub struct EquityChart {
    style: ChartStyle,
}

impl EquityChart {
    /// Create a renderer with custom settings.
    pub const fn with_style(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Style used for the `index`-th strategy curve.
    pub fn strategy_style(&self, index: usize) -> ShapeStyle {
        Palette99::pick(index).stroke_width(self.style.line_width)
    }

    /// Style used for the benchmark curve: a bolder black line.
    pub fn benchmark_style(&self) -> ShapeStyle {
        BLACK.stroke_width(self.style.benchmark_width)
    }

    /// Render the combined chart plus one chart per strategy and one for the
    /// benchmark into `dir`. Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns an error if any chart cannot be rendered or saved.
    pub fn render_all(&self, result: &BacktestResult, dir: &Path) -> Result<Vec<PathBuf>> {
        let strategy_curves: Vec<Curve> = result
            .strategies
            .iter()
            .enumerate()
            .map(|(i, strategy)| Curve::growth(&strategy.returns, self.strategy_style(i)))
            .collect();
        let benchmark_curve = Curve::growth(&result.benchmark, self.benchmark_style());

        let mut written = Vec::with_capacity(result.strategies.len() + 2);

        let mut all = strategy_curves.clone();
        all.push(benchmark_curve.clone());
        let combined = dir.join(COMBINED_CHART);
        self.render(&all, &combined)?;
        written.push(combined);

        for (strategy, curve) in result.strategies.iter().zip(strategy_curves) {
            let path = dir.join(format!("equity_{}.png", strategy.key()));
            self.render(&[curve], &path)?;
            written.push(path);
        }

        let path = dir.join(BENCHMARK_CHART);
        self.render(&[benchmark_curve], &path)?;
        written.push(path);

        Ok(written)
    }

    /// Render `curves` to a PNG at `path`.
    ///
    /// Only grid lines and curves are drawn. The bitmap backend is built
    /// without a font backend, so the chart carries no caption, tick labels
    /// or legend; the file name identifies the chart and the benchmark is
    /// the thick black line.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::Render`] if drawing or saving fails.
    pub fn render(&self, curves: &[Curve], path: &Path) -> Result<()> {
        let (x_range, y_range) = ranges(curves);

        let root = BitMapBackend::new(path, (self.style.width, self.style.height))
            .into_drawing_area();
        root.fill(&self.style.background).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(self.style.margin)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_labels(10)
            .y_labels(8)
            .draw()
            .map_err(render_error)?;

        for curve in curves {
            chart
                .draw_series(LineSeries::new(curve.points.iter().copied(), curve.style))
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
        debug!(
            path = %path.display(),
            curves = ?curves.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
            "rendered chart"
        );
        Ok(())
    }
}

/// Date as a fractional calendar year, e.g. 2024-07-01 ≈ 2024.5.
pub fn fractional_year(date: Date) -> f64 {
    let year = date.year();
    let days_in_year = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    };
    f64::from(year) + f64::from(date.ordinal0()) / days_in_year
}

/// Axis ranges covering every point, padded so single points and flat lines
/// still get a visible span.
fn ranges(curves: &[Curve]) -> (Range<f64>, Range<f64>) {
    let points = curves.iter().flat_map(|curve| curve.points.iter());
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for &(x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() {
        return (0.0..1.0, 0.0..2.0);
    }
    if x_max - x_min < 1.0 / 12.0 {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let pad = ((y_max - y_min) * 0.05).max(0.05);
    (x_min..x_max, (y_min - pad)..(y_max + pad))
}

fn render_error<E: std::fmt::Display>(err: E) -> RotationError {
    RotationError::Render(err.to_string())
}
