//! Line chart generation with plotters.
//!
//! Draws labelled `(processor count, value)` series:
//! - Linear or logarithmic axes
//! - One line with point markers per series, plus a legend
//! - SVG into a string, raster images (PNG, JPEG) straight to disk

use crate::aggregator::ScalingPoint;
use crate::parser::schema::TimingSeries;
use crate::utils::error::ChartError;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Padding factor applied to both ends of a log axis
const LOG_PADDING: f64 = 1.2;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub log_x: bool,
    pub log_y: bool,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Scaling".to_string(),
            width: 900,
            height: 500,
            log_x: false,
            log_y: false,
            x_label: "Num Processors".to_string(),
            y_label: "Max Rank Runtime (secs)".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_log_axes(mut self, log_x: bool, log_y: bool) -> Self {
        self.log_x = log_x;
        self.log_y = log_y;
        self
    }

    pub fn with_y_label(mut self, y_label: impl Into<String>) -> Self {
        self.y_label = y_label.into();
        self
    }
}

/// Output format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Svg,
    Raster,
}

impl ChartFormat {
    /// `.png`, `.jpg`, `.jpeg` and `.bmp` are raster; everything else is SVG
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("png" | "jpg" | "jpeg" | "bmp") => ChartFormat::Raster,
            _ => ChartFormat::Svg,
        }
    }
}

/// A series with its legend label
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(u32, f64)>,

    /// Drawn in black, e.g. the ideal speedup line
    pub reference: bool,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, series: TimingSeries) -> Self {
        Self {
            label: label.into(),
            points: series
                .points
                .iter()
                .map(|p| (p.processor_count, p.seconds))
                .collect(),
            reference: false,
        }
    }

    /// Measured speedup of one series
    pub fn speedup(label: impl Into<String>, points: &[ScalingPoint]) -> Self {
        Self {
            label: label.into(),
            points: points.iter().map(|p| (p.processor_count, p.speedup)).collect(),
            reference: false,
        }
    }

    /// Ideal speedup over every processor count found in `scaling`
    pub fn ideal_speedup<'a>(scaling: impl IntoIterator<Item = &'a [ScalingPoint]>) -> Self {
        let ideal: BTreeMap<u32, f64> = scaling
            .into_iter()
            .flatten()
            .map(|p| (p.processor_count, p.ideal_speedup))
            .collect();

        Self {
            label: "Ideal Speedup".to_string(),
            points: ideal.into_iter().collect(),
            reference: true,
        }
    }

    fn coords(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(count, value)| (f64::from(count), value))
            .collect()
    }
}

/// Render labelled series into an SVG document
///
/// **Public** - main entry point for chart generation
///
/// # Errors
/// * `ChartError::EmptySeries` - no series given
/// * `ChartError::EmptyPoints` - a series has no points
/// * `ChartError::NonPositiveOnLogAxis` - a value cannot be drawn on a log axis
/// * `ChartError::LogRangeTooWide` - a log axis would span beyond `f64`
/// * `ChartError::Drawing` - plotters failed to draw
pub fn render_chart(series: &[ChartSeries], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    let config = config.cloned().unwrap_or_default();
    let (x_range, y_range) = plot_ranges(series, &config)?;

    info!("Generating SVG chart with {} series", series.len());

    let mut svg_content = String::new();
    {
        let root = SVGBackend::with_string(&mut svg_content, (config.width, config.height))
            .into_drawing_area();
        draw_on(&root, series, &config, x_range, y_range)?;
        root.present().map_err(drawing)?;
    }

    info!("Chart generated successfully ({} bytes)", svg_content.len());
    Ok(svg_content)
}

/// Render labelled series into a raster image at `output_path`
///
/// The image format follows the file extension.
///
/// # Errors
/// Same as [`render_chart`].
#[cfg(feature = "raster")]
pub fn render_raster(
    series: &[ChartSeries],
    config: Option<&ChartConfig>,
    output_path: &Path,
) -> Result<(), ChartError> {
    let config = config.cloned().unwrap_or_default();
    let (x_range, y_range) = plot_ranges(series, &config)?;

    info!(
        "Generating raster chart with {} series: {}",
        series.len(),
        output_path.display()
    );

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    draw_on(&root, series, &config, x_range, y_range)?;
    root.present().map_err(drawing)?;

    Ok(())
}

/// Render labelled series into a raster image at `output_path`
///
/// # Errors
/// * `ChartError::RasterUnavailable` - built without the `raster` feature
#[cfg(not(feature = "raster"))]
pub fn render_raster(
    _series: &[ChartSeries],
    _config: Option<&ChartConfig>,
    _output_path: &Path,
) -> Result<(), ChartError> {
    Err(ChartError::RasterUnavailable)
}

/// Validate the input and compute the axis ranges
fn plot_ranges(series: &[ChartSeries], config: &ChartConfig) -> Result<(Range<f64>, Range<f64>), ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    if let Some(empty) = series.iter().find(|s| s.points.is_empty()) {
        return Err(ChartError::EmptyPoints(empty.label.clone()));
    }

    let xs: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(count, _)| f64::from(count)))
        .collect();
    let ys: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, value)| value))
        .collect();

    let x_range = axis_range(&xs, config.log_x, 0.0)?;
    let y_range = axis_range(&ys, config.log_y, 0.05)?;

    debug!("Chart ranges: x {:?}, y {:?}", x_range, y_range);
    Ok((x_range, y_range))
}

/// Range covering `values`; linear axes grow by `margin` of their span at the top
fn axis_range(values: &[f64], log: bool, margin: f64) -> Result<Range<f64>, ChartError> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if log {
        if let Some(&bad) = values.iter().find(|&&v| !(v > 0.0)) {
            return Err(ChartError::NonPositiveOnLogAxis(bad));
        }

        let (low, high) = (min / LOG_PADDING, max * LOG_PADDING);
        if !low.is_normal() || !high.is_finite() || !(high / low).is_finite() {
            return Err(ChartError::LogRangeTooWide { min, max });
        }
        Ok(low..high)
    } else {
        let low = min.min(0.0);
        if max > low {
            Ok(low..max + (max - low) * margin)
        } else {
            Ok(low - 1.0..max + 1.0)
        }
    }
}

fn draw_on<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[ChartSeries],
    config: &ChartConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(drawing)?;

    let mut builder = ChartBuilder::on(root);
    builder
        .caption(&config.title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(70);

    // Each axis combination is a distinct coordinate type
    macro_rules! plot {
        ($x:expr, $y:expr) => {{
            let mut chart = builder.build_cartesian_2d($x, $y).map_err(drawing)?;

            chart
                .configure_mesh()
                .x_desc(config.x_label.as_str())
                .y_desc(config.y_label.as_str())
                .x_label_formatter(&|v: &f64| format_count(*v))
                .y_label_formatter(&|v: &f64| format_value(*v))
                .draw()
                .map_err(drawing)?;

            for (i, entry) in series.iter().enumerate() {
                let color = if entry.reference {
                    BLACK
                } else {
                    PALETTE[i % PALETTE.len()]
                };
                let coords = entry.coords();

                chart
                    .draw_series(LineSeries::new(coords.clone(), color.stroke_width(2)))
                    .map_err(drawing)?
                    .label(entry.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                chart
                    .draw_series(coords.iter().map(|&point| Circle::new(point, 4, color.filled())))
                    .map_err(drawing)?;
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing)?;
        }};
    }

    match (config.log_x, config.log_y) {
        (false, false) => plot!(x_range, y_range),
        (true, false) => plot!(x_range.log_scale(), y_range),
        (false, true) => plot!(x_range, y_range.log_scale()),
        (true, true) => plot!(x_range.log_scale(), y_range.log_scale()),
    }

    Ok(())
}

fn drawing<E: Display>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}

fn format_count(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

fn format_value(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e5 || v.abs() < 1e-2) {
        format!("{:.1e}", v)
    } else if v.fract().abs() < 1e-9 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}
