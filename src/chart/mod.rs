//! Chart generation for timing series.
//!
//! This module renders runtime or speedup against processor count, as SVG or
//! as a raster image.

pub mod generator;

// Re-export main types
pub use generator::{render_chart, render_raster, ChartConfig, ChartFormat, ChartSeries};
