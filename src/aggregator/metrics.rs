//! Scaling metrics derived from a timing series.
//!
//! Speedup compares each runtime against a baseline; efficiency divides the
//! speedup by what perfect scaling would have achieved.

use crate::parser::schema::{TimingPoint, TimingSeries};
use crate::utils::error::MetricsError;
use log::debug;
use serde::Serialize;

/// Reference runtime for speedup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline {
    /// Runtime of the serial (single processor) program
    Serial(f64),
    /// First point of the series
    FirstPoint,
}

/// Derived metrics at one processor count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalingPoint {
    pub processor_count: u32,
    pub seconds: f64,
    pub speedup: f64,
    pub ideal_speedup: f64,
    pub efficiency: f64,
}

/// Calculate speedup and efficiency for every point of `series`
///
/// **Public** - main entry point for metrics calculation
///
/// # Errors
/// * `MetricsError::EmptySeries` - nothing to compare
/// * `MetricsError::NonPositiveTiming` - a runtime is zero or negative
/// * `MetricsError::InvalidBaseline` - serial runtime is not positive
pub fn calculate_scaling(series: &TimingSeries, baseline: Baseline) -> Result<Vec<ScalingPoint>, MetricsError> {
    let first = series.points.first().ok_or(MetricsError::EmptySeries)?;

    if let Some(bad) = series.points.iter().find(|p| !(p.seconds > 0.0)) {
        return Err(MetricsError::NonPositiveTiming {
            processor_count: bad.processor_count,
            value: bad.seconds,
        });
    }

    let (reference, reference_count) = match baseline {
        Baseline::Serial(seconds) => {
            if !(seconds > 0.0) {
                return Err(MetricsError::InvalidBaseline(seconds));
            }
            (seconds, 1.0)
        }
        Baseline::FirstPoint => (first.seconds, f64::from(first.processor_count)),
    };

    debug!(
        "Scaling against {} s at {} processors",
        reference, reference_count
    );

    Ok(series
        .points
        .iter()
        .map(|p| {
            let speedup = reference / p.seconds;
            let ideal_speedup = f64::from(p.processor_count) / reference_count;
            ScalingPoint {
                processor_count: p.processor_count,
                seconds: p.seconds,
                speedup,
                ideal_speedup,
                efficiency: speedup / ideal_speedup,
            }
        })
        .collect())
}

/// Prepend the serial runtime as a single-processor point
///
/// A series that already starts at one processor is returned unchanged.
pub fn prepend_serial(series: &TimingSeries, seconds: f64) -> TimingSeries {
    if series.points.first().map(|p| p.processor_count) == Some(1) {
        return series.clone();
    }

    let mut points = Vec::with_capacity(series.len() + 1);
    points.push(TimingPoint {
        processor_count: 1,
        seconds,
    });
    points.extend_from_slice(&series.points);
    TimingSeries::new(points)
}
