//! JSON snapshot writer and reader.
//!
//! Writes TimingSnapshot structs to JSON files with proper formatting.
//! Floats are written in shortest round-trip form and parsed back exactly.

use crate::parser::schema::TimingSnapshot;
use crate::utils::config::validate_processor_counts;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a snapshot to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let snapshot = TimingSnapshot::new("Layer Based", &report.series, 10);
/// write_snapshot(&snapshot, "strongScaleData.json")?;
/// ```
pub fn write_snapshot(snapshot: &TimingSnapshot, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing snapshot to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Snapshot written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a snapshot from a JSON file
///
/// **Public** - used by validate, compare and plot
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::InvalidSnapshot` - counts and timings differ in length, or
///   counts are not positive and strictly increasing
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<TimingSnapshot, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let snapshot: TimingSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    if snapshot.processor_counts.len() != snapshot.timings.len() {
        return Err(OutputError::InvalidSnapshot(format!(
            "{} processor counts but {} timings",
            snapshot.processor_counts.len(),
            snapshot.timings.len()
        )));
    }
    validate_processor_counts(&snapshot.processor_counts)
        .map_err(|e| OutputError::InvalidSnapshot(e.to_string()))?;

    debug!(
        "Snapshot loaded: version {}, label '{}', {} points",
        snapshot.version,
        snapshot.label,
        snapshot.timings.len()
    );

    Ok(snapshot)
}

/// Validate that output path is writable
///
/// **Public** - shared with the SVG writer
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::TimingSeries;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_read_rejects_mismatched_lengths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"version":"1.0.0","label":"x","processor_counts":[4,8],"timings":[1.0],
               "trial_count":1,"generated_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(matches!(
            read_snapshot(&path),
            Err(OutputError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/series.json");
        let series = TimingSeries::from_parts(&[4], &[1.5]);

        write_snapshot(&TimingSnapshot::new("t", &series, 1), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
