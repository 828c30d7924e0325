//! Trial file parser.
//!
//! A trial file is plain text written by the simulator. The first line that
//! starts with the marker token carries the measured runtime in seconds as
//! its second whitespace-separated token:
//!
//! ```text
//! timing 12.5 max-rank 3
//! ```
//!
//! Every other line is ignored.

use crate::utils::error::ParseError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Result of reading one trial file
#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    /// Timing value in seconds
    Parsed(f64),
    /// File does not exist
    Missing,
    /// File exists but has no marker line
    NoMarker,
    /// Marker line present but its value is unusable
    Malformed(String),
}

/// Check whether a line is the timing line
pub fn is_marker_line(line: &str, marker: &str) -> bool {
    line.starts_with(marker)
}

/// Parse the seconds value from a timing line
///
/// Returns `None` when the second token is absent, not a number, or not finite.
pub fn parse_timing_value(line: &str) -> Option<f64> {
    let token = line.split_whitespace().nth(1)?;
    let value: f64 = token.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Scan a reader until the first marker line and parse its value
///
/// **Public** - lets callers parse in-memory logs as well as files
///
/// # Errors
/// * `ParseError::MarkerNotFound` - EOF reached without a marker line
/// * `ParseError::MalformedValue` - marker line without a usable value
/// * `ParseError::Io` - read failure
pub fn scan_timing<R: BufRead>(mut reader: R, marker: &str, path: &Path) -> Result<f64, ParseError> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if read == 0 {
            break;
        }

        // Simulator logs are not guaranteed to be valid UTF-8
        let line = String::from_utf8_lossy(&buf);
        if !is_marker_line(&line, marker) {
            continue;
        }

        return parse_timing_value(&line).ok_or_else(|| ParseError::MalformedValue {
            path: path.to_path_buf(),
            line: line.trim_end().to_string(),
        });
    }

    Err(ParseError::MarkerNotFound {
        marker: marker.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read one trial file
///
/// **Public** - main entry point for trial parsing
///
/// Absence, a missing marker and a malformed value are all outcomes rather
/// than errors: the aggregator records them as misses and keeps going.
///
/// # Errors
/// * `ParseError::Io` - the file exists but cannot be opened or read
pub fn read_trial_file(path: &Path, marker: &str) -> Result<TrialOutcome, ParseError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("NOT FOUND file: {}", path.display());
            return Ok(TrialOutcome::Missing);
        }
        Err(source) => {
            return Err(ParseError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    info!("Opening file: {}", path.display());

    match scan_timing(BufReader::new(file), marker, path) {
        Ok(value) => {
            debug!("{} -> {} s", path.display(), value);
            Ok(TrialOutcome::Parsed(value))
        }
        Err(ParseError::MarkerNotFound { .. }) => {
            warn!("No '{}' line in {}", marker, path.display());
            Ok(TrialOutcome::NoMarker)
        }
        Err(ParseError::MalformedValue { line, .. }) => {
            warn!("Malformed timing line in {}: {:?}", path.display(), line);
            Ok(TrialOutcome::Malformed(line))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_timing_value() {
        assert_eq!(parse_timing_value("timing 12.5 extra"), Some(12.5));
        assert_eq!(parse_timing_value("timing\t7.25\n"), Some(7.25));
        assert_eq!(parse_timing_value("timing"), None);
        assert_eq!(parse_timing_value("timing abc"), None);
        assert_eq!(parse_timing_value("timing inf"), None);
    }

    #[test]
    fn test_marker_is_a_prefix_match() {
        assert!(is_marker_line("timing 1.0", "timing"));
        assert!(!is_marker_line("  timing 1.0", "timing"));
        assert!(!is_marker_line("step 3 timing 1.0", "timing"));
    }

    #[test]
    fn test_scan_uses_first_marker_line() {
        let log = "header\nstep 1\ntiming 3.5 rank 0\ntiming 9.0 rank 1\n";
        let value = scan_timing(Cursor::new(log), "timing", Path::new("mem")).unwrap();
        assert_eq!(value, 3.5);
    }

    #[test]
    fn test_scan_without_marker() {
        let result = scan_timing(Cursor::new("a\nb\n"), "timing", Path::new("mem"));
        assert!(matches!(result, Err(ParseError::MarkerNotFound { .. })));
    }

    #[test]
    fn test_scan_last_line_without_newline() {
        let value = scan_timing(Cursor::new("x\ntiming 2"), "timing", Path::new("mem")).unwrap();
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_scan_malformed_value() {
        let result = scan_timing(Cursor::new("timing ?\n"), "timing", Path::new("mem"));
        assert!(matches!(result, Err(ParseError::MalformedValue { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = read_trial_file(&dir.path().join("0_0.raw"), "timing").unwrap();
        assert_eq!(outcome, TrialOutcome::Missing);
    }
}
