use scaling_report::parser::{read_trial_file, scan_timing, TrialOutcome};
use scaling_report::utils::error::ParseError;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_read_trial_file_parsed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0_0.raw");
    fs::write(
        &path,
        "# simulator output\nstep 100 t=0.5\ntiming 2808.125 seconds on rank 0\ntiming 1.0\n",
    )
    .unwrap();

    let outcome = read_trial_file(&path, "timing").unwrap();
    assert_eq!(outcome, TrialOutcome::Parsed(2808.125));
}

#[test]
fn test_read_trial_file_missing_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0_0.raw");
    fs::write(&path, "step 1\nstep 2\n").unwrap();

    assert_eq!(read_trial_file(&path, "timing").unwrap(), TrialOutcome::NoMarker);
}

#[test]
fn test_read_trial_file_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0_0.raw");
    fs::write(&path, "timing\n").unwrap();

    assert_eq!(
        read_trial_file(&path, "timing").unwrap(),
        TrialOutcome::Malformed("timing".to_string())
    );
}

#[test]
fn test_read_trial_file_tolerates_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0_0.raw");
    fs::write(&path, b"\xff\xfe binary header\ntiming 3.5\n").unwrap();

    assert_eq!(read_trial_file(&path, "timing").unwrap(), TrialOutcome::Parsed(3.5));
}

#[test]
fn test_crlf_line_endings() {
    let value = scan_timing(Cursor::new("a\r\ntiming 6.75\r\n"), "timing", Path::new("mem")).unwrap();
    assert_eq!(value, 6.75);
}

#[test]
fn test_scientific_notation() {
    let value = scan_timing(Cursor::new("timing 1.5e2\n"), "timing", Path::new("mem")).unwrap();
    assert_eq!(value, 150.0);
}

#[test]
fn test_directory_instead_of_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0_0.raw");
    fs::create_dir(&path).unwrap();

    let result = read_trial_file(&path, "timing");
    assert!(matches!(result, Err(ParseError::Io { .. })));
}
