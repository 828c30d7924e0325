use log::{Level, LevelFilter, Log, Metadata, Record};
use scaling_report::output::write_svg;
use scaling_report::parser::{read_trial_file, TrialOutcome};
use std::fs;
use std::sync::{Mutex, Once};
use tempfile::TempDir;

/// Collects every record emitted in this test binary
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Records mentioning `needle`; tests run in parallel, so filter by a unique path
fn records_with(needle: &str) -> Vec<(Level, String)> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, message)| message.contains(needle))
        .cloned()
        .collect()
}

#[test]
fn test_each_trial_logs_open_or_not_found() {
    install_logger();
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("0_0.raw");
    let absent = dir.path().join("1_0.raw");
    fs::write(&present, "timing 2.5\n").unwrap();

    assert_eq!(read_trial_file(&present, "timing").unwrap(), TrialOutcome::Parsed(2.5));
    assert_eq!(read_trial_file(&absent, "timing").unwrap(), TrialOutcome::Missing);

    let opened = records_with(&present.display().to_string());
    assert!(opened
        .iter()
        .any(|(level, message)| *level == Level::Info && message.starts_with("Opening file:")));

    let missing = records_with(&absent.display().to_string());
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].0, Level::Info);
    assert!(missing[0].1.starts_with("NOT FOUND file:"));
}

#[test]
fn test_svg_without_extension_warns() {
    install_logger();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.txt");

    write_svg("<svg/>", &path).unwrap();

    let records = records_with(&path.display().to_string());
    assert!(records
        .iter()
        .any(|(level, message)| *level == Level::Warn && message.contains(".svg extension")));
}
