//! Log output of the merge and matrix-construction steps.
//!
//! A single test owns the process-wide logger for this binary.

use log::{Level, Log, Metadata, Record};
use spike_dependence::{construct_points_by_ref_and_query, merge, Label};
use std::sync::Mutex;

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

#[test]
fn test_stream_and_matrix_dumps() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    // X@1 Y@1.5 X@2 Y@2.5 X@3
    let stream = merge(&[1.0, 2.0, 3.0], &[1.5, 2.5]);
    let matrix =
        construct_points_by_ref_and_query(&stream, 2, Label::Primary, Label::Secondary, 1).unwrap();

    let records = LOGGER.records.lock().unwrap();

    let merged = records
        .iter()
        .find(|(level, msg)| *level == Level::Trace && msg.starts_with("merged 3 X and 2 Y"))
        .expect("merge dump");
    assert!(merged.1.ends_with(&stream.to_string()));

    let built = records
        .iter()
        .find(|(level, msg)| *level == Level::Debug && msg.starts_with("built 1 x 2 matrix"))
        .expect("matrix dump");
    assert!(built.1.ends_with(&matrix.to_string()));
    assert_eq!(matrix.to_string(), "0.500000 0.500000\n");

    assert!(records
        .iter()
        .any(|(level, msg)| *level == Level::Debug && msg == "ref_spike_num = 4"));
}
