//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `stops.csv`
//! - `failed_stops.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FailedStopRow, OutputResult, StopRow};

/// Rows written between flushes, so an interrupted run leaves most of its
/// stops on disk.
const FLUSH_EVERY: usize = 64;

pub const STOP_HEADER: [&str; 11] = [
    "stop_id",
    "centroid_x",
    "centroid_y",
    "stop_x",
    "stop_y",
    "offset",
    "line_id",
    "segment_start_x",
    "segment_start_y",
    "segment_end_x",
    "segment_end_y",
];

pub const FAILED_HEADER: [&str; 4] = ["stop_id", "centroid_x", "centroid_y", "reason"];

/// Writes stops to two CSV files.
pub struct CsvWriter {
    stops:    Writer<File>,
    failed:   Writer<File>,
    pending:  usize,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both CSV files, and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut stops = Writer::from_path(dir.join("stops.csv"))?;
        stops.write_record(STOP_HEADER)?;

        let mut failed = Writer::from_path(dir.join("failed_stops.csv"))?;
        failed.write_record(FAILED_HEADER)?;

        Ok(Self { stops, failed, pending: 0, finished: false })
    }

    fn row_written(&mut self) -> OutputResult<()> {
        self.pending += 1;
        if self.pending >= FLUSH_EVERY {
            self.pending = 0;
            self.stops.flush()?;
            self.failed.flush()?;
        }
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_stop(&mut self, row: &StopRow) -> OutputResult<()> {
        let [sx, sy, ex, ey] = row.segment;
        self.stops.write_record(&[
            row.stop_id.to_string(),
            row.centroid_x.to_string(),
            row.centroid_y.to_string(),
            row.stop_x.to_string(),
            row.stop_y.to_string(),
            row.offset.to_string(),
            row.line_id.to_string(),
            sx.to_string(),
            sy.to_string(),
            ex.to_string(),
            ey.to_string(),
        ])?;
        self.row_written()
    }

    fn write_failure(&mut self, row: &FailedStopRow) -> OutputResult<()> {
        self.failed.write_record(&[
            row.stop_id.to_string(),
            row.centroid_x.to_string(),
            row.centroid_y.to_string(),
            row.reason.clone(),
        ])?;
        self.row_written()
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stops.flush()?;
        self.failed.flush()?;
        Ok(())
    }
}
