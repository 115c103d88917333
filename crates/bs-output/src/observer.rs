//! `StopOutputObserver<W>` — bridges `StopObserver` to an `OutputWriter`.

use bs_pipeline::{FailedStop, RunSummary, SnappedStop, StopObserver};

use crate::row::{FailedStopRow, StopRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StopObserver`] that writes every stop to an [`OutputWriter`].
///
/// `StopObserver` methods have no return value, so write errors are stored.
/// After the run returns, check them with [`take_error`](Self::take_error).
pub struct StopOutputObserver<W: OutputWriter> {
    writer:     W,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StopOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows handed to the writer without error.
    pub fn rows_written(&self) -> usize {
        self.written
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, result: OutputResult<()>) {
        match result {
            Ok(()) => self.written += 1,
            Err(e) => {
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
            }
        }
    }
}

impl<W: OutputWriter> StopObserver for StopOutputObserver<W> {
    fn on_stop(&mut self, stop: &SnappedStop) {
        let result = self.writer.write_stop(&StopRow::from_snap(stop));
        self.record(result);
    }

    fn on_stop_failed(&mut self, failed: &FailedStop) {
        let result = self.writer.write_failure(&FailedStopRow::from_failure(failed));
        self.record(result);
    }

    fn on_end(&mut self, _summary: &RunSummary) {
        if let Err(e) = self.writer.finish() {
            self.last_error.get_or_insert(e);
        }
    }
}
