//! The `OutputWriter` trait implemented by all stop writers.

use crate::{FailedStopRow, OutputResult, StopRow};

/// Trait implemented by [`CsvWriter`](crate::CsvWriter) and
/// [`GeoJsonWriter`](crate::GeoJsonWriter).
///
/// Errors surface through [`StopOutputObserver::take_error`](crate::StopOutputObserver::take_error)
/// when the writer is driven by a pipeline.
pub trait OutputWriter {
    fn write_stop(&mut self, row: &StopRow) -> OutputResult<()>;

    fn write_failure(&mut self, row: &FailedStopRow) -> OutputResult<()>;

    /// Flush and close all underlying files.
    ///
    /// Calling it again after success is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_stop(&mut self, row: &StopRow) -> OutputResult<()> {
        (**self).write_stop(row)
    }

    fn write_failure(&mut self, row: &FailedStopRow) -> OutputResult<()> {
        (**self).write_failure(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
