//! Observer trait for per-stop results and progress.

use bs_cluster::Clustering;
use bs_core::{Point, StopId};

use crate::report::{FailedStop, RunSummary, SnappedStop};

/// Callbacks invoked by [`StopPipeline`](crate::StopPipeline) as stops are
/// produced.
///
/// All methods have default no-op implementations.  Stops are reported in
/// ascending `StopId` order whether or not the `parallel` feature is on.
///
/// # Example: print stops as they arrive
///
/// ```rust,ignore
/// struct Printer;
///
/// impl StopObserver for Printer {
///     fn on_stop(&mut self, s: &SnappedStop) {
///         println!("{}: {} → {}", s.stop, s.centroid, s.projection.point);
///     }
/// }
/// ```
pub trait StopObserver {
    /// Called once after clustering, before any stop is snapped.  Not called
    /// by [`run_centroids`](crate::StopPipeline::run_centroids).
    fn on_clustered(&mut self, _clustering: &Clustering) {}

    /// Called for every centroid placed on the road network.
    fn on_stop(&mut self, _stop: &SnappedStop) {}

    /// Called for every centroid with no road in reach, before the
    /// [`FailurePolicy`](crate::FailurePolicy) is applied.
    fn on_stop_failed(&mut self, _failed: &FailedStop) {}

    /// Called exactly once per run, including interrupted and aborted runs.
    fn on_end(&mut self, _summary: &RunSummary) {}
}

/// A [`StopObserver`] that does nothing.
pub struct NoopObserver;

impl StopObserver for NoopObserver {}

/// A [`StopObserver`] that keeps every result in memory.
#[derive(Debug, Default)]
pub struct StopCollector {
    pub stops:   Vec<SnappedStop>,
    /// `(stop, centroid, error message)` for each miss.
    pub failed:  Vec<(StopId, Point, String)>,
    pub summary: Option<RunSummary>,
}

impl StopObserver for StopCollector {
    fn on_stop(&mut self, stop: &SnappedStop) {
        self.stops.push(*stop);
    }

    fn on_stop_failed(&mut self, failed: &FailedStop) {
        self.failed.push((failed.stop, failed.centroid, failed.error.to_string()));
    }

    fn on_end(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}
