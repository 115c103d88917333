//! Per-stop results and the end-of-run summary.

use bs_core::{Point, StopId};
use bs_spatial::{Projection, SpatialError};

/// A centroid placed on the road network.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnappedStop {
    pub stop:       StopId,
    pub centroid:   Point,
    pub projection: Projection,
}

impl SnappedStop {
    /// Distance the centroid moved to reach the road, in coordinate units.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.projection.distance()
    }
}

/// A centroid with no road in reach.
#[derive(Debug)]
pub struct FailedStop {
    pub stop:     StopId,
    pub centroid: Point,
    pub error:    SpatialError,
}

/// Counters passed to [`StopObserver::on_end`](crate::StopObserver::on_end).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Centroids handed to the snap phase.
    pub stops: usize,
    pub snapped: usize,
    pub failed: usize,
    /// Largest centroid-to-road offset among snapped stops.
    pub max_offset: f64,
    /// `true` if the interrupt flag cut the run short.
    pub interrupted: bool,
}

impl RunSummary {
    /// Centroids never reached because of an interrupt or abort.
    pub fn skipped(&self) -> usize {
        self.stops - self.snapped - self.failed
    }

    pub(crate) fn record_snap(&mut self, stop: &SnappedStop) {
        self.snapped += 1;
        self.max_offset = self.max_offset.max(stop.offset());
    }
}
