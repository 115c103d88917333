//! Flat row types written by output backends.

use bs_pipeline::{FailedStop, SnappedStop};

/// One stop placed on the road network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRow {
    pub stop_id:    u32,
    pub centroid_x: f64,
    pub centroid_y: f64,
    /// Projected location on the road.
    pub stop_x:     f64,
    pub stop_y:     f64,
    /// Centroid-to-road distance in coordinate units.
    pub offset:     f64,
    pub line_id:    u32,
    pub segment:    [f64; 4],
}

impl StopRow {
    pub fn from_snap(s: &SnappedStop) -> Self {
        let p = &s.projection;
        Self {
            stop_id:    s.stop.0,
            centroid_x: s.centroid.x,
            centroid_y: s.centroid.y,
            stop_x:     p.point.x,
            stop_y:     p.point.y,
            offset:     p.distance(),
            line_id:    p.line.0,
            segment:    [p.segment.start.x, p.segment.start.y, p.segment.end.x, p.segment.end.y],
        }
    }
}

/// A centroid that could not be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedStopRow {
    pub stop_id:    u32,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub reason:     String,
}

impl FailedStopRow {
    pub fn from_failure(f: &FailedStop) -> Self {
        Self {
            stop_id:    f.stop.0,
            centroid_x: f.centroid.x,
            centroid_y: f.centroid.y,
            reason:     f.error.to_string(),
        }
    }
}
