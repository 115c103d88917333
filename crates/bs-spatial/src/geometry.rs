//! Point-to-segment projection.
//!
//! For a segment `l1 → l2` and query point `p`, the foot of the perpendicular
//! onto the infinite line is
//!
//! ```text
//! foot = l1 + ((p - l1)·(l2 - l1) / (l2 - l1)·(l2 - l1)) · (l2 - l1)
//! ```
//!
//! If `foot - l1` and `foot - l2` point the same way (dot ≥ 0) the foot lies
//! outside the segment and the nearer endpoint wins; otherwise the foot is
//! the answer.  Zero-length segments have no direction and yield `None`.

use bs_core::{LineId, Point};

/// A pair of adjacent LineString vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Point,
    pub end:   Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length_2(&self) -> f64 {
        self.start.distance_2(self.end)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length_2() == 0.0
    }

    /// Foot of the perpendicular from `p` onto the line through this
    /// segment, or `None` for a zero-length segment.
    pub fn foot_of_perpendicular(&self, p: Point) -> Option<Point> {
        let line = self.end - self.start;
        let len_2 = line.dot(line);
        if len_2 == 0.0 {
            return None;
        }
        let t = (p - self.start).dot(line) / len_2;
        Some(self.start + line * t)
    }
}

/// Nearest point to `p` on `segment`, or `None` if the segment is
/// degenerate.
pub fn project_onto_segment(p: Point, segment: Segment) -> Option<Point> {
    let foot = segment.foot_of_perpendicular(p)?;
    let to_start = foot - segment.start;
    let to_end = foot - segment.end;

    if to_start.dot(to_end) >= 0.0 {
        if to_start.dot(to_start) <= to_end.dot(to_end) {
            Some(segment.start)
        } else {
            Some(segment.end)
        }
    } else {
        Some(foot)
    }
}

/// The nearest network point found for one query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Squared distance from the query point to `point`.
    pub distance_2: f64,
    /// Projected location on the road.
    pub point: Point,
    /// Segment that produced the minimum.
    pub segment: Segment,
    /// LineString owning `segment`.
    pub line: LineId,
}

impl Projection {
    /// Project `p` onto `segment` of `line`.  `None` for a degenerate
    /// segment.
    pub fn compute(p: Point, segment: Segment, line: LineId) -> Option<Self> {
        let point = project_onto_segment(p, segment)?;
        Some(Self { distance_2: p.distance_2(point), point, segment, line })
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_2.sqrt()
    }
}
