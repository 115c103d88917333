//! The road-snap engine.
//!
//! # Candidate narrowing
//!
//! For a query point `p`:
//!
//! 1. Collect every indexed vertex inside the square window of half-width
//!    `r` around `p`.
//! 2. With an [`ExactRadius`] configured, drop vertices farther than that
//!    distance from `p`.
//! 3. Deduplicate to the owning LineStrings.
//! 4. If fewer than `min_candidates` lines remain, or none of them has a
//!    segment of non-zero length, multiply `r` (and the exact radius) by
//!    `growth_factor` and try again, up to `max_expansions` times.  The last
//!    attempt accepts any non-empty candidate set.
//!
//! # Exact projection
//!
//! Every non-degenerate segment of every candidate line is projected with
//! [`Projection::compute`]; the result is a fold keeping the first minimum.

use tracing::debug;

use bs_core::{DistanceMetric, LineId, Point};

use crate::geometry::Projection;
use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Optional second-stage filter: keep only lines with a vertex within
/// `distance` of the query point, measured with `metric`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactRadius {
    pub distance: f64,
    pub metric:   DistanceMetric,
}

impl ExactRadius {
    pub fn planar(distance: f64) -> Self {
        Self { distance, metric: DistanceMetric::Planar }
    }

    /// A great-circle radius; coordinates must be `(lon, lat)` degrees.
    pub fn metres(distance: f64) -> Self {
        Self { distance, metric: DistanceMetric::Haversine }
    }

    pub fn miles(distance: f64) -> Self {
        Self::metres(distance * 1_609.344)
    }
}

/// Search-window parameters.  Their right values depend on the data set's
/// coordinate units and street density.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapConfig {
    /// Half-width of the first search window, in coordinate units.
    pub initial_radius: f64,
    /// Window multiplier applied on every retry (must be > 1).
    pub growth_factor: f64,
    /// Retries after the first window before giving up.
    pub max_expansions: u32,
    /// Candidate lines wanted before the window stops growing.
    pub min_candidates: usize,
    /// Optional exact-distance filter on candidate vertices.
    pub exact_radius: Option<ExactRadius>,
}

impl Default for SnapConfig {
    /// 0.01° first window (≈1 km at city latitudes), doubled up to ten times.
    fn default() -> Self {
        Self {
            initial_radius: 0.01,
            growth_factor:  2.0,
            max_expansions: 10,
            min_candidates: 1,
            exact_radius:   None,
        }
    }
}

impl SnapConfig {
    /// Largest window half-width the engine will try.
    pub fn max_radius(&self) -> f64 {
        self.initial_radius * self.growth_factor.powi(self.max_expansions as i32)
    }

    /// # Errors
    ///
    /// [`SpatialError::InvalidConfiguration`] for a non-positive radius, a
    /// growth factor ≤ 1, or `min_candidates == 0`.
    pub fn validate(&self) -> SpatialResult<()> {
        if !(self.initial_radius.is_finite() && self.initial_radius > 0.0) {
            return Err(SpatialError::InvalidConfiguration(format!(
                "initial_radius must be positive, got {}",
                self.initial_radius
            )));
        }
        if !(self.growth_factor.is_finite() && self.growth_factor > 1.0) {
            return Err(SpatialError::InvalidConfiguration(format!(
                "growth_factor must be greater than 1, got {}",
                self.growth_factor
            )));
        }
        if self.min_candidates == 0 {
            return Err(SpatialError::InvalidConfiguration("min_candidates must be at least 1".into()));
        }
        if let Some(exact) = self.exact_radius {
            if !(exact.distance.is_finite() && exact.distance > 0.0) {
                return Err(SpatialError::InvalidConfiguration(format!(
                    "exact radius must be positive, got {}",
                    exact.distance
                )));
            }
        }
        Ok(())
    }
}

// ── RoadSnapper ───────────────────────────────────────────────────────────────

/// Snaps points onto a borrowed [`RoadNetwork`].
///
/// Holds only shared references, so one snapper can serve many threads.
///
/// # Example
///
/// ```
/// use bs_core::Point;
/// use bs_spatial::{RoadNetworkBuilder, RoadSnapper, SnapConfig};
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_line(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).unwrap();
/// let net = b.build();
///
/// let snapper = RoadSnapper::new(&net, SnapConfig { initial_radius: 1.0, ..Default::default() }).unwrap();
/// let hit = snapper.snap(Point::new(5.0, 3.0)).unwrap();
/// assert_eq!(hit.point, Point::new(5.0, 0.0));
/// assert_eq!(hit.distance_2, 9.0);
/// ```
pub struct RoadSnapper<'a> {
    network: &'a RoadNetwork,
    config:  SnapConfig,
}

impl<'a> RoadSnapper<'a> {
    /// # Errors
    ///
    /// [`SpatialError::EmptyNetwork`] if `network` has no lines;
    /// [`SpatialError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(network: &'a RoadNetwork, config: SnapConfig) -> SpatialResult<Self> {
        config.validate()?;
        if network.is_empty() {
            return Err(SpatialError::EmptyNetwork);
        }
        Ok(Self { network, config })
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    /// Distinct candidate lines for `p` in a window of half-width `radius`,
    /// after the exact-radius filter scaled to `radius`.
    pub fn candidates(&self, p: Point, radius: f64) -> Vec<LineId> {
        match self.config.exact_radius {
            None => self.network.lines_in_window(p, radius),
            Some(exact) => {
                let limit = exact.distance * (radius / self.config.initial_radius);
                self.network
                    .lines_in_window_where(p, radius, |v| exact.metric.distance(p, v) <= limit)
            }
        }
    }

    /// Nearest projection of `p` onto the non-degenerate segments of
    /// `lines`, or `None` if every segment is zero-length.
    pub fn nearest_on(&self, p: Point, lines: &[LineId]) -> Option<Projection> {
        lines
            .iter()
            .flat_map(|&id| {
                self.network
                    .line(id)
                    .segments()
                    .filter_map(move |seg| Projection::compute(p, seg, id))
            })
            .fold(None, |best: Option<Projection>, cand| match best {
                Some(b) if b.distance_2 <= cand.distance_2 => Some(b),
                _ => Some(cand),
            })
    }

    /// Snap one point onto the network.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoNetworkNearby`] if no candidate segment is found
    /// after `max_expansions` window enlargements.
    pub fn snap(&self, p: Point) -> SpatialResult<Projection> {
        let mut radius = self.config.initial_radius;

        for attempt in 0..=self.config.max_expansions {
            let candidates = self.candidates(p, radius);
            let last = attempt == self.config.max_expansions;

            if candidates.len() >= self.config.min_candidates || (last && !candidates.is_empty()) {
                if let Some(best) = self.nearest_on(p, &candidates) {
                    return Ok(best);
                }
            }

            if !last {
                debug!(
                    x = p.x,
                    y = p.y,
                    radius,
                    found = candidates.len(),
                    "too few road candidates, enlarging search window"
                );
                radius *= self.config.growth_factor;
            }
        }

        Err(SpatialError::NoNetworkNearby { point: p, radius })
    }

    /// Snap every point independently; results are in input order.
    pub fn snap_all(&self, points: &[Point]) -> Vec<SpatialResult<Projection>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            points.par_iter().map(|&p| self.snap(p)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            points.iter().map(|&p| self.snap(p)).collect()
        }
    }
}

/// One-shot convenience: validate, then snap a single point.
///
/// # Errors
///
/// See [`RoadSnapper::new`] and [`RoadSnapper::snap`].
pub fn snap_to_network(network: &RoadNetwork, p: Point, config: SnapConfig) -> SpatialResult<Projection> {
    RoadSnapper::new(network, config)?.snap(p)
}
