//! Public clustering entry point.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use bs_core::{Point, SeededRng, StopId};

use crate::config::ClusterConfig;
use crate::error::{ClusterResult, InvalidConfig};
use crate::{init, lloyd};

/// Result of a clustering run.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// One centroid per stop; `centroids[s.index()]` is stop `s`.
    pub centroids: Vec<Point>,
    /// Stop assigned to each input point, parallel to the input slice.
    pub assignments: Vec<StopId>,
    /// Total squared distance from each point to its centroid.
    pub inertia: f64,
    /// Assignment passes run by the winning restart.
    pub iterations: usize,
    /// `false` if the winning restart hit `max_iter` with assignments still
    /// moving.
    pub converged: bool,
}

impl Clustering {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Number of input points assigned to each stop.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.k()];
        for a in &self.assignments {
            sizes[a.index()] += 1;
        }
        sizes
    }

    /// Indices (into the input slice) of the points assigned to `stop`.
    pub fn members(&self, stop: StopId) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |&(_, a)| *a == stop)
            .map(|(i, _)| i)
    }
}

/// Bit pattern of a point with `-0.0` folded into `0.0`.
#[inline]
fn point_key(p: Point) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Count distinct coordinates, stopping early once `limit` is reached.
fn count_distinct(points: &[Point], limit: usize) -> usize {
    let mut seen = FxHashSet::default();
    for p in points {
        seen.insert(point_key(*p));
        if seen.len() >= limit {
            break;
        }
    }
    seen.len()
}

/// Number of distinct coordinates in `points`.
pub fn distinct_points(points: &[Point]) -> usize {
    count_distinct(points, usize::MAX)
}

/// Check `points` and `config` without doing any clustering work.
///
/// # Errors
///
/// [`ClusterError::InvalidConfiguration`](crate::ClusterError) for an empty
/// input, `k == 0`, `k` above the distinct point count, a non-finite
/// coordinate, or a zero iteration/restart budget.
pub fn validate(points: &[Point], config: &ClusterConfig) -> ClusterResult<()> {
    if points.is_empty() {
        return Err(InvalidConfig::EmptyInput.into());
    }
    config.validate()?;
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(InvalidConfig::NonFinitePoint { index }.into());
    }
    if config.k > points.len() {
        return Err(InvalidConfig::TooManyClusters { k: config.k, distinct: distinct_points(points) }.into());
    }
    let distinct = count_distinct(points, config.k);
    if distinct < config.k {
        return Err(InvalidConfig::TooManyClusters { k: config.k, distinct }.into());
    }
    Ok(())
}

/// Cluster `points` into exactly `config.k` centroids.
///
/// Runs `config.n_init` seeded k-means++ + Lloyd restarts and keeps the one
/// with the lowest inertia (the first one on ties).
///
/// # Example
///
/// ```
/// use bs_core::Point;
/// use bs_cluster::{ClusterConfig, kmeans};
///
/// let pts = [
///     Point::new(0.0, 0.0), Point::new(0.0, 1.0),
///     Point::new(10.0, 0.0), Point::new(10.0, 1.0),
/// ];
/// let c = kmeans(&pts, &ClusterConfig::new(2, 0)).unwrap();
/// assert_eq!(c.k(), 2);
/// assert_eq!(c.cluster_sizes(), vec![2, 2]);
/// ```
pub fn kmeans(points: &[Point], config: &ClusterConfig) -> ClusterResult<Clustering> {
    validate(points, config)?;

    let mut root = SeededRng::new(config.seed);
    let mut best: Option<Clustering> = None;

    for run in 0..config.n_init {
        let mut rng = root.child(run as u64);
        let initial = init::plus_plus(&mut rng, points, config.k);
        if initial.len() < config.k {
            // Unreachable after validation; fail rather than emit fewer stops.
            return Err(InvalidConfig::TooManyClusters { k: config.k, distinct: initial.len() }.into());
        }

        let outcome = lloyd::lloyd_loop(points, initial, config.max_iter);
        debug!(
            run,
            inertia = outcome.inertia,
            iterations = outcome.iterations,
            converged = outcome.converged,
            "k-means restart finished"
        );

        if best.as_ref().is_none_or(|b| outcome.inertia < b.inertia) {
            best = Some(Clustering {
                centroids:   outcome.centroids,
                assignments: outcome.assignments,
                inertia:     outcome.inertia,
                iterations:  outcome.iterations,
                converged:   outcome.converged,
            });
        }
    }

    let Some(best) = best else {
        return Err(InvalidConfig::ZeroRestarts.into());
    };
    info!(
        points = points.len(),
        k = best.k(),
        inertia = best.inertia,
        iterations = best.iterations,
        "clustering complete"
    );
    Ok(best)
}
