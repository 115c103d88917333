//! Lloyd refinement: assign every point to its nearest centroid, move each
//! centroid to the mean of its points, repeat until no assignment changes.
//!
//! Nearest-centroid lookups go through an R-tree rebuilt once per pass, so a
//! pass costs O(k log k + N log k) instead of O(N k).  City-scale runs use
//! k in the thousands.

use rstar::RTree;
use rstar::primitives::GeomWithData;

use bs_core::{Point, StopId};

type CentroidEntry = GeomWithData<[f64; 2], u32>;

pub(crate) struct LloydOutcome {
    pub centroids:   Vec<Point>,
    pub assignments: Vec<StopId>,
    pub inertia:     f64,
    pub iterations:  usize,
    pub converged:   bool,
}

/// Assign each point to its nearest centroid.  Returns `true` if any
/// assignment changed.
pub(crate) fn assign(points: &[Point], centroids: &[Point], assignments: &mut [StopId]) -> bool {
    let entries: Vec<CentroidEntry> = centroids
        .iter()
        .enumerate()
        .map(|(i, c)| GeomWithData::new(c.to_array(), i as u32))
        .collect();
    let tree = RTree::bulk_load(entries);

    let mut changed = false;
    for (p, slot) in points.iter().zip(assignments.iter_mut()) {
        let Some(nearest) = tree.nearest_neighbor(&p.to_array()) else {
            continue;
        };
        let stop = StopId(nearest.data);
        if *slot != stop {
            *slot = stop;
            changed = true;
        }
    }
    changed
}

/// Give every empty cluster one point.
///
/// Points are taken in order of decreasing distance to their current
/// centroid, and only from clusters that keep at least one member.  With
/// `N >= k` such a donor always exists.
fn fill_empty_clusters(
    points:      &[Point],
    centroids:   &[Point],
    assignments: &mut [StopId],
    counts:      &mut [usize],
) {
    let mut order: Vec<usize> = (0..points.len()).collect();
    let spread = |i: usize| points[i].distance_2(centroids[assignments[i].index()]);
    order.sort_by(|&a, &b| spread(b).total_cmp(&spread(a)).then(a.cmp(&b)));

    let mut donors = order.into_iter();
    for empty in 0..counts.len() {
        if counts[empty] != 0 {
            continue;
        }
        for i in donors.by_ref() {
            let from = assignments[i].index();
            if counts[from] > 1 {
                counts[from] -= 1;
                counts[empty] = 1;
                assignments[i] = StopId(empty as u32);
                break;
            }
        }
    }
}

/// Recompute every centroid as the arithmetic mean of its assigned points.
pub(crate) fn update(points: &[Point], assignments: &mut [StopId], centroids: &mut [Point]) {
    let k = centroids.len();
    let mut counts = vec![0usize; k];
    for a in assignments.iter() {
        counts[a.index()] += 1;
    }

    if counts.contains(&0) {
        fill_empty_clusters(points, centroids, assignments, &mut counts);
    }

    let mut sums = vec![Point::default(); k];
    for (p, a) in points.iter().zip(assignments.iter()) {
        sums[a.index()] = sums[a.index()] + *p;
    }

    for ((c, sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
        if count > 0 {
            *c = sum * (1.0 / count as f64);
        }
    }
}

/// Sum of squared distances from each point to its assigned centroid.
pub(crate) fn inertia(points: &[Point], centroids: &[Point], assignments: &[StopId]) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(p, a)| p.distance_2(centroids[a.index()]))
        .sum()
}

/// Run refinement from `initial` centroids.
pub(crate) fn lloyd_loop(points: &[Point], initial: Vec<Point>, max_iter: usize) -> LloydOutcome {
    let mut centroids = initial;
    let mut assignments = vec![StopId(u32::MAX); points.len()];
    let mut iterations = 0;
    let mut converged = false;

    for i in 1..=max_iter {
        iterations = i;
        if !assign(points, &centroids, &mut assignments) {
            // Centroids are already the means of these assignments.
            converged = true;
            break;
        }
        update(points, &mut assignments, &mut centroids);
    }

    let inertia = inertia(points, &centroids, &assignments);
    LloydOutcome { centroids, assignments, inertia, iterations, converged }
}
