//! Greedy k-means++ seeding.
//!
//! Each step samples several candidates with probability proportional to
//! their squared distance from the nearest chosen centre and keeps the one
//! that minimises the total potential (sum of min distances).  sklearn uses
//! `2 + ln(k)` candidates per step; so do we.

use bs_core::{Point, SeededRng};

/// Sample an index with probability proportional to `min_distances[i]`.
///
/// Never returns an index whose distance is zero while a positive one
/// exists, so distinct input points yield distinct centres.
fn sample_by_distance(rng: &mut SeededRng, min_distances: &[f64], sum: f64) -> usize {
    let threshold = rng.unit() * sum;
    let mut cumsum = 0.0;

    for (i, &d) in min_distances.iter().enumerate() {
        cumsum += d;
        if cumsum > threshold {
            return i;
        }
    }

    // Rounding left the threshold past the end.
    min_distances.iter().rposition(|&d| d > 0.0).unwrap_or(min_distances.len() - 1)
}

/// Choose up to `k` initial centres from `points`.
///
/// Returns fewer than `k` centres only when the points contain fewer than
/// `k` distinct locations; callers validate that beforehand.
pub(crate) fn plus_plus(rng: &mut SeededRng, points: &[Point], k: usize) -> Vec<Point> {
    let n = points.len();
    let mut centres = Vec::with_capacity(k);
    if n == 0 || k == 0 {
        return centres;
    }

    let n_candidates = 2 + (k as f64).ln() as usize;

    let first = points[rng.index(n)];
    centres.push(first);

    let mut min_distances: Vec<f64> = points.iter().map(|p| p.distance_2(first)).collect();
    let mut potential: f64 = min_distances.iter().sum();

    let mut scratch = vec![0.0f64; n];
    let mut best_distances = vec![0.0f64; n];

    while centres.len() < k && potential > 0.0 {
        let mut best: Option<(f64, usize)> = None;

        for _ in 0..n_candidates {
            let candidate = sample_by_distance(rng, &min_distances, potential);
            let c = points[candidate];

            let mut candidate_potential = 0.0;
            for (slot, (p, &current)) in scratch.iter_mut().zip(points.iter().zip(&min_distances)) {
                let d = p.distance_2(c).min(current);
                *slot = d;
                candidate_potential += d;
            }

            if best.is_none_or(|(bp, _)| candidate_potential < bp) {
                best = Some((candidate_potential, candidate));
                std::mem::swap(&mut scratch, &mut best_distances);
            }
        }

        let Some((best_potential, chosen)) = best else { break };
        centres.push(points[chosen]);
        std::mem::swap(&mut min_distances, &mut best_distances);
        potential = best_potential;
    }

    centres
}
