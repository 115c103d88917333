//! Unit tests for bs-cluster.

#[cfg(test)]
mod helpers {
    use bs_core::{Point, SeededRng};

    /// Three tight blobs of `per_blob` points around (0,0), (100,0), (0,100).
    pub fn three_blobs(per_blob: usize, seed: u64) -> Vec<Point> {
        let centres = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 100.0)];
        let mut rng = SeededRng::new(seed);
        let mut pts = Vec::with_capacity(per_blob * centres.len());
        for c in centres {
            for _ in 0..per_blob {
                pts.push(Point::new(c.x + rng.unit() * 2.0 - 1.0, c.y + rng.unit() * 2.0 - 1.0));
            }
        }
        pts
    }

    /// Uniform scatter in a 50×50 square.
    pub fn scatter(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = SeededRng::new(seed);
        (0..n).map(|_| Point::new(rng.unit() * 50.0, rng.unit() * 50.0)).collect()
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use bs_core::Point;

    use crate::{ClusterConfig, ClusterError, InvalidConfig, distinct_points, kmeans, validate};

    fn reason(err: ClusterError) -> InvalidConfig {
        match err {
            ClusterError::InvalidConfiguration(r) => r,
        }
    }

    #[test]
    fn empty_input_rejected() {
        let err = kmeans(&[], &ClusterConfig::new(1, 0)).unwrap_err();
        assert_eq!(reason(err), InvalidConfig::EmptyInput);
    }

    #[test]
    fn zero_k_rejected() {
        let err = kmeans(&[Point::new(0.0, 0.0)], &ClusterConfig::new(0, 0)).unwrap_err();
        assert_eq!(reason(err), InvalidConfig::ZeroClusters);
    }

    #[test]
    fn k_above_distinct_points_rejected() {
        // Five points but only two distinct locations.
        let pts = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ];
        let err = kmeans(&pts, &ClusterConfig::new(3, 0)).unwrap_err();
        assert_eq!(reason(err), InvalidConfig::TooManyClusters { k: 3, distinct: 2 });
    }

    #[test]
    fn k_above_point_count_rejected() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let err = kmeans(&pts, &ClusterConfig::new(3, 0)).unwrap_err();
        assert_eq!(reason(err), InvalidConfig::TooManyClusters { k: 3, distinct: 2 });
    }

    #[test]
    fn negative_zero_is_not_distinct() {
        let pts = [Point::new(0.0, 0.0), Point::new(-0.0, 0.0)];
        assert_eq!(distinct_points(&pts), 1);
    }

    #[test]
    fn non_finite_rejected() {
        let pts = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        let err = validate(&pts, &ClusterConfig::new(1, 0)).unwrap_err();
        assert_eq!(reason(err), InvalidConfig::NonFinitePoint { index: 1 });
    }

    #[test]
    fn zero_budgets_rejected() {
        let pts = [Point::new(0.0, 0.0)];
        let no_iter = ClusterConfig::new(1, 0).with_max_iter(0);
        assert_eq!(reason(validate(&pts, &no_iter).unwrap_err()), InvalidConfig::ZeroIterations);
        let no_runs = ClusterConfig::new(1, 0).with_restarts(0);
        assert_eq!(reason(validate(&pts, &no_runs).unwrap_err()), InvalidConfig::ZeroRestarts);
    }

    #[test]
    fn config_checks_need_no_points() {
        assert!(ClusterConfig::new(5_000, 0).validate().is_ok());
        assert_eq!(reason(ClusterConfig::new(0, 0).validate().unwrap_err()), InvalidConfig::ZeroClusters);
    }

    #[test]
    fn k_equal_to_distinct_accepted() {
        let pts = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(5.0, 5.0)];
        let c = kmeans(&pts, &ClusterConfig::new(2, 3)).unwrap();
        assert_eq!(c.k(), 2);
        assert!(c.cluster_sizes().iter().all(|&s| s > 0));
    }
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding {
    use bs_core::{Point, SeededRng};

    use crate::init::plus_plus;

    #[test]
    fn returns_k_distinct_centres() {
        let pts = super::helpers::scatter(200, 11);
        let mut rng = SeededRng::new(5);
        for k in [1, 2, 7, 50, 200] {
            let centres = plus_plus(&mut rng, &pts, k);
            assert_eq!(centres.len(), k);
            let distinct = crate::distinct_points(&centres);
            assert_eq!(distinct, k, "k-means++ picked a duplicate centre for k={k}");
        }
    }

    #[test]
    fn duplicates_in_input_never_double_picked() {
        let mut pts = vec![Point::new(0.0, 0.0); 50];
        pts.push(Point::new(1.0, 0.0));
        pts.push(Point::new(2.0, 0.0));
        let mut rng = SeededRng::new(0);
        let centres = plus_plus(&mut rng, &pts, 3);
        assert_eq!(centres.len(), 3);
        assert_eq!(crate::distinct_points(&centres), 3);
    }

    #[test]
    fn stops_short_when_input_exhausted() {
        let pts = [Point::new(3.0, 3.0); 4];
        let mut rng = SeededRng::new(0);
        assert_eq!(plus_plus(&mut rng, &pts, 2).len(), 1);
    }
}

// ── Refinement ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod refinement {
    use bs_core::{Point, StopId};

    use crate::lloyd::{assign, update};

    #[test]
    fn assign_picks_nearest() {
        let pts = [Point::new(0.0, 0.0), Point::new(9.0, 0.0), Point::new(4.0, 0.0)];
        let centroids = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let mut a = vec![StopId(u32::MAX); 3];
        assert!(assign(&pts, &centroids, &mut a));
        assert_eq!(a, [StopId(0), StopId(1), StopId(0)]);
        // Second pass: nothing moves.
        assert!(!assign(&pts, &centroids, &mut a));
    }

    #[test]
    fn update_takes_means() {
        let pts = [Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(10.0, 0.0)];
        let mut a = vec![StopId(0), StopId(0), StopId(1)];
        let mut centroids = vec![Point::new(-5.0, -5.0), Point::new(50.0, 50.0)];
        update(&pts, &mut a, &mut centroids);
        assert_eq!(centroids, [Point::new(1.0, 1.0), Point::new(10.0, 0.0)]);
    }

    #[test]
    fn empty_cluster_gets_farthest_point() {
        // All points in cluster 0; cluster 1 empty.  (20,0) is farthest from
        // centroid (0,0) and must move.
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(20.0, 0.0)];
        let mut a = vec![StopId(0); 3];
        let mut centroids = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
        update(&pts, &mut a, &mut centroids);
        assert_eq!(a, [StopId(0), StopId(0), StopId(1)]);
        assert_eq!(centroids, [Point::new(0.5, 0.0), Point::new(20.0, 0.0)]);
    }
}

// ── End-to-end clustering ─────────────────────────────────────────────────────

#[cfg(test)]
mod clustering {
    use bs_core::{Point, StopId};

    use crate::{ClusterConfig, kmeans};

    #[test]
    fn returns_exactly_k_centroids() {
        let pts = super::helpers::scatter(300, 1);
        for k in [1, 5, 40, 300] {
            let c = kmeans(&pts, &ClusterConfig::new(k, 0)).unwrap();
            assert_eq!(c.centroids.len(), k);
            assert_eq!(c.assignments.len(), pts.len());
            assert!(c.cluster_sizes().iter().all(|&s| s > 0), "empty cluster for k={k}");
        }
    }

    #[test]
    fn centroids_are_means_of_assigned_points() {
        let pts = super::helpers::scatter(500, 2);
        let c = kmeans(&pts, &ClusterConfig::new(25, 9)).unwrap();

        for s in (0..c.k() as u32).map(StopId) {
            let members: Vec<Point> = c.members(s).map(|i| pts[i]).collect();
            assert!(!members.is_empty());
            let sum = members.iter().fold(Point::default(), |acc, &p| acc + p);
            let mean = sum * (1.0 / members.len() as f64);
            let got = c.centroids[s.index()];
            assert!(got.distance(mean) < 1e-9, "stop {s}: centroid {got} != mean {mean}");
        }
    }

    #[test]
    fn same_seed_same_centroids() {
        let pts = super::helpers::scatter(400, 3);
        let cfg = ClusterConfig::new(12, 1234).with_restarts(3);
        let a = kmeans(&pts, &cfg).unwrap();
        let b = kmeans(&pts, &cfg).unwrap();
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.assignments, b.assignments);
    }

    #[test]
    fn finds_separated_blobs() {
        let pts = super::helpers::three_blobs(60, 4);
        let c = kmeans(&pts, &ClusterConfig::new(3, 0).with_restarts(4)).unwrap();
        assert!(c.converged);
        assert_eq!(c.cluster_sizes().iter().copied().max(), Some(60));

        for target in [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 100.0)] {
            let hit = c.centroids.iter().any(|m| m.distance(target) < 1.0);
            assert!(hit, "no centroid near {target}: {:?}", c.centroids);
        }
    }

    #[test]
    fn more_restarts_never_worse() {
        let pts = super::helpers::scatter(300, 5);
        let one = kmeans(&pts, &ClusterConfig::new(10, 77)).unwrap();
        let many = kmeans(&pts, &ClusterConfig::new(10, 77).with_restarts(5)).unwrap();
        // Restart 0 is shared, so the best of five can only improve on it.
        assert!(many.inertia <= one.inertia);
    }

    #[test]
    fn iteration_cap_still_yields_means() {
        let pts = super::helpers::scatter(300, 6);
        let c = kmeans(&pts, &ClusterConfig::new(30, 0).with_max_iter(1)).unwrap();
        assert_eq!(c.iterations, 1);
        for s in (0..c.k() as u32).map(StopId) {
            let members: Vec<Point> = c.members(s).map(|i| pts[i]).collect();
            let mean = members.iter().fold(Point::default(), |acc, &p| acc + p)
                * (1.0 / members.len() as f64);
            assert!(c.centroids[s.index()].distance(mean) < 1e-9);
        }
    }
}
