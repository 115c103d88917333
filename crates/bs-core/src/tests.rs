//! Unit tests for bs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LineId, StopId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(usize::from(VertexId(3)), 3);
    }

    #[test]
    fn display() {
        assert_eq!(LineId(7).to_string(), "LineId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, DistanceMetric, Point};

    #[test]
    fn vector_ops() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!(a + b, Point::new(5.0, 8.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a.dot(b), 16.0);
        assert_eq!(a.distance_2(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn checked_rejects_nan() {
        assert!(Point::checked(1.0, 2.0).is_ok());
        assert!(matches!(
            Point::checked(f64::NAN, 0.0),
            Err(CoreError::NonFiniteCoordinate { .. })
        ));
        assert!(Point::checked(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn haversine_one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = Point::new(-71.06, 42.0);
        let b = Point::new(-71.06, 43.0);
        let d = a.haversine_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn half_mile_in_boston() {
        // 0.5 mi ≈ 804.7 m; ~0.00724° of latitude.
        let a = Point::new(-71.06, 42.36);
        let b = Point::new(-71.06, 42.36 + 0.00724);
        let d = DistanceMetric::Haversine.distance(a, b);
        assert!((d - 804.7).abs() < 5.0, "got {d}");
    }

    #[test]
    fn planar_metric_is_euclidean() {
        let d = DistanceMetric::Planar.distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(d, 5.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SeededRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        let va: Vec<f64> = (0..16).map(|_| a.unit()).collect();
        let vb: Vec<f64> = (0..16).map(|_| b.unit()).collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn children_are_reproducible_and_distinct() {
        let mut root1 = SeededRng::new(99);
        let mut root2 = SeededRng::new(99);
        assert_eq!(root1.child(0).unit(), root2.child(0).unit());

        let mut d1 = root1.child(1);
        let mut e1 = root2.child(2);
        assert_ne!(d1.index(1 << 30), e1.index(1 << 30));
    }

    #[test]
    fn index_and_unit_in_bounds() {
        let mut r = SeededRng::new(1);
        for _ in 0..100 {
            assert!(r.index(10) < 10);
            let u = r.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
