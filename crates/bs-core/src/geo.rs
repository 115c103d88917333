//! Planar point type and the distance helpers the snap engine needs.
//!
//! `Point` uses `f64` so geographic inputs (longitude/latitude degrees) keep
//! sub-metre precision through the projection arithmetic.  Geographic data
//! follows GeoJSON order: `x = longitude`, `y = latitude`.

use std::ops::{Add, Mul, Sub};

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A 2-D coordinate.  Immutable by convention: all operations return new
/// values.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Construct a point, rejecting NaN and infinite coordinates.
    pub fn checked(x: f64, y: f64) -> CoreResult<Self> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(CoreError::NonFiniteCoordinate { x, y })
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean distance in coordinate units.
    #[inline]
    pub fn distance_2(self, other: Point) -> f64 {
        let d = self - other;
        d.dot(d)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Haversine great-circle distance in metres, reading `x` as longitude
    /// and `y` as latitude (degrees).
    pub fn haversine_m(self, other: Point) -> f64 {
        let d_lat = (other.y - self.y).to_radians();
        let d_lon = (other.x - self.x).to_radians();

        let lat1 = self.y.to_radians();
        let lat2 = other.y.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

// ── DistanceMetric ────────────────────────────────────────────────────────────

/// How a real-world radius is measured between two points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// Euclidean distance in raw coordinate units.
    #[default]
    Planar,
    /// Great-circle metres; points are `(longitude, latitude)` degrees.
    Haversine,
}

impl DistanceMetric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            DistanceMetric::Planar => a.distance(b),
            DistanceMetric::Haversine => a.haversine_m(b),
        }
    }
}
