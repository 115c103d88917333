//! Synthetic street grid for the xsmall demo.
//!
//! Four avenues and four cross streets laid out like a small Back Bay–style
//! neighbourhood, in `(lon, lat)` degrees.  One avenue repeats a vertex so
//! the zero-length segment path is exercised.

use bs_core::Point;
use bs_spatial::{LineString, RoadNetwork, RoadNetworkBuilder, SpatialResult};

const WEST:  f64 = -71.090;
const EAST:  f64 = -71.060;
const SOUTH: f64 = 42.340;
const NORTH: f64 = 42.360;

const AVENUES: [(&str, f64); 4] = [
    ("Beacon St", 42.358),
    ("Commonwealth Ave", 42.352),
    ("Boylston St", 42.347),
    ("Columbus Ave", 42.342),
];

const CROSS_STREETS: [(&str, f64); 4] = [
    ("Massachusetts Ave", -71.087),
    ("Hereford St", -71.080),
    ("Exeter St", -71.072),
    ("Arlington St", -71.064),
];

/// Vertices every 0.005° along a straight street from `a` to `b`.
fn street(a: Point, b: Point) -> Vec<Point> {
    let steps = ((b.distance(a) / 0.005).ceil() as usize).max(1);
    (0..=steps).map(|i| a + (b - a) * (i as f64 / steps as f64)).collect()
}

/// Build the 8-street grid.
pub fn build_network() -> SpatialResult<RoadNetwork> {
    let mut b = RoadNetworkBuilder::with_capacity(AVENUES.len() + CROSS_STREETS.len());

    for (i, (name, lat)) in AVENUES.into_iter().enumerate() {
        let mut vertices = street(Point::new(WEST, lat), Point::new(EAST, lat));
        if i == 1 {
            // Digitising artefact: a doubled vertex mid-avenue.
            vertices.insert(3, vertices[3]);
        }
        b.push(LineString::new(vertices)?.with_name(name).with_source_id(format!("avenue/{i}")));
    }

    for (i, (name, lon)) in CROSS_STREETS.into_iter().enumerate() {
        let vertices = street(Point::new(lon, SOUTH), Point::new(lon, NORTH));
        b.push(LineString::new(vertices)?.with_name(name).with_source_id(format!("cross/{i}")));
    }

    Ok(b.build())
}
