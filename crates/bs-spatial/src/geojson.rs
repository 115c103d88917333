//! GeoJSON loader, enabled with the `geojson` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use bs_spatial::geojson::{load_points, load_road_network};
//!
//! let network = load_road_network(Path::new("roads.geojson"))?;
//! let students = load_points(Path::new("students.geojson"))?;
//! ```
//!
//! # What is loaded
//!
//! The input must be a `FeatureCollection`.
//!
//! Roads: `LineString` and `MultiLineString` features; each part of a
//! multi-line becomes its own LineString.  Lines with fewer than two
//! vertices are skipped (logged at `warn`).  The `name` property and the
//! feature `id` (or `id` property) are kept as metadata.
//!
//! Points: `Point` features, plus the first position of each `MultiPoint`.
//!
//! Features with a null geometry or another geometry type are skipped.
//! Positions are read as `[x, y]` (`[lon, lat]`); extra dimensions are
//! ignored.

use std::fs;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, GeoJson, JsonValue, Value};
use tracing::{debug, warn};

use bs_core::Point;

use crate::network::{LineString, RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a road network from a GeoJSON file.
///
/// # Errors
///
/// [`SpatialError::Io`] on file errors, [`SpatialError::Parse`] on text
/// that is not GeoJSON, [`SpatialError::GeoJson`] when the document is not
/// a FeatureCollection or holds an unusable position.
pub fn load_road_network(path: &Path) -> SpatialResult<RoadNetwork> {
    road_network_from_str(&fs::read_to_string(path)?)
}

/// Parse a road network from GeoJSON text.  See [`load_road_network`].
pub fn road_network_from_str(text: &str) -> SpatialResult<RoadNetwork> {
    let features = feature_collection(text)?;

    let mut builder = RoadNetworkBuilder::with_capacity(features.len());
    let mut skipped = 0usize;

    for (i, feature) in features.iter().enumerate() {
        let parts: Vec<Vec<Point>> = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::LineString(line)) => vec![positions(line, i)?],
            Some(Value::MultiLineString(lines)) => lines
                .iter()
                .map(|line| positions(line, i))
                .collect::<SpatialResult<_>>()?,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let name = property(feature, "name").and_then(|v| v.as_str()).map(str::to_owned);
        let source_id = feature_id(feature);

        for vertices in parts {
            match LineString::new(vertices) {
                Ok(mut line) => {
                    line.name = name.clone();
                    line.source_id = source_id.clone();
                    builder.push(line);
                }
                Err(SpatialError::TooFewVertices { vertices }) => {
                    warn!(feature = i, vertices, "skipping road line with fewer than 2 vertices");
                }
                Err(e) => return Err(e),
            }
        }
    }

    debug!(lines = builder.line_count(), skipped, "parsed GeoJSON road network");
    Ok(builder.build())
}

/// Load point locations (e.g. students) from a GeoJSON file.
///
/// # Errors
///
/// As for [`load_road_network`].
pub fn load_points(path: &Path) -> SpatialResult<Vec<Point>> {
    points_from_str(&fs::read_to_string(path)?)
}

/// Parse point locations from GeoJSON text.  See [`load_points`].
pub fn points_from_str(text: &str) -> SpatialResult<Vec<Point>> {
    let features = feature_collection(text)?;

    let mut points = Vec::with_capacity(features.len());
    for (i, feature) in features.iter().enumerate() {
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Point(pos)) => points.push(position(pos, i)?),
            Some(Value::MultiPoint(positions)) => {
                let first = positions.first().ok_or_else(|| malformed(i, "MultiPoint has no positions"))?;
                points.push(position(first, i)?);
            }
            _ => {}
        }
    }

    debug!(points = points.len(), "parsed GeoJSON points");
    Ok(points)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn malformed(feature: usize, what: &str) -> SpatialError {
    SpatialError::GeoJson(format!("feature {feature}: {what}"))
}

fn feature_collection(text: &str) -> SpatialResult<Vec<Feature>> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        _ => Err(SpatialError::GeoJson("top-level object is not a FeatureCollection".into())),
    }
}

fn property<'f>(feature: &'f Feature, key: &str) -> Option<&'f JsonValue> {
    feature.properties.as_ref().and_then(|p| p.get(key))
}

/// The feature `id`, falling back to an `id` property.
fn feature_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => match property(feature, "id")? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        },
    }
}

fn position(pos: &[f64], feature: usize) -> SpatialResult<Point> {
    match *pos {
        [x, y, ..] => Point::checked(x, y).map_err(|e| malformed(feature, &e.to_string())),
        _ => Err(malformed(feature, "position needs at least 2 coordinates")),
    }
}

fn positions(line: &[Vec<f64>], feature: usize) -> SpatialResult<Vec<Point>> {
    line.iter().map(|pos| position(pos, feature)).collect()
}
