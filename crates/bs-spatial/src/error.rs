//! Spatial-subsystem error type.

use thiserror::Error;

use bs_core::Point;

/// Errors produced by `bs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("road network contains no line strings")]
    EmptyNetwork,

    #[error("no road segment found near {point} (searched half-width {radius})")]
    NoNetworkNearby { point: Point, radius: f64 },

    #[error("line string needs at least 2 vertices, got {vertices}")]
    TooFewVertices { vertices: usize },

    #[error("invalid snap configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "geojson")]
    #[error("GeoJSON parse error: {0}")]
    Parse(#[from] geojson::Error),

    #[cfg(feature = "geojson")]
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
