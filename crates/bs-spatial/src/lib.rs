//! `bs-spatial` — road network, spatial indexing, and centroid snapping.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `LineString`, `RoadNetwork` (lines + vertex R-tree), builder |
//! | [`geometry`] | `Segment`, `Projection`, point-to-segment projection       |
//! | [`snap`]     | `SnapConfig`, `ExactRadius`, `RoadSnapper`                 |
//! | [`geojson`]  | GeoJSON road / point loading (feature = `"geojson"` only)  |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `geojson`  | Enables GeoJSON loading via the `geojson` crate.          |
//! | `parallel` | `RoadSnapper::snap_all` runs on the Rayon pool.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config types.        |

pub mod error;
pub mod geometry;
pub mod network;
pub mod snap;

#[cfg(feature = "geojson")]
pub mod geojson;


pub use error::{SpatialError, SpatialResult};
pub use geometry::{Projection, Segment, project_onto_segment};
pub use network::{LineString, RoadNetwork, RoadNetworkBuilder};
pub use snap::{ExactRadius, RoadSnapper, SnapConfig, snap_to_network};
