//! `bs-core` — foundational types for the bus-stop synthesis workspace.
//!
//! This crate is a dependency of every other `bs-*` crate.  It has no `bs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`geo`]     | `Point`, `DistanceMetric`, haversine distance           |
//! | [`ids`]     | `LineId`, `VertexId`, `StopId`                          |
//! | [`rng`]     | `SeededRng` (reproducible clustering randomness)        |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Point`, the metric, ids.|

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{DistanceMetric, Point};
pub use ids::{LineId, StopId, VertexId};
pub use rng::SeededRng;
