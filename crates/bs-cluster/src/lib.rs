//! `bs-cluster` — the clustering engine.
//!
//! Partitions student pickup points into `k` clusters and returns the `k`
//! centroids used as candidate bus-stop locations.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`config`] | `ClusterConfig`                                          |
//! | [`kmeans`] | `kmeans`, `validate`, `distinct_points`, `Clustering`    |
//! | `init`     | greedy k-means++ seeding                                 |
//! | `lloyd`    | assignment / mean-update refinement loop                 |
//! | [`error`]  | `ClusterError`, `InvalidConfig`, `ClusterResult<T>`      |
//!
//! # Determinism
//!
//! All randomness flows from `ClusterConfig::seed` through
//! [`bs_core::SeededRng`], so the same seed and input always produce the
//! same centroids.

pub mod config;
pub mod error;
pub mod kmeans;

mod init;
mod lloyd;

#[cfg(test)]
mod tests;

pub use config::ClusterConfig;
pub use error::{ClusterError, ClusterResult, InvalidConfig};
pub use kmeans::{Clustering, distinct_points, kmeans, validate};
