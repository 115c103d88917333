//! `bs-pipeline` — turns pickup points into bus stops.
//!
//! # Run sequence
//!
//! ```text
//! StopPipeline::new(config, &network)   validate everything, reject an empty network
//! run(points, observer):
//!   ① Cluster  — bs_cluster::kmeans → k centroids   (on_clustered)
//!   ② Snap     — for each centroid in StopId order:
//!                  Ok(projection)       → on_stop
//!                  Err(no road nearby)  → on_stop_failed, then per FailurePolicy
//!   ③ End      — on_end(&RunSummary), also after an interrupt or abort
//! ```
//!
//! `run_centroids` starts at ② for callers that already have centroids
//! (e.g. from a cache).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Snaps centroids in chunks on Rayon's thread pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `PipelineConfig`.    |
//!
//! The batched path has its own tests:
//!
//! ```text
//! cargo test -p bs-pipeline --features parallel
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod report;


pub use config::{FailurePolicy, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use observer::{NoopObserver, StopCollector, StopObserver};
pub use pipeline::StopPipeline;
pub use report::{FailedStop, RunSummary, SnappedStop};
