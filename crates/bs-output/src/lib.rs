//! `bs-output` — stop writers and the centroid cache.
//!
//! | Writer           | Files created                        |
//! |------------------|--------------------------------------|
//! | [`CsvWriter`]    | `stops.csv`, `failed_stops.csv`      |
//! | [`GeoJsonWriter`]| `stops.geojson`                      |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`StopOutputObserver`], which implements `bs_pipeline::StopObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bs_output::{CsvWriter, StopOutputObserver};
//!
//! let mut obs = StopOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! pipeline.run(&students, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```
//!
//! The [`cache`] module stores clustering results as JSON so repeated runs
//! over the same students skip k-means.

pub mod cache;
pub mod csv;
pub mod error;
pub mod geojson;
pub mod observer;
pub mod row;
pub mod writer;


pub use cache::{CacheKey, load_centroids, store_centroids};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use self::geojson::GeoJsonWriter;
pub use observer::StopOutputObserver;
pub use row::{FailedStopRow, StopRow};
pub use writer::OutputWriter;
