//! JSON cache of clustering results.
//!
//! k-means over a city's students dominates run time, while the road snap is
//! cheap, so centroids are cached between runs.  The cache file records the
//! [`CacheKey`] it was built for; any change to the seed, the clustering
//! parameters, or the input points turns a load into a miss.

use std::fs::{self, File};
use std::hash::Hasher;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bs_cluster::ClusterConfig;
use bs_core::Point;

use crate::OutputResult;

/// Everything the clustering result depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    pub seed:        u64,
    pub k:           usize,
    pub n_init:      usize,
    pub max_iter:    usize,
    pub input_len:   usize,
    /// FxHash of every input coordinate's bit pattern, in order.
    pub fingerprint: u64,
}

impl CacheKey {
    pub fn new(points: &[Point], config: &ClusterConfig) -> Self {
        let mut h = FxHasher::default();
        for p in points {
            h.write_u64(p.x.to_bits());
            h.write_u64(p.y.to_bits());
        }
        Self {
            seed:        config.seed,
            k:           config.k,
            n_init:      config.n_init,
            max_iter:    config.max_iter,
            input_len:   points.len(),
            fingerprint: h.finish(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    key:       CacheKey,
    centroids: Vec<[f64; 2]>,
}

/// Read cached centroids for `key` from `path`.
///
/// Returns `Ok(None)` when the file does not exist, was written for a
/// different key, or cannot be parsed (logged at `warn`).
///
/// # Errors
///
/// [`OutputError::Io`](crate::OutputError::Io) if the file exists but cannot
/// be read.
pub fn load_centroids(path: &Path, key: &CacheKey) -> OutputResult<Option<Vec<Point>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no centroid cache");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let cached: CacheFile = match serde_json::from_reader(BufReader::new(file)) {
        Ok(c) => c,
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable centroid cache");
            return Ok(None);
        }
    };

    if cached.key != *key || cached.centroids.len() != key.k {
        debug!(path = %path.display(), "centroid cache is for different input; ignoring");
        return Ok(None);
    }

    debug!(path = %path.display(), centroids = cached.centroids.len(), "centroid cache hit");
    Ok(Some(cached.centroids.into_iter().map(Point::from).collect()))
}

/// Write `centroids` for `key` to `path`, replacing any previous cache.
pub fn store_centroids(path: &Path, key: &CacheKey, centroids: &[Point]) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let cached = CacheFile {
        key:       key.clone(),
        centroids: centroids.iter().map(|p| p.to_array()).collect(),
    };
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, &cached)?;
    out.flush()?;
    debug!(path = %path.display(), centroids = centroids.len(), "stored centroid cache");
    Ok(())
}
