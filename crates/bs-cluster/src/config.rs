//! Clustering parameters.

use crate::error::{ClusterResult, InvalidConfig};

/// Lloyd iteration cap (sklearn `KMeans` default).
pub const DEFAULT_MAX_ITER: usize = 300;

/// Parameters for one clustering request.
///
/// ```
/// use bs_cluster::ClusterConfig;
///
/// let cfg = ClusterConfig::new(5_000, 0).with_restarts(4);
/// assert_eq!(cfg.k, 5_000);
/// assert_eq!(cfg.max_iter, 300);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterConfig {
    /// Number of clusters (bus stops) to produce.
    pub k: usize,
    /// Root seed for k-means++ seeding and restarts.
    pub seed: u64,
    /// Refinement stops after this many assignment passes even if
    /// assignments are still changing.
    pub max_iter: usize,
    /// Independent seeded runs; the lowest-inertia run wins.
    pub n_init: usize,
}

impl ClusterConfig {
    pub fn new(k: usize, seed: u64) -> Self {
        Self { k, seed, max_iter: DEFAULT_MAX_ITER, n_init: 1 }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_restarts(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Checks that need no input points: `k`, `max_iter`, and `n_init` must
    /// all be at least 1.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.k == 0 {
            return Err(InvalidConfig::ZeroClusters.into());
        }
        if self.max_iter == 0 {
            return Err(InvalidConfig::ZeroIterations.into());
        }
        if self.n_init == 0 {
            return Err(InvalidConfig::ZeroRestarts.into());
        }
        Ok(())
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
