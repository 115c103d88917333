//! Pipeline configuration.

use bs_cluster::ClusterConfig;
use bs_spatial::SnapConfig;

/// What to do when a centroid has no road within the largest search window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Report the stop through `on_stop_failed` and keep going.
    #[default]
    Continue,
    /// Stop the batch with [`PipelineError::StopFailed`](crate::PipelineError).
    Abort,
}

/// Everything a [`StopPipeline`](crate::StopPipeline) needs besides its
/// inputs.
///
/// ```
/// use bs_pipeline::{FailurePolicy, PipelineConfig};
///
/// let cfg = PipelineConfig::with_stops(5_000, 0);
/// assert_eq!(cfg.cluster.k, 5_000);
/// assert_eq!(cfg.failure_policy, FailurePolicy::Continue);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    pub cluster:        ClusterConfig,
    pub snap:           SnapConfig,
    pub failure_policy: FailurePolicy,
}

impl PipelineConfig {
    /// `stops` clusters from `seed`, default snapping, keep going on misses.
    pub fn with_stops(stops: usize, seed: u64) -> Self {
        Self { cluster: ClusterConfig::new(stops, seed), ..Self::default() }
    }
}
