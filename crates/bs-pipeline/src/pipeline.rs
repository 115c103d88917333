//! The `StopPipeline` struct and its run loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use bs_cluster::{Clustering, kmeans};
use bs_core::{Point, StopId};
use bs_spatial::{RoadNetwork, RoadSnapper};

use crate::report::{FailedStop, RunSummary, SnappedStop};
use crate::{FailurePolicy, PipelineConfig, PipelineError, PipelineResult, StopObserver};

/// Centroids snapped per batch.  The interrupt flag is checked between
/// batches, so without `parallel` it is checked between centroids.
#[cfg(feature = "parallel")]
pub(crate) const BATCH: usize = 1_024;
#[cfg(not(feature = "parallel"))]
pub(crate) const BATCH: usize = 1;

/// Cluster-then-snap runner bound to one road network.
///
/// # Example
///
/// ```
/// use bs_core::Point;
/// use bs_pipeline::{PipelineConfig, StopCollector, StopPipeline};
/// use bs_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_line(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).unwrap();
/// let net = b.build();
///
/// let mut cfg = PipelineConfig::with_stops(1, 0);
/// cfg.snap.initial_radius = 5.0;
/// let pipeline = StopPipeline::new(cfg, &net).unwrap();
///
/// let mut out = StopCollector::default();
/// let pts = [Point::new(4.0, 2.0), Point::new(6.0, 4.0)];
/// let summary = pipeline.run(&pts, &mut out).unwrap();
/// assert_eq!(summary.snapped, 1);
/// assert_eq!(out.stops[0].projection.point, Point::new(5.0, 0.0));
/// ```
pub struct StopPipeline<'a> {
    config:    PipelineConfig,
    snapper:   RoadSnapper<'a>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a> StopPipeline<'a> {
    /// Validate `config` and bind to `network` before any clustering work.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Cluster`] for a zero stop count or iteration budget;
    /// [`PipelineError::Spatial`] for an invalid snap configuration or an
    /// empty network.
    pub fn new(config: PipelineConfig, network: &'a RoadNetwork) -> PipelineResult<Self> {
        config.cluster.validate()?;
        let snapper = RoadSnapper::new(network, config.snap)?;
        Ok(Self { config, snapper, interrupt: None })
    }

    /// Stop early once `flag` is set.  Stops already reported stay valid and
    /// the observer still gets `on_end`.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn snapper(&self) -> &RoadSnapper<'a> {
        &self.snapper
    }

    /// Run only the clustering phase.
    pub fn cluster(&self, points: &[Point]) -> PipelineResult<Clustering> {
        Ok(kmeans(points, &self.config.cluster)?)
    }

    /// Cluster `points`, then snap every centroid.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Cluster`] if clustering is rejected;
    /// [`PipelineError::StopFailed`] for the first miss under
    /// [`FailurePolicy::Abort`].
    pub fn run<O: StopObserver>(&self, points: &[Point], observer: &mut O) -> PipelineResult<RunSummary> {
        let clustering = self.cluster(points)?;
        observer.on_clustered(&clustering);
        self.run_centroids(&clustering.centroids, observer)
    }

    /// Snap precomputed centroids; `centroids[i]` becomes `StopId(i)`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::StopFailed`] for the first miss under
    /// [`FailurePolicy::Abort`].
    pub fn run_centroids<O: StopObserver>(
        &self,
        centroids: &[Point],
        observer: &mut O,
    ) -> PipelineResult<RunSummary> {
        let mut summary = RunSummary { stops: centroids.len(), ..RunSummary::default() };
        let outcome = self.snap_in_order(centroids, observer, &mut summary);

        observer.on_end(&summary);
        info!(
            stops = summary.stops,
            snapped = summary.snapped,
            failed = summary.failed,
            interrupted = summary.interrupted,
            max_offset = summary.max_offset,
            "stop placement finished"
        );
        outcome.map(|()| summary)
    }

    fn interrupted(&self) -> bool {
        self.interrupt.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
    }

    fn snap_in_order<O: StopObserver>(
        &self,
        centroids: &[Point],
        observer: &mut O,
        summary: &mut RunSummary,
    ) -> PipelineResult<()> {
        for (batch_idx, batch) in centroids.chunks(BATCH).enumerate() {
            if self.interrupted() {
                summary.interrupted = true;
                warn!(remaining = centroids.len() - batch_idx * BATCH, "interrupted before all stops were placed");
                return Ok(());
            }

            let base = batch_idx * BATCH;
            let results = self.snapper.snap_all(batch);
            for (offset, (&centroid, result)) in batch.iter().zip(results).enumerate() {
                let stop = StopId((base + offset) as u32);
                match result {
                    Ok(projection) => {
                        let snapped = SnappedStop { stop, centroid, projection };
                        summary.record_snap(&snapped);
                        observer.on_stop(&snapped);
                    }
                    Err(error) => {
                        summary.failed += 1;
                        warn!(%stop, %centroid, %error, "stop centroid has no road in reach");
                        let failed = FailedStop { stop, centroid, error };
                        observer.on_stop_failed(&failed);
                        if self.config.failure_policy == FailurePolicy::Abort {
                            return Err(PipelineError::StopFailed { stop, source: failed.error });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
