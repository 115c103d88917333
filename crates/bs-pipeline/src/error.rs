use bs_cluster::ClusterError;
use bs_core::StopId;
use bs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("clustering failed: {0}")]
    Cluster(#[from] ClusterError),

    #[error("road network error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("could not place {stop}: {source}")]
    StopFailed {
        stop:   StopId,
        source: SpatialError,
    },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
