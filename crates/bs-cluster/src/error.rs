//! Clustering error type.

use thiserror::Error;

/// Errors produced by `bs-cluster`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfig),
}

/// The specific reason a clustering request was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("input point collection is empty")]
    EmptyInput,

    #[error("cluster count must be at least 1")]
    ZeroClusters,

    #[error("cluster count {k} exceeds the {distinct} distinct input points")]
    TooManyClusters { k: usize, distinct: usize },

    #[error("input point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("max_iter must be at least 1")]
    ZeroIterations,

    #[error("n_init must be at least 1")]
    ZeroRestarts,
}

pub type ClusterResult<T> = Result<T, ClusterError>;
