use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Invalid configuration: cluster count must be positive (got {num_clusters})")]
    InvalidConfiguration { num_clusters: usize },

    #[error("Invalid canvas: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("No centroids to assign points to; reset centroids first")]
    NoCentroids,
}

pub type Result<T> = std::result::Result<T, ClusterError>;
