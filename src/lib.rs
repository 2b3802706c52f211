// Public API exports
pub mod clusterer;
pub mod config;
pub mod logging;
pub mod model;
pub mod palette;
pub mod repl;
pub mod session;
pub mod snapshot;

// Re-export main types for convenience
pub use clusterer::{Centroid, ClusterError, ClusterId, Iteration, Point, iterate};
pub use config::SessionConfig;
pub use model::{Canvas, ClusterModel, MAX_CLUSTERS, MIN_CLUSTERS, clamp_cluster_count};
pub use session::{ClusteringSession, ManualTicker, SessionState, Ticker, TokioTicker};
pub use snapshot::Snapshot;
