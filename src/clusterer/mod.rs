mod centroid;
mod distance;
mod error;
mod kmeans;
mod types;

#[cfg(test)]
mod tests;

pub use centroid::mean_position;
pub use distance::{euclidean_distance, nearest_centroid};
pub use error::{ClusterError, Result};
pub use kmeans::{assign, iterate, update};
pub use types::{Centroid, ClusterId, Iteration, Point};
