use serde::{Deserialize, Serialize};

/// Index of the centroid a point is assigned to
pub type ClusterId = usize;

/// A user-placed point in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Unset until the point goes through its first assignment
    pub cluster_id: Option<ClusterId>,
}

impl Point {
    /// Create an unassigned point
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            cluster_id: None,
        }
    }
}

/// Representative position of a cluster. Its index in the centroid list is the cluster id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outcome of a single assignment-and-update pass
#[derive(Debug, Clone)]
pub struct Iteration {
    pub points: Vec<Point>,
    pub centroids: Vec<Centroid>,
    /// Points whose cluster id differs from the one they held before
    pub reassigned: usize,
    /// No assignment changed and no centroid moved
    pub converged: bool,
}
