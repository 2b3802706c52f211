mod canvas;


pub use canvas::Canvas;

use crate::clusterer::{self, Centroid, ClusterError, Iteration, Point};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Smallest cluster count the input surface offers
pub const MIN_CLUSTERS: usize = 2;

/// Largest cluster count the input surface offers
pub const MAX_CLUSTERS: usize = 5;

/// Cluster count a fresh model starts with
pub const DEFAULT_CLUSTERS: usize = 3;

/// Clamp a raw slider value into `[MIN_CLUSTERS, MAX_CLUSTERS]`
pub fn clamp_cluster_count(raw: i64) -> usize {
    raw.clamp(MIN_CLUSTERS as i64, MAX_CLUSTERS as i64) as usize
}

/// Owner of the point set, the centroids and the configured cluster count
pub struct ClusterModel {
    points: Vec<Point>,
    centroids: Vec<Centroid>,
    num_clusters: usize,
    canvas: Canvas,
    /// Source for centroid placement
    rng: Box<dyn RngCore + Send>,
}

impl ClusterModel {
    /// Create an empty model whose random placement is seeded from the thread RNG
    pub fn new(canvas: Canvas) -> Self {
        Self::with_rng(canvas, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Create an empty model with reproducible centroid placement
    pub fn seeded(canvas: Canvas, seed: u64) -> Self {
        Self::with_rng(canvas, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create an empty model drawing centroid positions from `rng`
    pub fn with_rng(canvas: Canvas, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            points: Vec::new(),
            centroids: Vec::new(),
            num_clusters: DEFAULT_CLUSTERS,
            canvas,
            rng: Box::new(rng),
        }
    }

    /// Append an unassigned point. Coordinates are not bounds-checked.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }

    /// Remove every point; centroids stay where they are
    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    /// Record a new cluster count.
    ///
    /// The centroid list is not resized; that only happens on the next
    /// [`reset_centroids`](Self::reset_centroids).
    pub fn set_num_clusters(&mut self, k: usize) {
        self.num_clusters = k;
    }

    /// Replace the centroids with `num_clusters` uniformly random positions on the canvas.
    ///
    /// Existing point assignments are left as they are until the next iteration.
    pub fn reset_centroids(&mut self) -> clusterer::Result<()> {
        if self.num_clusters == 0 {
            return Err(ClusterError::InvalidConfiguration {
                num_clusters: self.num_clusters,
            });
        }

        if !self.canvas.is_drawable() {
            return Err(ClusterError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }

        let (width, height) = (self.canvas.width, self.canvas.height);
        let rng = &mut self.rng;
        self.centroids = (0..self.num_clusters)
            .map(|_| Centroid::new(rng.random_range(0.0..width), rng.random_range(0.0..height)))
            .collect();

        debug!(num_clusters = self.num_clusters, "centroids reset");
        Ok(())
    }

    /// Install exact centroid positions, bypassing random placement
    pub fn set_centroids(&mut self, centroids: Vec<Centroid>) {
        self.centroids = centroids;
    }

    /// Run one assignment-and-update pass and swap in the result.
    ///
    /// On error the model is left untouched.
    pub fn run_iteration(&mut self) -> clusterer::Result<Iteration> {
        let it = clusterer::iterate(&self.points, &self.centroids)?;
        self.points.clone_from(&it.points);
        self.centroids.clone_from(&it.centroids);
        Ok(it)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }
}

impl Default for ClusterModel {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl std::fmt::Debug for ClusterModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterModel")
            .field("points", &self.points.len())
            .field("centroids", &self.centroids)
            .field("num_clusters", &self.num_clusters)
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}
