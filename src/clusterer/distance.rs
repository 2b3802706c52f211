use super::types::{Centroid, Point};

/// Euclidean distance between a point and a centroid
pub fn euclidean_distance(point: &Point, centroid: &Centroid) -> f64 {
    let dx = point.x - centroid.x;
    let dy = point.y - centroid.y;

    (dx * dx + dy * dy).sqrt()
}

/// Index of the closest centroid, or `None` when there are no centroids.
///
/// Scans in index order and only replaces the best on a strictly smaller
/// distance, so equidistant centroids resolve to the lowest index. A NaN
/// distance never replaces the current best.
pub fn nearest_centroid(point: &Point, centroids: &[Centroid]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, centroid) in centroids.iter().enumerate() {
        let d = euclidean_distance(point, centroid);
        match best {
            None => best = Some((idx, d)),
            Some((_, best_d)) if d < best_d => best = Some((idx, d)),
            Some(_) => {}
        }
    }

    best.map(|(idx, _)| idx)
}
