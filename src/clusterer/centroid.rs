use super::types::{Centroid, Point};

/// Arithmetic mean of the given points, or `None` for an empty slice
pub fn mean_position(points: &[&Point]) -> Option<Centroid> {
    if points.is_empty() {
        return None;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }

    let n = points.len() as f64;
    Some(Centroid::new(sum_x / n, sum_y / n))
}
