use super::{
    centroid::mean_position,
    distance::nearest_centroid,
    error::{ClusterError, Result},
    types::{Centroid, Iteration, Point},
};

/// Assign every point to its nearest centroid.
///
/// Returns the new point list and the number of points whose cluster id changed.
pub fn assign(points: &[Point], centroids: &[Centroid]) -> Result<(Vec<Point>, usize)> {
    if centroids.is_empty() {
        return Err(ClusterError::NoCentroids);
    }

    let mut reassigned = 0;
    let mut assigned = Vec::with_capacity(points.len());

    for point in points {
        let best = nearest_centroid(point, centroids).ok_or(ClusterError::NoCentroids)?;
        if point.cluster_id != Some(best) {
            reassigned += 1;
        }
        assigned.push(Point {
            cluster_id: Some(best),
            ..*point
        });
    }

    Ok((assigned, reassigned))
}

/// Move each centroid to the mean of its members.
///
/// A centroid with no members keeps its previous position.
pub fn update(points: &[Point], centroids: &[Centroid]) -> Vec<Centroid> {
    centroids
        .iter()
        .enumerate()
        .map(|(c, previous)| {
            let members: Vec<&Point> = points
                .iter()
                .filter(|p| p.cluster_id == Some(c))
                .collect();

            mean_position(&members).unwrap_or(*previous)
        })
        .collect()
}

/// One K-Means step: assignment against the current centroids, then an update
/// driven by the fresh assignments. Inputs are left untouched.
pub fn iterate(points: &[Point], centroids: &[Centroid]) -> Result<Iteration> {
    let (points, reassigned) = assign(points, centroids)?;
    let next = update(&points, centroids);
    let converged = reassigned == 0 && next.as_slice() == centroids;

    Ok(Iteration {
        points,
        centroids: next,
        reassigned,
        converged,
    })
}
