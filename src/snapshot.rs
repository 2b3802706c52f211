use crate::clusterer::{Centroid, Point};
use crate::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of a session handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub captured_at: DateTime<Utc>,
    pub state: SessionState,
    pub num_clusters: usize,
    pub iterations: u64,
    pub converged: bool,
    pub points: Vec<Point>,
    pub centroids: Vec<Centroid>,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Number of points in each cluster, indexed by centroid
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for id in self.points.iter().filter_map(|p| p.cluster_id) {
            if let Some(slot) = sizes.get_mut(id) {
                *slot += 1;
            }
        }
        sizes
    }

    /// Points that have never been assigned
    pub fn unassigned(&self) -> usize {
        self.points.iter().filter(|p| p.cluster_id.is_none()).count()
    }

    /// One-line human summary, e.g. `running iter=4 k=3 points=12 sizes=[5, 4, 3]`
    pub fn summary(&self) -> String {
        let state = match self.state {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
        };
        let mut line = format!(
            "{} iter={} k={} points={} sizes={:?}",
            state,
            self.iterations,
            self.num_clusters,
            self.points.len(),
            self.cluster_sizes()
        );
        if self.converged {
            line.push_str(" converged");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(points: Vec<Point>, centroids: Vec<Centroid>) -> Snapshot {
        Snapshot {
            session_id: Uuid::nil(),
            captured_at: Utc::now(),
            state: SessionState::Idle,
            num_clusters: centroids.len(),
            iterations: 0,
            converged: false,
            points,
            centroids,
        }
    }

    #[test]
    fn test_cluster_sizes_skip_unassigned_and_stale_ids() {
        let mut points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        for (point, id) in points.iter_mut().zip([0, 1, 1, 4]) {
            point.cluster_id = Some(id);
        }
        let snap = snapshot(points, vec![Centroid::new(0.0, 0.0), Centroid::new(2.0, 0.0)]);

        assert_eq!(snap.cluster_sizes(), vec![1, 2]);
        assert_eq!(snap.unassigned(), 1);
    }

    #[test]
    fn test_summary_format() {
        let mut snap = snapshot(vec![Point::new(1.0, 1.0)], vec![Centroid::new(0.0, 0.0); 2]);
        snap.converged = true;

        assert_eq!(snap.summary(), "idle iter=0 k=2 points=1 sizes=[0, 0] converged");
    }

    #[test]
    fn test_serializes_state_lowercase() {
        let snap = snapshot(vec![], vec![]);
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["state"], "idle");
        assert!(json["points"].as_array().unwrap().is_empty());
    }
}
