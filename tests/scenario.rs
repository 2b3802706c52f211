use kmeans_live::{
    Canvas, Centroid, ClusterModel, ClusteringSession, ManualTicker, SessionState, iterate,
};
use std::sync::Arc;
use std::time::Duration;

const EPS: f64 = 1e-12;

fn six_points() -> [(f64, f64); 6] {
    [
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (50.0, 50.0),
        (51.0, 50.0),
        (50.0, 51.0),
    ]
}

fn assert_close(actual: Centroid, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
        "expected ({x}, {y}), got {actual:?}"
    );
}

#[test]
fn two_groups_split_after_one_iteration() {
    let mut model = ClusterModel::seeded(Canvas::default(), 0);
    for (x, y) in six_points() {
        model.add_point(x, y);
    }
    model.set_num_clusters(2);
    model.set_centroids(vec![Centroid::new(0.0, 0.0), Centroid::new(50.0, 50.0)]);

    let it = model.run_iteration().unwrap();

    let ids: Vec<_> = model.points().iter().map(|p| p.cluster_id).collect();
    assert_eq!(ids, vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)]);
    assert_close(model.centroids()[0], 1.0 / 3.0, 1.0 / 3.0);
    assert_close(model.centroids()[1], 50.0 + 1.0 / 3.0, 50.0 + 1.0 / 3.0);
    assert_eq!(it.reassigned, 6);
}

#[test]
fn same_scenario_through_session_ticks() {
    let ticker = ManualTicker::new();
    let session = ClusteringSession::new(
        ClusterModel::seeded(Canvas::default(), 0),
        Arc::new(ticker.clone()),
        Duration::from_millis(500),
    );
    for (x, y) in six_points() {
        session.add_point(x, y);
    }
    session.set_num_clusters(2);
    session.set_centroids(vec![Centroid::new(0.0, 0.0), Centroid::new(50.0, 50.0)]);

    assert_eq!(session.toggle_run(), SessionState::Running);
    ticker.fire();

    let centroids = session.centroids();
    assert_close(centroids[0], 1.0 / 3.0, 1.0 / 3.0);
    assert_close(centroids[1], 50.0 + 1.0 / 3.0, 50.0 + 1.0 / 3.0);

    // Converged: further ticks change nothing
    ticker.fire();
    let settled = session.snapshot();
    ticker.fire();
    let again = session.snapshot();
    assert!(again.converged);
    assert_eq!(settled.points, again.points);
    assert_eq!(settled.centroids, again.centroids);
    assert_eq!(again.iterations, 3);
}

#[test]
fn random_start_converges_and_stays_put() {
    let mut model = ClusterModel::seeded(Canvas::default(), 2024);
    for i in 0..30 {
        let (bx, by) = [(100.0, 100.0), (450.0, 120.0), (300.0, 330.0)][i % 3];
        model.add_point(bx + (i as f64 * 1.7) % 20.0, by + (i as f64 * 3.1) % 20.0);
    }
    model.set_num_clusters(3);
    model.reset_centroids().unwrap();

    let mut converged = false;
    for _ in 0..100 {
        if model.run_iteration().unwrap().converged {
            converged = true;
            break;
        }
    }
    assert!(converged);

    let points = model.points().to_vec();
    let centroids = model.centroids().to_vec();
    let next = iterate(&points, &centroids).unwrap();
    assert_eq!(next.points, points);
    assert_eq!(next.centroids, centroids);
}
