use super::*;

fn assigned(x: f64, y: f64, cluster: ClusterId) -> Point {
    Point {
        x,
        y,
        cluster_id: Some(cluster),
    }
}

#[test]
fn test_distance_three_four_five() {
    let p = Point::new(0.0, 0.0);
    let c = Centroid::new(3.0, 4.0);

    assert_eq!(euclidean_distance(&p, &c), 5.0);
}

#[test]
fn test_distance_is_symmetric_in_sign() {
    let p = Point::new(-3.0, -4.0);
    let c = Centroid::new(0.0, 0.0);

    assert_eq!(euclidean_distance(&p, &c), 5.0);
}

#[test]
fn test_nearest_prefers_lowest_index_on_tie() {
    // (0,0) is 10 away from both centroid 0 and centroid 2
    let p = Point::new(0.0, 0.0);
    let centroids = vec![
        Centroid::new(10.0, 0.0),
        Centroid::new(100.0, 100.0),
        Centroid::new(0.0, 10.0),
    ];

    assert_eq!(nearest_centroid(&p, &centroids), Some(0));
}

#[test]
fn test_nearest_nan_point_stays_on_first_centroid() {
    let p = Point::new(f64::NAN, 0.0);
    let centroids = vec![
        Centroid::new(0.0, 0.0),
        Centroid::new(10.0, 0.0),
        Centroid::new(20.0, 0.0),
    ];

    assert_eq!(nearest_centroid(&p, &centroids), Some(0));
}

#[test]
fn test_nearest_skips_nan_centroid() {
    let p = Point::new(0.0, 0.0);
    let centroids = vec![Centroid::new(0.0, 0.0), Centroid::new(f64::NAN, 0.0)];
    assert_eq!(nearest_centroid(&p, &centroids), Some(0));

    let centroids = vec![
        Centroid::new(5.0, 0.0),
        Centroid::new(f64::NAN, 0.0),
        Centroid::new(1.0, 0.0),
    ];
    assert_eq!(nearest_centroid(&p, &centroids), Some(2));
}

#[test]
fn test_nearest_with_no_centroids() {
    assert_eq!(nearest_centroid(&Point::new(1.0, 1.0), &[]), None);
}

#[test]
fn test_assign_tie_goes_to_first() {
    let points = vec![Point::new(5.0, 5.0)];
    let centroids = vec![
        Centroid::new(0.0, 5.0),
        Centroid::new(5.0, 0.0),
        Centroid::new(10.0, 5.0),
    ];

    let (points, reassigned) = assign(&points, &centroids).unwrap();
    assert_eq!(points[0].cluster_id, Some(0));
    assert_eq!(reassigned, 1);
}

#[test]
fn test_assign_without_centroids_fails() {
    let points = vec![Point::new(1.0, 2.0)];
    let result = assign(&points, &[]);

    assert_eq!(result.unwrap_err(), ClusterError::NoCentroids);
}

#[test]
fn test_iterate_without_centroids_fails() {
    let result = iterate(&[], &[]);
    assert!(matches!(result, Err(ClusterError::NoCentroids)));
}

#[test]
fn test_empty_point_list_keeps_centroids() {
    let centroids = vec![Centroid::new(1.5, 2.5), Centroid::new(300.0, 200.0)];
    let it = iterate(&[], &centroids).unwrap();

    assert!(it.points.is_empty());
    assert_eq!(it.centroids, centroids);
    assert!(it.converged);
}

#[test]
fn test_empty_cluster_keeps_exact_position() {
    let stranded = Centroid::new(0.1 + 0.2, 1.0 / 3.0);
    let centroids = vec![Centroid::new(0.0, 0.0), stranded];
    let points = vec![Point::new(1.0, 1.0), Point::new(2.0, 0.0)];

    let it = iterate(&points, &centroids).unwrap();

    assert_eq!(it.centroids[1].x.to_bits(), stranded.x.to_bits());
    assert_eq!(it.centroids[1].y.to_bits(), stranded.y.to_bits());
}

#[test]
fn test_update_uses_mean_of_members() {
    let points = vec![
        assigned(0.0, 0.0, 0),
        assigned(4.0, 2.0, 0),
        assigned(10.0, 10.0, 1),
    ];
    let centroids = vec![Centroid::new(-1.0, -1.0), Centroid::new(9.0, 9.0)];

    let next = update(&points, &centroids);
    assert_eq!(next, vec![Centroid::new(2.0, 1.0), Centroid::new(10.0, 10.0)]);
}

#[test]
fn test_assignment_uses_pre_update_centroids() {
    // Centroid 0 would move next to the second point after the update,
    // but assignment must still see it at its old position.
    let points = vec![Point::new(0.0, 0.0), Point::new(8.0, 0.0)];
    let centroids = vec![Centroid::new(1.0, 0.0), Centroid::new(6.0, 0.0)];

    let it = iterate(&points, &centroids).unwrap();
    assert_eq!(it.points[0].cluster_id, Some(0));
    assert_eq!(it.points[1].cluster_id, Some(1));
    assert_eq!(it.centroids, vec![Centroid::new(0.0, 0.0), Centroid::new(8.0, 0.0)]);
}

#[test]
fn test_update_ignores_stale_assignments() {
    // The point claims cluster 1 from an old run, but this pass reassigns it.
    let points = vec![assigned(0.0, 0.0, 1)];
    let centroids = vec![Centroid::new(1.0, 1.0), Centroid::new(50.0, 50.0)];

    let it = iterate(&points, &centroids).unwrap();
    assert_eq!(it.points[0].cluster_id, Some(0));
    assert_eq!(it.centroids[0], Centroid::new(0.0, 0.0));
    assert_eq!(it.centroids[1], Centroid::new(50.0, 50.0));
    assert_eq!(it.reassigned, 1);
}

#[test]
fn test_iterate_is_idempotent_at_convergence() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(102.0, 100.0),
        Point::new(101.0, 104.0),
    ];
    let mut centroids = vec![Centroid::new(10.0, 10.0), Centroid::new(90.0, 90.0)];
    let mut current = points;

    let mut converged = false;
    for _ in 0..10 {
        let it = iterate(&current, &centroids).unwrap();
        current = it.points;
        centroids = it.centroids;
        if it.converged {
            converged = true;
            break;
        }
    }
    assert!(converged, "two well separated groups should converge quickly");

    let again = iterate(&current, &centroids).unwrap();
    assert_eq!(again.points, current);
    assert_eq!(again.centroids, centroids);
    assert_eq!(again.reassigned, 0);
    assert!(again.converged);
}

#[test]
fn test_mean_position_empty() {
    assert!(mean_position(&[]).is_none());
}
