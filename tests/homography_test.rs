use glam::Vec2;
use nalgebra as na;
use template_tracker::error::EstimateError;
use template_tracker::homography::{Homography, HomographyEstimator, RansacHomography};

fn grid_points() -> Vec<Vec2> {
    (0..6)
        .flat_map(|r| (0..6).map(move |c| Vec2::new(30.0 * c as f32 + 10.0, 25.0 * r as f32 + 5.0)))
        .collect()
}

fn estimator() -> RansacHomography {
    RansacHomography::new(500, 5.0, 4)
}

#[test]
fn recovers_known_transform() {
    let h_true = Homography(na::Matrix3::new(
        1.1, 0.0, 40.0, 0.0, 0.9, 20.0, 0.0, 0.0, 1.0,
    ));
    let src = grid_points();
    let dst: Vec<Vec2> = src.iter().map(|&p| h_true.project(p)).collect();

    let h = estimator().estimate(&src, &dst).unwrap();
    for &p in &src {
        let expected = h_true.project(p);
        let got = h.project(p);
        assert!(
            (got - expected).length() < 0.5,
            "projected {:?}, expected {:?}",
            got,
            expected
        );
    }
}

#[test]
fn tolerates_outliers() {
    let h_true = Homography(na::Matrix3::new(
        1.0, 0.0, 55.0, 0.0, 1.0, -12.0, 0.0, 0.0, 1.0,
    ));
    let src = grid_points();
    let mut dst: Vec<Vec2> = src.iter().map(|&p| h_true.project(p)).collect();
    // corrupt a handful of correspondences
    for (i, d) in dst.iter_mut().enumerate().take(6) {
        *d += Vec2::new(60.0 + 13.0 * i as f32, -40.0);
    }

    let h = estimator().estimate(&src, &dst).unwrap();
    let probe = Vec2::new(77.0, 41.0);
    assert!((h.project(probe) - h_true.project(probe)).length() < 0.5);
}

#[test]
fn rejects_too_few_points() {
    let src = vec![Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, 0.0)];
    let dst = src.clone();
    match estimator().estimate(&src, &dst) {
        Err(EstimateError::NotEnoughPoints { got, .. }) => assert_eq!(got, 3),
        other => panic!("expected NotEnoughPoints, got {:?}", other.map(|h| h.0)),
    }
}

#[test]
fn degenerate_input_reports_failure() {
    // a single repeated source point cannot map onto a spread of targets
    let src = vec![Vec2::new(50.0, 50.0); 8];
    let dst = grid_points().into_iter().take(8).collect::<Vec<_>>();
    match estimator().estimate(&src, &dst) {
        Err(EstimateError::Degenerate { .. }) => {}
        other => panic!("expected Degenerate, got {:?}", other.map(|h| h.0)),
    }
}

#[test]
fn identity_projects_corners_in_order() {
    let h = Homography(na::Matrix3::identity());
    let quad = h.project_corners(64, 48);
    assert_eq!(quad.0[0], Vec2::new(0.0, 0.0));
    assert_eq!(quad.0[1], Vec2::new(0.0, 48.0));
    assert_eq!(quad.0[2], Vec2::new(64.0, 48.0));
    assert_eq!(quad.0[3], Vec2::new(64.0, 0.0));
}
