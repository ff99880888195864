use super::*;

fn canvas() -> Canvas {
    Canvas::new(400, 300)
}

#[test]
fn same_fraction_samples_identical_state() {
    let scene = BounceScene::new(canvas());
    let a = scene.sample(0.37).unwrap();
    let b = scene.sample(0.37).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rest_pose_at_fraction_zero() {
    let s = BounceScene::new(canvas()).sample(0.0).unwrap();
    assert_eq!(s.circle_center, Point::new(200.0, 150.0));
    assert_eq!(s.circle_radius, 50.0);
    assert!((s.caption_alpha - 0.5).abs() < 1e-12);
    assert_eq!(s.caption_center, Point::new(200.0, 250.0));
}

#[test]
fn peak_bounce_at_quarter_period() {
    // sin(0.25 * 2π) = 1: highest point, largest radius, full caption opacity.
    let s = BounceScene::new(canvas()).sample(0.25).unwrap();
    assert!((s.circle_center.y - 100.0).abs() < 1e-9);
    assert!((s.circle_radius - 55.0).abs() < 1e-9);
    assert!((s.caption_alpha - 1.0).abs() < 1e-9);
}

#[test]
fn caption_tracks_the_circle() {
    let s = BounceScene::new(canvas()).sample(0.25).unwrap();
    assert!((s.caption_center.y - (s.circle_center.y + 100.0)).abs() < 1e-9);
}

#[test]
fn differing_fractions_differ_in_state() {
    let scene = BounceScene::new(canvas());
    let a = scene.sample(0.0).unwrap();
    let b = scene.sample(0.25).unwrap();
    assert_ne!(a, b);
}

#[test]
fn out_of_range_fraction_is_rejected() {
    let scene = BounceScene::new(canvas());
    assert!(scene.sample(-0.1).is_err());
    assert!(scene.sample(1.1).is_err());
    assert!(scene.sample(1.0).is_ok());
}
