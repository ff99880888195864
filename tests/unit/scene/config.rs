use super::*;

fn base_config() -> RenderConfig {
    RenderConfig {
        canvas: Canvas::new(400, 300),
        fps: Fps(10),
        duration_sec: 3.0,
        scene: SceneSpec::Bounce,
    }
}

#[test]
fn valid_config_passes() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn validation_catches_out_of_range_dimensions() {
    let mut cfg = base_config();
    cfg.canvas.width = 99;
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.canvas.width = 801;
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.canvas.height = 99;
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.canvas.height = 601;
    assert!(cfg.validate().is_err());
}

#[test]
fn validation_catches_out_of_range_fps_and_duration() {
    let mut cfg = base_config();
    cfg.fps = Fps(4);
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.duration_sec = 0.5;
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.duration_sec = 10.5;
    assert!(cfg.validate().is_err());

    let mut cfg = base_config();
    cfg.duration_sec = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn boundary_configs_are_accepted() {
    let mut cfg = base_config();
    cfg.canvas = Canvas::new(100, 100);
    cfg.fps = Fps(5);
    cfg.duration_sec = 1.0;
    assert!(cfg.validate().is_ok());

    let mut cfg = base_config();
    cfg.canvas = Canvas::new(800, 600);
    cfg.fps = Fps(30);
    cfg.duration_sec = 10.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn total_frames_is_rounded_product() {
    assert_eq!(base_config().total_frames(), 30);

    let mut cfg = base_config();
    cfg.duration_sec = 1.0;
    cfg.fps = Fps(5);
    assert_eq!(cfg.total_frames(), 5);

    // 1.25 s at 10 fps rounds to 13 frames, not 12.
    let mut cfg = base_config();
    cfg.duration_sec = 1.25;
    cfg.fps = Fps(10);
    assert_eq!(cfg.total_frames(), 13);
}

#[test]
fn frame_delay_matches_fps() {
    assert_eq!(base_config().frame_delay_ms(), 100);
}

#[test]
fn json_roundtrip_and_validation() {
    let json = serde_json::to_string(&base_config()).unwrap();
    let parsed = RenderConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, base_config());

    assert!(matches!(
        RenderConfig::from_json_str("not json"),
        Err(FlipbookError::Serde(_))
    ));

    // Parses but violates the range constraints.
    let bad = r#"{"canvas":{"width":10,"height":10},"fps":10,"duration_sec":3.0}"#;
    assert!(matches!(
        RenderConfig::from_json_str(bad),
        Err(FlipbookError::Validation(_))
    ));
}

#[test]
fn scene_spec_defaults_to_bounce() {
    let json = r#"{"canvas":{"width":400,"height":300},"fps":10,"duration_sec":3.0}"#;
    let cfg = RenderConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.scene, SceneSpec::Bounce);
}
