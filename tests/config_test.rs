use std::time::Duration;

use template_tracker::config::TrackerConfig;

#[test]
fn defaults_are_stable() {
    let config = TrackerConfig::default();
    assert_eq!(config.cam_id, 0);
    assert_eq!(config.cam_fps, 2.0);
    assert_eq!(config.request_width, 320);
    assert_eq!(config.request_height, 240);
    assert_eq!(config.ratio, 0.65);
    assert_eq!(config.min_matches, 4);
    assert_eq!(config.reproj_threshold, 5.0);
}

#[test]
fn tick_interval_keeps_the_literal_divisor() {
    // the timer is armed with 100 / fps milliseconds, not 1000 / fps
    let config = TrackerConfig::default();
    assert_eq!(config.tick_interval(), Duration::from_millis(50));

    let fast = TrackerConfig {
        cam_fps: 10.0,
        ..TrackerConfig::default()
    };
    assert_eq!(fast.tick_interval(), Duration::from_millis(10));
}

#[test]
fn json_round_trip() {
    let config = TrackerConfig {
        cam_id: 2,
        ratio: 0.7,
        fast_threshold: 50,
        ..TrackerConfig::default()
    };
    let path = std::env::temp_dir().join(format!("tracker_config_{}.json", std::process::id()));
    let path = path.to_str().unwrap().to_string();

    config.to_json(&path).unwrap();
    let loaded = TrackerConfig::from_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let loaded: TrackerConfig = serde_json::from_str(r#"{"ratio": 0.5}"#).unwrap();
    assert_eq!(loaded.ratio, 0.5);
    assert_eq!(loaded.min_matches, TrackerConfig::default().min_matches);
    assert_eq!(loaded.cam_fps, TrackerConfig::default().cam_fps);
}
