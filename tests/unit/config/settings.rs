use super::*;

#[test]
fn empty_document_yields_defaults() {
    let s = BlinkSettings::from_json_str("{}").unwrap();
    assert_eq!(s, BlinkSettings::default());
    assert_eq!(s.style, EyeStyle::V2);
    assert_eq!(s.policy(), MorphPolicy::TwoPoseOverlay);
    assert!((s.script().unwrap().total_duration() - 18.5).abs() < 1e-9);
}

#[test]
fn exercise_closed_override_changes_hold() {
    let s = BlinkSettings::from_json_str(r#"{ "exercise_closed_seconds": 3.0 }"#).unwrap();
    let cfg = s.script_config().unwrap();
    assert_eq!(cfg.exercise_hold_closed, 3.0);
    // Three exercise blinks, each one second longer.
    assert!((s.script().unwrap().total_duration() - 21.5).abs() < 1e-9);
}

#[test]
fn time_scale_applies_after_override() {
    let s = BlinkSettings::from_json_str(
        r#"{ "exercise_closed_seconds": 4.0, "time_scale": 0.5, "script": { "arrival_blink_count": 1 } }"#,
    )
    .unwrap();
    let cfg = s.script_config().unwrap();
    assert_eq!(cfg.exercise_hold_closed, 2.0);
    assert_eq!(cfg.arrival_blink_count, 1);
    assert_eq!(cfg.appear, 0.45);
}

#[test]
fn explicit_policy_wins_over_style() {
    let s = BlinkSettings::from_json_str(r#"{ "style": "v2", "policy": "three_pose" }"#).unwrap();
    assert_eq!(s.policy(), MorphPolicy::ThreePose);
    let s = BlinkSettings::from_json_str(r#"{ "style": "v1" }"#).unwrap();
    assert_eq!(s.policy(), MorphPolicy::ThreePose);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = BlinkSettings::from_json_str(r#"{ "colour": "red" }"#).unwrap_err();
    assert!(matches!(err, BlinkError::Serde(_)), "{err}");
    let err = BlinkSettings::from_json_str(r#"{ "script": { "apear": 1.0 } }"#).unwrap_err();
    assert!(matches!(err, BlinkError::Serde(_)), "{err}");
}

#[test]
fn invalid_values_are_config_errors() {
    for doc in [
        r#"{ "time_scale": 0.0 }"#,
        r#"{ "time_scale": -1.0 }"#,
        r#"{ "exercise_closed_seconds": -0.5 }"#,
        r#"{ "script": { "sore_hold": -1.0 } }"#,
    ] {
        let s = BlinkSettings::from_json_str(doc).unwrap();
        let err = s.script().unwrap_err();
        assert!(matches!(err, BlinkError::Config(_)), "{doc}: {err}");
    }
}

#[test]
fn missing_file_is_config_error() {
    let err = BlinkSettings::from_path("/definitely/not/here/settings.json").unwrap_err();
    assert!(matches!(err, BlinkError::Config(_)));
    assert!(err.to_string().contains("settings.json"));
}

#[test]
fn reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("blinkmorph-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(&path, r#"{ "style": "v1", "time_scale": 2.0 }"#).unwrap();

    let s = BlinkSettings::from_path(&path).unwrap();
    assert_eq!(s.style, EyeStyle::V1);
    assert!((s.script().unwrap().total_duration() - 37.0).abs() < 1e-9);

    std::fs::remove_dir_all(&dir).unwrap();
}
