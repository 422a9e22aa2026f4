use super::*;

const EPS: f64 = 1e-9;

#[test]
fn default_total_duration_is_the_literal_sum() {
    let script = AnimationScript::default();
    let expected = 0.9 // appear
        + (0.2 + 0.25) // first arrival blink
        + 2.0 * (0.1 + 0.15) // other arrival blinks
        + 0.3 // pause
        + 0.5 * 2.0 + 1.5 // sore in/out + hold
        + 3.0 * (1.5 + 2.0 + 1.0) // exercise
        + 0.35; // settle tail
    assert!((script.total_duration() - expected).abs() < EPS);
    assert!((script.total_duration() - 18.5).abs() < EPS);
}

#[test]
fn total_duration_matches_compiled_waits() {
    for cfg in [
        ScriptConfig::default(),
        ScriptConfig {
            arrival_blink_count: 1,
            exercise_blink_count: 5,
            sore_hold: 0.0,
            ..ScriptConfig::default()
        },
        ScriptConfig {
            arrival_blink_count: 0,
            exercise_blink_count: 0,
            ..ScriptConfig::default()
        },
    ] {
        let script = AnimationScript::from_config(&cfg).unwrap();
        let waits: f64 = script.compile().iter().map(|c| c.wait).sum();
        assert!((waits - script.total_duration()).abs() < EPS);
    }
}

#[test]
fn phases_follow_choreography_order() {
    let kinds: Vec<PhaseKind> = AnimationScript::default()
        .phases()
        .iter()
        .map(AnimationPhase::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            PhaseKind::Arrival,
            PhaseKind::Sore,
            PhaseKind::Exercise,
            PhaseKind::Settle
        ]
    );
}

#[test]
fn repeat_counts_come_from_config() {
    let script = AnimationScript::default();
    let counts: Vec<u32> = script
        .phases()
        .iter()
        .map(AnimationPhase::repeat_count)
        .collect();
    assert_eq!(counts, vec![3, 1, 3, 1]);
}

#[test]
fn only_first_arrival_blink_uses_first_timing() {
    let cues = AnimationScript::default().compile();
    let closes: Vec<f64> = cues
        .iter()
        .filter(|c| c.phase == PhaseKind::Arrival)
        .filter(|c| c.actions.contains(&CueAction::Enter(PlaybackState::Closing)))
        .map(|c| c.wait)
        .collect();
    assert_eq!(closes, vec![0.2, 0.1, 0.1]);
}

#[test]
fn exercise_blinks_are_uniform() {
    let cues = AnimationScript::default().compile();
    let closed_holds: Vec<f64> = cues
        .iter()
        .filter(|c| c.actions.contains(&CueAction::Enter(PlaybackState::Closed)))
        .map(|c| c.wait)
        .collect();
    assert_eq!(closed_holds, vec![2.0, 2.0, 2.0]);
}

#[test]
fn sore_flag_is_cleared_after_squint_out() {
    let cues = AnimationScript::default().compile();
    let sore: Vec<&Cue> = cues.iter().filter(|c| c.phase == PhaseKind::Sore).collect();
    assert_eq!(sore.len(), 4);
    assert!(sore[0].actions.contains(&CueAction::SoreActive(true)));
    assert_eq!(sore[3].actions, vec![CueAction::SoreActive(false)]);
    assert_eq!(sore[3].wait, 0.0);
}

#[test]
fn validate_rejects_negative_and_non_finite_durations() {
    let bad = ScriptConfig {
        sore_hold: -1.0,
        ..ScriptConfig::default()
    };
    let err = AnimationScript::from_config(&bad).unwrap_err();
    assert!(err.to_string().contains("sore_hold"));

    let nan = ScriptConfig {
        exercise_open: f64::NAN,
        ..ScriptConfig::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn time_scaled_scales_durations_but_not_counts() {
    let half = ScriptConfig::default().time_scaled(0.5).unwrap();
    assert_eq!(half.arrival_blink_count, 3);
    assert_eq!(half.exercise_hold_closed, 1.0);
    let script = AnimationScript::from_config(&half).unwrap();
    assert!((script.total_duration() - 9.25).abs() < EPS);

    assert!(ScriptConfig::default().time_scaled(0.0).is_err());
    assert!(ScriptConfig::default().time_scaled(f64::INFINITY).is_err());
}

#[test]
fn config_deserializes_partial_documents_with_defaults() {
    let cfg: ScriptConfig = serde_json::from_str(r#"{ "exercise_blink_count": 5 }"#).unwrap();
    assert_eq!(cfg.exercise_blink_count, 5);
    assert_eq!(cfg.appear, 0.9);
    assert!(serde_json::from_str::<ScriptConfig>(r#"{ "bogus": 1 }"#).is_err());
}

#[test]
fn phases_serialize_with_kind_tag() {
    let json = serde_json::to_value(AnimationPhase::Settle { tail: 0.35 }).unwrap();
    assert_eq!(json["kind"], "settle");
    assert_eq!(json["tail"], 0.35);
}

#[test]
fn explicit_phases_are_validated() {
    let err = AnimationScript::new(vec![AnimationPhase::Settle { tail: -5.0 }]).unwrap_err();
    assert!(matches!(err, BlinkError::Config(_)), "{err}");
    assert!(err.to_string().contains("settle.tail"), "{err}");

    let err = AnimationScript::new(vec![AnimationPhase::Exercise {
        blinks: 1,
        close: 1.0,
        hold_closed: f64::NAN,
        open: 1.0,
    }])
    .unwrap_err();
    assert!(err.to_string().contains("exercise.hold_closed"), "{err}");

    let arrival = AnimationPhase::Arrival {
        appear: 0.9,
        blinks: 2,
        first: BlinkTiming {
            close: 0.2,
            open: f64::INFINITY,
        },
        other: BlinkTiming {
            close: 0.1,
            open: 0.15,
        },
        pause_after: 0.3,
    };
    assert!(arrival.validate().is_err());

    // Huge but finite waits are legal.
    let long = AnimationScript::new(vec![AnimationPhase::Settle { tail: 1e20 }]).unwrap();
    assert_eq!(long.total_duration(), 1e20);
}

#[test]
fn deserialization_rejects_invalid_durations() {
    let err = serde_json::from_str::<AnimationScript>(
        r#"{ "phases": [ { "kind": "sore", "transition": 0.5, "hold": 1.5 },
                         { "kind": "settle", "tail": -5.0 } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("settle.tail"), "{err}");

    let ok: AnimationScript =
        serde_json::from_str(r#"{ "phases": [ { "kind": "settle", "tail": 0.35 } ] }"#).unwrap();
    assert_eq!(ok.phases(), &[AnimationPhase::Settle { tail: 0.35 }]);
    assert!(ok.validate().is_ok());
}

#[test]
fn default_script_round_trips_through_json() {
    let script = AnimationScript::default();
    let json = serde_json::to_string(&script).unwrap();
    let back: AnimationScript = serde_json::from_str(&json).unwrap();
    assert_eq!(back, script);
}
