use super::*;
use crate::animation::script::ScriptConfig;

const EPS: f64 = 1e-9;

/// Step through every checkpoint, returning `(deadline, frame)` after each.
fn checkpoints(script: &AnimationScript) -> Vec<(f64, BlinkFrame)> {
    let mut tl = Timeline::new(script);
    tl.start(0.0);
    let mut out = vec![(0.0, tl.frame())];
    while let Some(deadline) = tl.next_deadline() {
        out.push((deadline, tl.advance(deadline)));
    }
    out
}

fn state_changes(script: &AnimationScript) -> Vec<PlaybackState> {
    let mut states: Vec<PlaybackState> = Vec::new();
    for (_, f) in checkpoints(script) {
        if states.last() != Some(&f.state) {
            states.push(f.state);
        }
    }
    states
}

#[test]
fn start_enters_aware_with_rest_values() {
    let mut tl = Timeline::new(&AnimationScript::default());
    assert_eq!(tl.status(), TimelineStatus::Pending);
    tl.start(5.0);
    let f = tl.frame();
    assert_eq!(f.state, PlaybackState::Aware);
    assert_eq!(f.opacity, 0.0);
    assert_eq!(f.scale, START_SCALE);
    assert_eq!(f.offset_y, START_OFFSET_Y);
    assert_eq!(tl.next_deadline(), Some(5.0 + 0.9));
    assert_eq!(tl.current_phase(), Some(PhaseKind::Arrival));
}

#[test]
fn default_choreography_state_order() {
    use PlaybackState::*;
    assert_eq!(
        state_changes(&AnimationScript::default()),
        vec![
            Aware, Closing, Opening, Closing, Opening, Closing, Opening, // arrival
            Closing, Closed, Opening, Closing, Closed, Opening, Closing, Closed, Opening,
            Settling, Idle,
        ]
    );
}

#[test]
fn first_arrival_blink_is_slower_than_the_rest() {
    let points = checkpoints(&AnimationScript::default());
    let waits: Vec<f64> = points.windows(2).map(|w| w[1].0 - w[0].0).collect();
    // appear, then close/open pairs.
    assert!((waits[0] - 0.9).abs() < EPS);
    assert!((waits[1] - 0.2).abs() < EPS);
    assert!((waits[2] - 0.25).abs() < EPS);
    assert!((waits[3] - 0.1).abs() < EPS);
    assert!((waits[4] - 0.15).abs() < EPS);
    assert!((waits[5] - 0.1).abs() < EPS);
    assert!((waits[6] - 0.15).abs() < EPS);
}

#[test]
fn appear_tween_eases_and_lands_on_rest() {
    let script = AnimationScript::default();
    let mid = sample_at(&script, 0.45);
    assert!((mid.opacity - Ease::OutQuad.apply(0.5)).abs() < EPS);
    assert!(mid.scale > START_SCALE && mid.scale < 1.0);

    let points = checkpoints(&script);
    let (_, after_appear) = points[1];
    assert_eq!(after_appear.opacity, 1.0);
    assert_eq!(after_appear.scale, 1.0);
    assert_eq!(after_appear.offset_y, 0.0);
    assert_eq!(after_appear.state, PlaybackState::Closing);
}

#[test]
fn blink_checkpoints_hit_closed_and_open_exactly() {
    let points = checkpoints(&AnimationScript::default());
    // End of first close.
    assert_eq!(points[2].1.morph, 2.0);
    assert_eq!(points[2].1.state, PlaybackState::Opening);
    // End of first open.
    assert_eq!(points[3].1.morph, 0.0);
}

#[test]
fn sore_phase_drives_separate_scalar() {
    let script = AnimationScript::default();
    // Arrival ends at 2.15; squint in until 2.65, hold until 4.15, out until 4.65.
    let hold = sample_at(&script, 3.0);
    assert!(hold.sore_active);
    assert_eq!(hold.sore_morph, 1.0);
    assert_eq!(hold.morph, 0.0);

    let easing_in = sample_at(&script, 2.4);
    assert!(easing_in.sore_morph > 0.0 && easing_in.sore_morph < 1.0);

    let easing_out = sample_at(&script, 4.4);
    assert!(easing_out.sore_active);
    assert!(easing_out.sore_morph > 0.0 && easing_out.sore_morph < 1.0);

    let exercise = sample_at(&script, 4.7);
    assert!(!exercise.sore_active);
    assert_eq!(exercise.sore_morph, 0.0);
    assert_eq!(exercise.state, PlaybackState::Closing);
}

#[test]
fn exercise_hold_is_a_literal_pause() {
    let script = AnimationScript::default();
    // First exercise close ends at 6.15; hold closed until 8.15.
    for t in [6.3, 7.0, 8.0] {
        let f = sample_at(&script, t);
        assert_eq!(f.state, PlaybackState::Closed);
        assert_eq!(f.morph, 2.0);
    }
}

#[test]
fn settle_snaps_offset_then_goes_idle() {
    let script = AnimationScript::default();
    let settling = sample_at(&script, 18.3);
    assert_eq!(settling.state, PlaybackState::Settling);
    assert_eq!(settling.offset_y, 0.0);

    let mut tl = Timeline::new(&script);
    tl.start(0.0);
    let end = tl.advance(100.0);
    assert_eq!(end.state, PlaybackState::Idle);
    assert_eq!(tl.status(), TimelineStatus::Finished);
    assert_eq!(tl.next_deadline(), None);
}

#[test]
fn last_checkpoint_is_total_duration() {
    let script = AnimationScript::default();
    let points = checkpoints(&script);
    let (last, frame) = points[points.len() - 1];
    assert!((last - script.total_duration()).abs() < EPS);
    assert_eq!(frame.state, PlaybackState::Idle);
}

#[test]
fn cancel_halts_and_freezes_values() {
    let mut tl = Timeline::new(&AnimationScript::default());
    tl.start(0.0);
    let mid_close = tl.advance(1.0);
    assert_eq!(mid_close.state, PlaybackState::Closing);

    tl.cancel();
    assert_eq!(tl.status(), TimelineStatus::Cancelled);
    assert_eq!(tl.next_deadline(), None);
    assert_eq!(tl.advance(50.0), mid_close);
    assert_eq!(tl.current_phase(), None);
}

#[test]
fn zero_blink_script_skips_blink_states() {
    let cfg = ScriptConfig {
        arrival_blink_count: 0,
        exercise_blink_count: 0,
        ..ScriptConfig::default()
    };
    let script = AnimationScript::from_config(&cfg).unwrap();
    assert_eq!(
        state_changes(&script),
        vec![
            PlaybackState::Aware,
            PlaybackState::Settling,
            PlaybackState::Idle
        ]
    );
}

#[test]
fn empty_script_finishes_on_start() {
    let mut tl = Timeline::new(&AnimationScript::new(Vec::new()).unwrap());
    tl.start(0.0);
    assert_eq!(tl.status(), TimelineStatus::Finished);
    assert_eq!(tl.frame().state, PlaybackState::Idle);
}

#[test]
fn second_start_is_ignored() {
    let mut tl = Timeline::new(&AnimationScript::default());
    tl.start(0.0);
    tl.advance(1.0);
    let before = tl.frame();
    tl.start(1.0);
    assert_eq!(tl.frame(), before);
    assert_eq!(tl.next_deadline(), Some(0.9 + 0.2));
}

#[test]
fn frame_round_trips_through_json() {
    let f = sample_at(&AnimationScript::default(), 3.0);
    let json = serde_json::to_string(&f).unwrap();
    assert!(json.contains("\"state\":\"opening\""));
    let back: BlinkFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
}
