//! Choreography of one playback: phase definitions, tunable constants and compilation into the
//! cue list the [`crate::Timeline`] steps through.

use crate::animation::ease::Ease;
use crate::animation::timeline::{Param, PlaybackState};
use crate::foundation::error::{BlinkError, BlinkResult};
use crate::morph::interpolate::MAX_PROGRESS;

/// Scale the eye pair starts from before the arrival animation.
pub const START_SCALE: f64 = 0.88;
/// Vertical offset the eye pair starts from before the arrival animation.
pub const START_OFFSET_Y: f64 = -10.0;

const APPEAR_EASE: Ease = Ease::OutQuad;
const MORPH_EASE: Ease = Ease::InOutQuad;

/// Close/open durations of one blink, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlinkTiming {
    /// Open → closed.
    pub close: f64,
    /// Closed → open.
    pub open: f64,
}

/// Discriminant of an [`AnimationPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Fade in and natural blinks.
    Arrival,
    /// Strained squint hold.
    Sore,
    /// Slow exercise blinks.
    Exercise,
    /// Return to rest.
    Settle,
}

/// One scripted segment of a playback. All durations are seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationPhase {
    /// Fade/scale/offset in over `appear`, then `blinks` blinks. The first blink uses `first`,
    /// the rest use `other`. Ends with a `pause_after` wait.
    Arrival {
        /// Fade/scale/offset-in duration.
        appear: f64,
        /// Number of blinks.
        blinks: u32,
        /// Timing of the first blink.
        first: BlinkTiming,
        /// Timing of every later blink.
        other: BlinkTiming,
        /// Wait after the last blink.
        pause_after: f64,
    },
    /// Squint in over `transition`, hold, squint out over `transition`.
    Sore {
        /// Squint in and squint out, each.
        transition: f64,
        /// Hold at full squint.
        hold: f64,
    },
    /// `blinks` times: close, hold closed, open.
    Exercise {
        /// Number of blinks.
        blinks: u32,
        /// Close duration.
        close: f64,
        /// Hold while closed.
        hold_closed: f64,
        /// Open duration.
        open: f64,
    },
    /// Settle back to rest and wait `tail`.
    Settle {
        /// Wait before returning to idle.
        tail: f64,
    },
}

impl AnimationPhase {
    /// Phase discriminant.
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Arrival { .. } => PhaseKind::Arrival,
            Self::Sore { .. } => PhaseKind::Sore,
            Self::Exercise { .. } => PhaseKind::Exercise,
            Self::Settle { .. } => PhaseKind::Settle,
        }
    }

    /// Number of repeated iterations in the phase.
    pub fn repeat_count(&self) -> u32 {
        match self {
            Self::Arrival { blinks, .. } | Self::Exercise { blinks, .. } => *blinks,
            Self::Sore { .. } | Self::Settle { .. } => 1,
        }
    }

    /// Every duration of the phase with the name it is reported under.
    fn durations(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Self::Arrival {
                appear,
                first,
                other,
                pause_after,
                ..
            } => vec![
                ("arrival.appear", appear),
                ("arrival.first.close", first.close),
                ("arrival.first.open", first.open),
                ("arrival.other.close", other.close),
                ("arrival.other.open", other.open),
                ("arrival.pause_after", pause_after),
            ],
            Self::Sore { transition, hold } => {
                vec![("sore.transition", transition), ("sore.hold", hold)]
            }
            Self::Exercise {
                close,
                hold_closed,
                open,
                ..
            } => vec![
                ("exercise.close", close),
                ("exercise.hold_closed", hold_closed),
                ("exercise.open", open),
            ],
            Self::Settle { tail } => vec![("settle.tail", tail)],
        }
    }

    /// Check every duration is finite and non-negative.
    pub fn validate(&self) -> BlinkResult<()> {
        self.durations()
            .into_iter()
            .try_for_each(|(name, value)| check_duration(name, value))
    }

    /// Sum of every wait in the phase.
    pub fn duration(&self) -> f64 {
        match *self {
            Self::Arrival {
                appear,
                blinks,
                first,
                other,
                pause_after,
            } => {
                let blinks_total = if blinks == 0 {
                    0.0
                } else {
                    (first.close + first.open)
                        + f64::from(blinks - 1) * (other.close + other.open)
                };
                appear + blinks_total + pause_after
            }
            Self::Sore { transition, hold } => transition + hold + transition,
            Self::Exercise {
                blinks,
                close,
                hold_closed,
                open,
            } => f64::from(blinks) * (close + hold_closed + open),
            Self::Settle { tail } => tail,
        }
    }

    fn compile_into(&self, cues: &mut Vec<Cue>) {
        let kind = self.kind();
        match *self {
            Self::Arrival {
                appear,
                blinks,
                first,
                other,
                pause_after,
            } => {
                cues.push(Cue::new(
                    kind,
                    vec![
                        CueAction::Enter(PlaybackState::Aware),
                        CueAction::Set(Param::Morph, 0.0),
                        CueAction::Set(Param::Scale, START_SCALE),
                        CueAction::Set(Param::OffsetY, START_OFFSET_Y),
                        CueAction::Set(Param::Opacity, 0.0),
                        CueAction::animate(Param::Opacity, 1.0, appear, APPEAR_EASE),
                        CueAction::animate(Param::Scale, 1.0, appear, APPEAR_EASE),
                        CueAction::animate(Param::OffsetY, 0.0, appear, APPEAR_EASE),
                    ],
                    appear,
                ));
                for i in 0..blinks {
                    let timing = if i == 0 { first } else { other };
                    push_blink_close(cues, kind, timing.close);
                    push_blink_open(cues, kind, timing.open);
                }
                cues.push(Cue::new(kind, Vec::new(), pause_after));
            }
            Self::Sore { transition, hold } => {
                cues.push(Cue::new(
                    kind,
                    vec![
                        CueAction::SoreActive(true),
                        CueAction::Set(Param::SoreMorph, 0.0),
                        CueAction::animate(Param::SoreMorph, 1.0, transition, MORPH_EASE),
                    ],
                    transition,
                ));
                cues.push(Cue::new(kind, Vec::new(), hold));
                cues.push(Cue::new(
                    kind,
                    vec![CueAction::animate(
                        Param::SoreMorph,
                        0.0,
                        transition,
                        MORPH_EASE,
                    )],
                    transition,
                ));
                cues.push(Cue::new(kind, vec![CueAction::SoreActive(false)], 0.0));
            }
            Self::Exercise {
                blinks,
                close,
                hold_closed,
                open,
            } => {
                for _ in 0..blinks {
                    push_blink_close(cues, kind, close);
                    cues.push(Cue::new(
                        kind,
                        vec![CueAction::Enter(PlaybackState::Closed)],
                        hold_closed,
                    ));
                    push_blink_open(cues, kind, open);
                }
            }
            Self::Settle { tail } => {
                cues.push(Cue::new(
                    kind,
                    vec![
                        CueAction::Enter(PlaybackState::Settling),
                        CueAction::Set(Param::OffsetY, 0.0),
                    ],
                    tail,
                ));
                cues.push(Cue::new(
                    kind,
                    vec![CueAction::Enter(PlaybackState::Idle)],
                    0.0,
                ));
            }
        }
    }
}

fn push_blink_close(cues: &mut Vec<Cue>, kind: PhaseKind, duration: f64) {
    cues.push(Cue::new(
        kind,
        vec![
            CueAction::Enter(PlaybackState::Closing),
            CueAction::animate(Param::Morph, MAX_PROGRESS, duration, MORPH_EASE),
        ],
        duration,
    ));
}

fn push_blink_open(cues: &mut Vec<Cue>, kind: PhaseKind, duration: f64) {
    cues.push(Cue::new(
        kind,
        vec![
            CueAction::Enter(PlaybackState::Opening),
            CueAction::animate(Param::Morph, 0.0, duration, MORPH_EASE),
        ],
        duration,
    ));
}

/// Instantaneous effect applied when a cue starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CueAction {
    /// Switch the discrete playback state.
    Enter(PlaybackState),
    /// Snap a parameter, cancelling any tween on it.
    Set(Param, f64),
    /// Raise or clear the sore-active flag.
    SoreActive(bool),
    /// Tween a parameter from its current value.
    Animate {
        /// Animated parameter.
        param: Param,
        /// Target value.
        to: f64,
        /// Tween length in seconds.
        duration: f64,
        /// Easing curve.
        ease: Ease,
    },
}

impl CueAction {
    fn animate(param: Param, to: f64, duration: f64, ease: Ease) -> Self {
        Self::Animate {
            param,
            to,
            duration,
            ease,
        }
    }
}

/// One compiled timeline step: apply `actions`, then wait `wait` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    /// Phase the cue belongs to.
    pub phase: PhaseKind,
    /// Effects applied on entry.
    pub actions: Vec<CueAction>,
    /// Suspension before the next cue.
    pub wait: f64,
}

impl Cue {
    fn new(phase: PhaseKind, actions: Vec<CueAction>, wait: f64) -> Self {
        Self {
            phase,
            actions,
            wait,
        }
    }
}

/// Tunable constants of the default choreography, in seconds unless noted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Fade/scale/offset-in duration.
    pub appear: f64,
    /// Arrival blinks (count).
    pub arrival_blink_count: u32,
    /// First arrival blink close.
    pub arrival_first_close: f64,
    /// First arrival blink open.
    pub arrival_first_open: f64,
    /// Later arrival blinks close.
    pub arrival_other_close: f64,
    /// Later arrival blinks open.
    pub arrival_other_open: f64,
    /// Pause between arrival and the sore phase.
    pub arrival_pause_after: f64,
    /// Squint in and squint out, each.
    pub sore_transition: f64,
    /// Squint hold.
    pub sore_hold: f64,
    /// Exercise blinks (count).
    pub exercise_blink_count: u32,
    /// Exercise close.
    pub exercise_close: f64,
    /// Exercise hold while closed.
    pub exercise_hold_closed: f64,
    /// Exercise open.
    pub exercise_open: f64,
    /// Wait after settling.
    pub settle_tail: f64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            appear: 0.9,
            arrival_blink_count: 3,
            arrival_first_close: 0.2,
            arrival_first_open: 0.25,
            arrival_other_close: 0.1,
            arrival_other_open: 0.15,
            arrival_pause_after: 0.3,
            sore_transition: 0.5,
            sore_hold: 1.5,
            exercise_blink_count: 3,
            exercise_close: 1.5,
            exercise_hold_closed: 2.0,
            exercise_open: 1.0,
            settle_tail: 0.35,
        }
    }
}

impl ScriptConfig {
    fn durations(&self) -> [(&'static str, f64); 12] {
        [
            ("appear", self.appear),
            ("arrival_first_close", self.arrival_first_close),
            ("arrival_first_open", self.arrival_first_open),
            ("arrival_other_close", self.arrival_other_close),
            ("arrival_other_open", self.arrival_other_open),
            ("arrival_pause_after", self.arrival_pause_after),
            ("sore_transition", self.sore_transition),
            ("sore_hold", self.sore_hold),
            ("exercise_close", self.exercise_close),
            ("exercise_hold_closed", self.exercise_hold_closed),
            ("exercise_open", self.exercise_open),
            ("settle_tail", self.settle_tail),
        ]
    }

    /// Check every duration is finite and non-negative.
    pub fn validate(&self) -> BlinkResult<()> {
        self.durations()
            .into_iter()
            .try_for_each(|(name, value)| check_duration(name, value))
    }

    /// Copy with every duration multiplied by `factor` (preview playback).
    pub fn time_scaled(&self, factor: f64) -> BlinkResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(BlinkError::config(format!(
                "time scale must be finite and > 0 (got {factor})"
            )));
        }
        Ok(Self {
            appear: self.appear * factor,
            arrival_blink_count: self.arrival_blink_count,
            arrival_first_close: self.arrival_first_close * factor,
            arrival_first_open: self.arrival_first_open * factor,
            arrival_other_close: self.arrival_other_close * factor,
            arrival_other_open: self.arrival_other_open * factor,
            arrival_pause_after: self.arrival_pause_after * factor,
            sore_transition: self.sore_transition * factor,
            sore_hold: self.sore_hold * factor,
            exercise_blink_count: self.exercise_blink_count,
            exercise_close: self.exercise_close * factor,
            exercise_hold_closed: self.exercise_hold_closed * factor,
            exercise_open: self.exercise_open * factor,
            settle_tail: self.settle_tail * factor,
        })
    }
}

fn check_duration(name: &str, value: f64) -> BlinkResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BlinkError::config(format!(
            "{name} must be finite and >= 0 (got {value})"
        )));
    }
    Ok(())
}

/// Ordered phases of one full playback.
///
/// Every duration is finite and non-negative; deserialization goes through the same check as
/// [`AnimationScript::new`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ScriptDef")]
pub struct AnimationScript {
    phases: Vec<AnimationPhase>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptDef {
    phases: Vec<AnimationPhase>,
}

impl TryFrom<ScriptDef> for AnimationScript {
    type Error = BlinkError;

    fn try_from(def: ScriptDef) -> BlinkResult<Self> {
        Self::new(def.phases)
    }
}

impl Default for AnimationScript {
    fn default() -> Self {
        Self::from_valid_config(&ScriptConfig::default())
    }
}

impl AnimationScript {
    /// Script from explicit phases. Fails on any negative or non-finite duration.
    pub fn new(phases: Vec<AnimationPhase>) -> BlinkResult<Self> {
        for phase in &phases {
            phase.validate()?;
        }
        Ok(Self { phases })
    }

    /// Validate the script.
    pub fn validate(&self) -> BlinkResult<()> {
        self.phases.iter().try_for_each(AnimationPhase::validate)
    }

    /// Standard arrival → sore → exercise → settle choreography.
    pub fn from_config(cfg: &ScriptConfig) -> BlinkResult<Self> {
        cfg.validate()?;
        Ok(Self::from_valid_config(cfg))
    }

    fn from_valid_config(cfg: &ScriptConfig) -> Self {
        Self {
            phases: vec![
                AnimationPhase::Arrival {
                    appear: cfg.appear,
                    blinks: cfg.arrival_blink_count,
                    first: BlinkTiming {
                        close: cfg.arrival_first_close,
                        open: cfg.arrival_first_open,
                    },
                    other: BlinkTiming {
                        close: cfg.arrival_other_close,
                        open: cfg.arrival_other_open,
                    },
                    pause_after: cfg.arrival_pause_after,
                },
                AnimationPhase::Sore {
                    transition: cfg.sore_transition,
                    hold: cfg.sore_hold,
                },
                AnimationPhase::Exercise {
                    blinks: cfg.exercise_blink_count,
                    close: cfg.exercise_close,
                    hold_closed: cfg.exercise_hold_closed,
                    open: cfg.exercise_open,
                },
                AnimationPhase::Settle {
                    tail: cfg.settle_tail,
                },
            ],
        }
    }

    /// Phases in playback order.
    pub fn phases(&self) -> &[AnimationPhase] {
        &self.phases
    }

    /// Length of one playback, computed from the constants alone.
    pub fn total_duration(&self) -> f64 {
        self.phases.iter().map(AnimationPhase::duration).sum()
    }

    /// Flatten the phases into timeline cues.
    pub fn compile(&self) -> Vec<Cue> {
        let mut cues = Vec::new();
        for phase in &self.phases {
            phase.compile_into(&mut cues);
        }
        cues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/script.rs"]
mod tests;
