//! Cue-driven playback state machine.
//!
//! A [`Timeline`] never sleeps. Callers hand it the current time; it completes every cue whose
//! deadline has passed and samples in-flight tweens. "Suspend for D" in the choreography is a
//! deadline `D` seconds after the cue started, exposed through [`Timeline::next_deadline`].

use crate::animation::ease::Ease;
use crate::animation::script::{
    AnimationScript, Cue, CueAction, PhaseKind, START_OFFSET_Y, START_SCALE,
};

/// Discrete state published alongside the continuous parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not playing (initial and terminal).
    #[default]
    Idle,
    /// Appearing on screen.
    Aware,
    /// Lids moving toward closed.
    Closing,
    /// Holding closed.
    Closed,
    /// Lids moving toward open.
    Opening,
    /// Returning to rest before idle.
    Settling,
}

impl PlaybackState {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Aware => "aware",
            Self::Closing => "closing",
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Settling => "settling",
        }
    }
}

/// Continuous parameter driven by the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// Blink morph progress: 0 open, 1 sore, 2 closed.
    Morph,
    /// Squint morph: 0 open, 1 sore.
    SoreMorph,
    /// Overall opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale of the pair.
    Scale,
    /// Vertical offset of the pair.
    OffsetY,
}

/// Snapshot of every value a session publishes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlinkFrame {
    /// Discrete playback state.
    pub state: PlaybackState,
    /// Blink morph progress in `[0, 2]`.
    pub morph: f64,
    /// Squint morph in `[0, 1]`.
    pub sore_morph: f64,
    /// Whether the squint is being shown.
    pub sore_active: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

impl BlinkFrame {
    /// Values before a playback starts and after it is discarded.
    pub const REST: Self = Self {
        state: PlaybackState::Idle,
        morph: 0.0,
        sore_morph: 0.0,
        sore_active: false,
        opacity: 0.0,
        scale: START_SCALE,
        offset_y: START_OFFSET_Y,
    };

    /// Read one parameter.
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Morph => self.morph,
            Param::SoreMorph => self.sore_morph,
            Param::Opacity => self.opacity,
            Param::Scale => self.scale,
            Param::OffsetY => self.offset_y,
        }
    }

    fn set(&mut self, param: Param, value: f64) {
        match param {
            Param::Morph => self.morph = value,
            Param::SoreMorph => self.sore_morph = value,
            Param::Opacity => self.opacity = value,
            Param::Scale => self.scale = value,
            Param::OffsetY => self.offset_y = value,
        }
    }
}

impl Default for BlinkFrame {
    fn default() -> Self {
        Self::REST
    }
}

/// Lifecycle of a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    /// Built, not started.
    Pending,
    /// Between cues.
    Running,
    /// Every cue completed.
    Finished,
    /// Halted by [`Timeline::cancel`].
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct ActiveTween {
    param: Param,
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl ActiveTween {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn value_at(&self, now: f64) -> f64 {
        // Checkpoints land exactly on `end()`; land exactly on the target too.
        if self.duration <= 0.0 || now >= self.end() {
            return self.to;
        }
        let t = (now - self.start) / self.duration;
        self.ease.tween(&self.from, &self.to, t)
    }
}

/// One run of an [`AnimationScript`].
#[derive(Clone, Debug)]
pub struct Timeline {
    cues: Vec<Cue>,
    total: f64,
    cursor: usize,
    cue_start: f64,
    tweens: Vec<ActiveTween>,
    frame: BlinkFrame,
    status: TimelineStatus,
}

impl Timeline {
    /// Compile `script` into a pending timeline.
    pub fn new(script: &AnimationScript) -> Self {
        Self {
            cues: script.compile(),
            total: script.total_duration(),
            cursor: 0,
            cue_start: 0.0,
            tweens: Vec::new(),
            frame: BlinkFrame::REST,
            status: TimelineStatus::Pending,
        }
    }

    /// Enter the first cue at `now`. Ignored unless pending.
    pub fn start(&mut self, now: f64) {
        if self.status != TimelineStatus::Pending {
            tracing::warn!(status = ?self.status, "timeline already started");
            return;
        }
        self.status = TimelineStatus::Running;
        self.cue_start = now;
        if self.cues.is_empty() {
            self.finish();
            return;
        }
        self.enter_cue();
        self.advance(now);
    }

    /// Complete every cue whose deadline is at or before `now`, then sample in-flight tweens.
    ///
    /// Time must not go backwards between calls; earlier times only resample tweens.
    pub fn advance(&mut self, now: f64) -> BlinkFrame {
        if self.status != TimelineStatus::Running {
            return self.frame;
        }

        loop {
            let deadline = self.cue_start + self.cues[self.cursor].wait;
            if now < deadline {
                break;
            }
            self.sample_tweens(deadline);
            self.cursor += 1;
            self.cue_start = deadline;
            if self.cursor >= self.cues.len() {
                self.finish();
                return self.frame;
            }
            self.enter_cue();
        }

        self.sample_tweens(now);
        self.frame
    }

    /// Time of the next checkpoint while running.
    pub fn next_deadline(&self) -> Option<f64> {
        if self.status != TimelineStatus::Running {
            return None;
        }
        Some(self.cue_start + self.cues[self.cursor].wait)
    }

    /// Halt where the timeline is. Parameter values are left untouched.
    pub fn cancel(&mut self) {
        if matches!(
            self.status,
            TimelineStatus::Finished | TimelineStatus::Cancelled
        ) {
            return;
        }
        tracing::debug!(
            cue = self.cursor,
            state = self.frame.state.as_str(),
            "timeline cancelled"
        );
        self.status = TimelineStatus::Cancelled;
        self.tweens.clear();
    }

    /// Latest published values.
    pub fn frame(&self) -> BlinkFrame {
        self.frame
    }

    /// Current discrete state.
    pub fn state(&self) -> PlaybackState {
        self.frame.state
    }

    /// Lifecycle status.
    pub fn status(&self) -> TimelineStatus {
        self.status
    }

    /// Whether cues remain to be run.
    pub fn is_running(&self) -> bool {
        self.status == TimelineStatus::Running
    }

    /// Phase of the cue currently waiting, if running.
    pub fn current_phase(&self) -> Option<PhaseKind> {
        if !self.is_running() {
            return None;
        }
        Some(self.cues[self.cursor].phase)
    }

    /// Length of the full run in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    fn enter_cue(&mut self) {
        let start = self.cue_start;
        let cue = &self.cues[self.cursor];
        tracing::trace!(
            cue = self.cursor,
            phase = ?cue.phase,
            wait = cue.wait,
            at = start,
            "enter cue"
        );

        for action in &cue.actions {
            match *action {
                CueAction::Enter(state) => {
                    if state != self.frame.state {
                        tracing::debug!(
                            from = self.frame.state.as_str(),
                            to = state.as_str(),
                            at = start,
                            "playback state"
                        );
                    }
                    self.frame.state = state;
                }
                CueAction::Set(param, value) => {
                    self.tweens.retain(|tw| tw.param != param);
                    self.frame.set(param, value);
                }
                CueAction::SoreActive(active) => self.frame.sore_active = active,
                CueAction::Animate {
                    param,
                    to,
                    duration,
                    ease,
                } => {
                    self.tweens.retain(|tw| tw.param != param);
                    if duration <= 0.0 {
                        self.frame.set(param, to);
                    } else {
                        self.tweens.push(ActiveTween {
                            param,
                            from: self.frame.get(param),
                            to,
                            start,
                            duration,
                            ease,
                        });
                    }
                }
            }
        }
    }

    fn sample_tweens(&mut self, now: f64) {
        for tw in &self.tweens {
            self.frame.set(tw.param, tw.value_at(now));
        }
        self.tweens.retain(|tw| tw.end() > now);
    }

    fn finish(&mut self) {
        for tw in self.tweens.drain(..) {
            self.frame.set(tw.param, tw.to);
        }
        self.frame.state = PlaybackState::Idle;
        self.status = TimelineStatus::Finished;
        tracing::debug!(total = self.total, "timeline finished");
    }
}

/// Evaluate `script` at `t` seconds after start without any real waiting.
pub fn sample_at(script: &AnimationScript, t: f64) -> BlinkFrame {
    let mut timeline = Timeline::new(script);
    timeline.start(0.0);
    timeline.advance(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
