use crate::animation::runner::CancelToken;
use crate::animation::script::AnimationScript;
use crate::animation::timeline::{BlinkFrame, PlaybackState, Timeline, TimelineStatus};

/// Identifies one playback run. Strictly increasing per driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// One run of a script.
#[derive(Debug)]
pub struct BlinkSession {
    id: SessionId,
    timeline: Timeline,
    cancel: CancelToken,
    started_at: f64,
}

impl BlinkSession {
    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Timeline being driven.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Token that cancels this session at its next tick.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Time [`BlinkController::start`] was called with.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }
}

/// Tick-driven "start now" / "cancel" surface with at most one session in flight.
///
/// The host calls [`tick`](Self::tick) from its own frame loop; nothing here sleeps.
#[derive(Debug)]
pub struct BlinkController {
    script: AnimationScript,
    active: Option<BlinkSession>,
    next_id: u64,
}

impl BlinkController {
    /// Controller for `script`.
    pub fn new(script: AnimationScript) -> Self {
        Self {
            script,
            active: None,
            next_id: 1,
        }
    }

    /// Script used for subsequent starts.
    pub fn script(&self) -> &AnimationScript {
        &self.script
    }

    /// Replace the script. A session already in flight keeps its compiled cues.
    pub fn set_script(&mut self, script: AnimationScript) {
        self.script = script;
    }

    /// Start a new session at `now`, cancelling any session in flight first.
    pub fn start(&mut self, now: f64) -> SessionId {
        if let Some(prev) = self.active.take() {
            prev.cancel.cancel();
            tracing::info!(session = %prev.id, at = now, "session superseded");
        }

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let mut timeline = Timeline::new(&self.script);
        timeline.start(now);
        tracing::info!(session = %id, at = now, total = timeline.total_duration(), "session started");
        if !timeline.is_running() {
            tracing::info!(session = %id, at = now, "session finished");
            return id;
        }

        self.active = Some(BlinkSession {
            id,
            timeline,
            cancel: CancelToken::new(),
            started_at: now,
        });
        id
    }

    /// Cancel the session in flight. Returns whether there was one.
    ///
    /// Visual parameters are not reset; the next frame reported is the rest frame.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(mut session) => {
                session.cancel.cancel();
                session.timeline.cancel();
                tracing::info!(
                    session = %session.id,
                    state = session.timeline.state().as_str(),
                    "session cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// Drive the active session to `now` and return the published frame.
    pub fn tick(&mut self, now: f64) -> BlinkFrame {
        let Some(session) = self.active.as_mut() else {
            return BlinkFrame::REST;
        };

        if session.cancel.is_cancelled() {
            session.timeline.cancel();
            let frame = session.timeline.frame();
            tracing::info!(session = %session.id, state = frame.state.as_str(), "session cancelled");
            self.active = None;
            return frame;
        }

        let frame = session.timeline.advance(now);
        if session.timeline.status() == TimelineStatus::Finished {
            tracing::info!(session = %session.id, at = now, "session finished");
            self.active = None;
        }
        frame
    }

    /// Latest frame of the active session, or the rest frame when idle.
    pub fn frame(&self) -> BlinkFrame {
        self.active
            .as_ref()
            .map_or(BlinkFrame::REST, |s| s.timeline.frame())
    }

    /// Current discrete state.
    pub fn state(&self) -> PlaybackState {
        self.frame().state
    }

    /// Whether a session is in flight.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Session in flight, if any.
    pub fn active_session(&self) -> Option<&BlinkSession> {
        self.active.as_ref()
    }

    /// Cancellation handle for the session in flight.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.active.as_ref().map(BlinkSession::cancel_token)
    }

    /// Full run length of the current script.
    pub fn total_duration(&self) -> f64 {
        self.script.total_duration()
    }
}

impl Default for BlinkController {
    fn default() -> Self {
        Self::new(AnimationScript::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/controller.rs"]
mod tests;
