use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::animation::clock::Clock;
use crate::animation::timeline::{BlinkFrame, PlaybackState, Timeline};

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

/// Shared cooperative cancellation flag.
///
/// Cloning shares the flag. Cancellation is observed at checkpoints only, but wakes any
/// [`wait_timeout`](Self::wait_timeout) in progress.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<CancelState>);

impl CancelToken {
    /// Fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::Release);
        let _guard = self.0.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.0.wake.notify_all();
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::Acquire)
    }

    /// Block for up to `timeout`, returning early on cancellation. Returns whether cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.0.lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !self.is_cancelled() {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                break;
            }
            guard = self
                .0
                .wake
                .wait_timeout(guard, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        self.is_cancelled()
    }
}

/// Receives published frames. Observers read; they never write session state.
pub trait FrameObserver {
    /// Called with the time the frame was sampled at.
    fn observe(&mut self, at: f64, frame: &BlinkFrame);
}

impl<F> FrameObserver for F
where
    F: FnMut(f64, &BlinkFrame),
{
    fn observe(&mut self, at: f64, frame: &BlinkFrame) {
        self(at, frame)
    }
}

/// Options for [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunOpts {
    /// Also wake and publish every `frame_interval` seconds between checkpoints.
    pub frame_interval: Option<f64>,
}

/// How a [`run`] ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunOutcome {
    /// Every cue ran.
    Completed {
        /// Clock time of the final checkpoint.
        at: f64,
    },
    /// Halted at a checkpoint after cancellation was requested.
    Cancelled {
        /// Playback state the session was left in.
        state: PlaybackState,
        /// Clock time cancellation was observed.
        at: f64,
    },
}

impl RunOutcome {
    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Play `timeline` in real time on `clock`.
///
/// Checks `cancel` before and after every wait, and cancelling wakes the wait early; on
/// cancellation the timeline is halted where it stands and the caller decides how to reset
/// visuals. Checkpoints are scheduled on absolute
/// deadlines, so oversleeping does not accumulate drift.
#[tracing::instrument(level = "debug", skip_all, fields(total = timeline.total_duration()))]
pub fn run(
    timeline: &mut Timeline,
    clock: &dyn Clock,
    cancel: &CancelToken,
    observer: &mut dyn FrameObserver,
    opts: RunOpts,
) -> RunOutcome {
    let started = clock.now();
    if cancel.is_cancelled() {
        return halt(timeline, started);
    }

    timeline.start(started);
    tracing::info!(at = started, "playback started");
    observer.observe(started, &timeline.frame());

    let step = opts.frame_interval.filter(|s| s.is_finite() && *s > 0.0);
    while let Some(deadline) = timeline.next_deadline() {
        if cancel.is_cancelled() {
            return halt(timeline, clock.now());
        }

        let wake = match step {
            Some(step) => (clock.now() + step).min(deadline),
            None => deadline,
        };
        clock.sleep_until_cancelled(wake, cancel);

        if cancel.is_cancelled() {
            return halt(timeline, clock.now());
        }

        let at = if wake >= deadline {
            deadline
        } else {
            clock.now().min(deadline)
        };
        let frame = timeline.advance(at);
        observer.observe(at, &frame);
    }

    let at = clock.now();
    tracing::info!(at, elapsed = at - started, "playback completed");
    RunOutcome::Completed { at }
}

fn halt(timeline: &mut Timeline, at: f64) -> RunOutcome {
    timeline.cancel();
    let state = timeline.state();
    tracing::info!(at, state = state.as_str(), "playback cancelled");
    RunOutcome::Cancelled { state, at }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/runner.rs"]
mod tests;
