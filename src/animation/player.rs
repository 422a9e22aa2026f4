use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::animation::clock::Clock;
use crate::animation::controller::SessionId;
use crate::animation::runner::{CancelToken, RunOpts, RunOutcome, run};
use crate::animation::script::AnimationScript;
use crate::animation::timeline::{BlinkFrame, Timeline};
use crate::foundation::error::{BlinkError, BlinkResult};

/// Message published by a [`Player`] playback thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerEvent {
    /// A sampled frame.
    Frame {
        /// Run that produced the frame.
        session: SessionId,
        /// Clock time of the sample.
        at: f64,
        /// Published values.
        frame: BlinkFrame,
    },
    /// The run ended. Always the last event of a session.
    Finished {
        /// Run that ended.
        session: SessionId,
        /// How it ended.
        outcome: RunOutcome,
    },
}

impl PlayerEvent {
    /// Session the event belongs to.
    pub fn session(&self) -> SessionId {
        match *self {
            Self::Frame { session, .. } | Self::Finished { session, .. } => session,
        }
    }
}

struct Playback {
    id: SessionId,
    cancel: CancelToken,
    handle: JoinHandle<RunOutcome>,
}

/// Real-time player running each script on its own thread, one at a time.
///
/// [`play`](Self::play) cancels and joins the run in flight before spawning the next, so events
/// of an older session never follow events of a newer one on the channel.
pub struct Player {
    clock: Arc<dyn Clock>,
    opts: RunOpts,
    tx: Sender<PlayerEvent>,
    current: Option<Playback>,
    next_id: u64,
}

impl Player {
    /// Player on `clock` plus the receiving end of its event channel.
    pub fn new(clock: Arc<dyn Clock>, opts: RunOpts) -> (Self, Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel();
        let player = Self {
            clock,
            opts,
            tx,
            current: None,
            next_id: 1,
        };
        (player, rx)
    }

    /// Start `script` now, terminating any run in flight first.
    pub fn play(&mut self, script: &AnimationScript) -> BlinkResult<SessionId> {
        self.stop();

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let cancel = CancelToken::new();
        let mut timeline = Timeline::new(script);
        let clock = Arc::clone(&self.clock);
        let tx = self.tx.clone();
        let token = cancel.clone();
        let opts = self.opts;

        let handle = thread::Builder::new()
            .name(format!("blinkmorph-{id}"))
            .spawn(move || {
                let mut publish = |at: f64, frame: &BlinkFrame| {
                    let _ = tx.send(PlayerEvent::Frame {
                        session: id,
                        at,
                        frame: *frame,
                    });
                };
                let outcome = run(&mut timeline, clock.as_ref(), &token, &mut publish, opts);
                let _ = tx.send(PlayerEvent::Finished {
                    session: id,
                    outcome,
                });
                outcome
            })
            .map_err(|e| {
                BlinkError::Other(anyhow::Error::new(e).context("spawn playback thread"))
            })?;

        tracing::debug!(session = %id, "playback thread spawned");
        self.current = Some(Playback { id, cancel, handle });
        Ok(id)
    }

    /// Cancel the run in flight and wait for its thread. `None` when nothing was playing.
    pub fn stop(&mut self) -> Option<RunOutcome> {
        let playback = self.current.take()?;
        playback.cancel.cancel();
        join(playback)
    }

    /// Block until the run in flight ends on its own.
    pub fn wait(&mut self) -> Option<RunOutcome> {
        let playback = self.current.take()?;
        join(playback)
    }

    /// Whether a run is in flight and has not ended yet.
    pub fn is_playing(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// Session of the run in flight.
    pub fn current_session(&self) -> Option<SessionId> {
        self.current.as_ref().map(|p| p.id)
    }

    /// Cancellation handle of the run in flight.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.current.as_ref().map(|p| p.cancel.clone())
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("opts", &self.opts)
            .field("current", &self.current_session())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

fn join(playback: Playback) -> Option<RunOutcome> {
    match playback.handle.join() {
        Ok(outcome) => Some(outcome),
        Err(_) => {
            tracing::warn!(session = %playback.id, "playback thread panicked");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
