use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::animation::runner::CancelToken;

/// Time source for real-time playback, in seconds since an arbitrary origin.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> f64;
    /// Block until `deadline`. Returns immediately if it already passed.
    fn sleep_until(&self, deadline: f64);

    /// Block until `deadline` or until `cancel` fires, whichever comes first.
    fn sleep_until_cancelled(&self, deadline: f64, cancel: &CancelToken) {
        if !cancel.is_cancelled() {
            self.sleep_until(deadline);
        }
    }
}

/// Wall time left until `deadline`, saturating for deadlines too far out to represent.
fn remaining(deadline: f64, now: f64) -> Option<Duration> {
    let secs = deadline - now;
    if secs > 0.0 {
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    } else {
        None
    }
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose zero is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep_until(&self, deadline: f64) {
        if let Some(wait) = remaining(deadline, self.now()) {
            std::thread::sleep(wait);
        }
    }

    fn sleep_until_cancelled(&self, deadline: f64, cancel: &CancelToken) {
        if let Some(wait) = remaining(deadline, self.now()) {
            cancel.wait_timeout(wait);
        }
    }
}

/// Virtual clock: sleeping jumps straight to the deadline.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    /// Clock starting at `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move time forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += dt.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sleep_until(&self, deadline: f64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if deadline > *now {
            *now = deadline;
        }
    }
}
