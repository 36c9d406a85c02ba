//! Global state shared by the driver loop and the design under test.
//!
//! A [`SimContext`] holds the current simulation time and the sticky finish
//! flag. The driver owns it; a design borrows it for its whole lifetime and
//! may raise the finish flag through a shared reference. Only the driver can
//! move time forward.

use std::cell::Cell;

use crate::time::SimTime;

/// Simulation time and completion state for a single run.
///
/// The context is single-threaded: it uses [`Cell`] so the driver and the
/// design can both hold `&SimContext` at once.
#[derive(Debug, Default)]
pub struct SimContext {
    time: Cell<SimTime>,
    finished: Cell<bool>,
}

impl SimContext {
    /// Creates a context at time zero with the finish flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time.get()
    }

    /// Returns `true` once any party has called [`set_finish`](Self::set_finish).
    pub fn got_finish(&self) -> bool {
        self.finished.get()
    }

    /// Raises the finish flag. Calling it again has no effect; the flag is
    /// never cleared.
    pub fn set_finish(&self) {
        if !self.finished.replace(true) {
            log::debug!("finish requested at {}", self.time());
        }
    }

    /// Advances simulation time by `delta` units.
    ///
    /// # Panics
    ///
    /// Panics if the tick counter would overflow `u64`. In debug builds it also
    /// panics if `delta` is zero.
    pub(crate) fn time_inc(&self, delta: u64) {
        debug_assert!(delta > 0, "time must advance by a positive quantum");
        let now = self.time.get();
        let next = now
            .checked_advance(delta)
            .unwrap_or_else(|| panic!("simulation time overflowed advancing {now} by {delta}"));
        self.time.set(next);
    }
}
