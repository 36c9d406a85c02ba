//! Discrete simulation time.
//!
//! [`SimTime`] counts elapsed simulation time units (the design's time
//! precision). It is unrelated to wall-clock time and only ever moves forward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulation time, measured in whole time units since the start
/// of the run.
///
/// Ordering is the natural ordering of the underlying tick count.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(u64);

impl SimTime {
    /// The start of every run.
    pub const ZERO: SimTime = SimTime(0);

    /// Creates a time point from a raw tick count.
    pub fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the time `delta` units later, or `None` if the tick counter
    /// would overflow.
    pub fn checked_advance(self, delta: u64) -> Option<Self> {
        self.0.checked_add(delta).map(Self)
    }

    /// Returns `true` if the clock of period two units is high at this time.
    ///
    /// Time 0 is low, so rising edges fall on odd times.
    pub fn is_clock_high(self) -> bool {
        self.0 % 2 == 1
    }
}

impl From<u64> for SimTime {
    fn from(ticks: u64) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
