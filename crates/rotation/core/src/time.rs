//! Monotonic timestamps, clocks, and the per-lane execution timers.

use std::cell::Cell;
use std::fmt;
use std::time::{Duration, Instant};

use crate::ability::Lane;
use crate::env::Clock;

/// Monotonic point in time, in milliseconds since an arbitrary host epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_millis() as u64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

/// Time since an optional past event; an event that never happened is
/// infinitely far in the past.
#[inline]
pub fn elapsed_since(now: Timestamp, event: Option<Timestamp>) -> Duration {
    event.map_or(Duration::MAX, |at| now.since(at))
}

/// When each timing lane last saw an execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneTimers {
    pub last_slow: Option<Timestamp>,
    pub last_any: Option<Timestamp>,
}

impl LaneTimers {
    pub fn record(&mut self, lane: Lane, at: Timestamp) {
        self.last_any = Some(at);
        if lane.is_slow() {
            self.last_slow = Some(at);
        }
    }

    pub fn since_slow(&self, now: Timestamp) -> Duration {
        elapsed_since(now, self.last_slow)
    }

    pub fn since_any(&self, now: Timestamp) -> Duration {
        elapsed_since(now, self.last_any)
    }

    /// Time that counts against the lockout of an action in `lane`.
    ///
    /// Slow actions only wait on the previous slow action; fast actions wait
    /// on any previous execution.
    pub fn since_lane(&self, lane: Lane, now: Timestamp) -> Duration {
        match lane {
            Lane::Slow => self.since_slow(now),
            Lane::Fast => self.since_any(now),
        }
    }
}

/// Wall-clock backed [`Clock`] anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
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
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_millis() as u64)
    }
}

/// Hand-driven [`Clock`] for simulations and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(at: Timestamp) -> Self {
        Self { now: Cell::new(at) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    pub fn set(&self, at: Timestamp) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_saturates_when_clock_is_behind() {
        assert_eq!(
            Timestamp(500).since(Timestamp(800)),
            Duration::ZERO,
            "a stale sample must not underflow"
        );
        assert_eq!(Timestamp(800).since(Timestamp(500)), Duration::from_millis(300));
    }

    #[test]
    fn never_is_infinitely_long_ago() {
        assert_eq!(elapsed_since(Timestamp(5), None), Duration::MAX);
    }

    #[test]
    fn fast_actions_only_touch_any_timer() {
        let mut timers = LaneTimers::default();
        timers.record(Lane::Slow, Timestamp(1_000));
        timers.record(Lane::Fast, Timestamp(1_700));

        let now = Timestamp(2_000);
        assert_eq!(timers.since_lane(Lane::Slow, now), Duration::from_millis(1_000));
        assert_eq!(timers.since_lane(Lane::Fast, now), Duration::from_millis(300));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::starting_at(Timestamp(100));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Timestamp(350));
        clock.set(Timestamp(10));
        assert_eq!(clock.now(), Timestamp(10));
    }
}
