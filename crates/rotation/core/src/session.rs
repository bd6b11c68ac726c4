//! Mutable runtime state of one rotation session.

use std::fmt;
use std::time::Duration;

use arrayvec::ArrayVec;

use crate::ability::{Ability, Lane, next_combo_step};
use crate::time::{LaneTimers, Timestamp};

/// Human-readable session status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationStatus {
    #[default]
    Idle,
    Running,
    OpenerActive,
    OpenerProgress {
        step: usize,
        total: usize,
    },
    OpenerComplete,
    SteadyState {
        heat: u8,
    },
    NoTarget,
    TargetDead,
    Stopped,
}

impl fmt::Display for RotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationStatus::Idle => f.write_str("Idle"),
            RotationStatus::Running => f.write_str("Running"),
            RotationStatus::OpenerActive => f.write_str("Opener Active"),
            RotationStatus::OpenerProgress { step, total } => write!(f, "Opener {step}/{total}"),
            RotationStatus::OpenerComplete => f.write_str("Opener Complete - Running"),
            RotationStatus::SteadyState { heat } => write!(f, "Running (Heat: {heat})"),
            RotationStatus::NoTarget => f.write_str("No Target"),
            RotationStatus::TargetDead => f.write_str("Target Dead"),
            RotationStatus::Stopped => f.write_str("Stopped"),
        }
    }
}

/// Extra Heat Blast uses opened by Hypercharge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurstWindow {
    pub active: bool,
    pub remaining: u8,
    /// When the window was last opened.
    pub opened_at: Option<Timestamp>,
}

impl BurstWindow {
    pub fn open(&mut self, uses: u8, at: Timestamp) {
        self.active = true;
        self.remaining = uses;
        self.opened_at = Some(at);
    }

    /// Spends one use; closes the window when none remain.
    pub fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
        }
    }

    pub fn has_uses(&self) -> bool {
        self.active && self.remaining > 0
    }

    /// Closes an open window older than `duration`. Returns `true` if it did.
    pub fn expire(&mut self, now: Timestamp, duration: Duration) -> bool {
        let stale = self
            .opened_at
            .is_some_and(|opened| now.since(opened) >= duration);
        if self.active && stale {
            self.clear();
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0;
    }
}

/// One successful execution, as remembered by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionRecord {
    pub ability: Ability,
    pub lane: Lane,
    pub at: Timestamp,
    /// Gauge values after the execution was applied.
    pub heat: u8,
    pub battery: u8,
}

const HISTORY_CAPACITY: usize = 16;

/// Bounded history of recent executions; the oldest entry is evicted first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    records: ArrayVec<ExecutionRecord, HISTORY_CAPACITY>,
}

impl History {
    pub const CAPACITY: usize = HISTORY_CAPACITY;

    pub fn push(&mut self, record: ExecutionRecord) {
        if self.records.is_full() {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&ExecutionRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// All mutable state owned by the engine between ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RotationSession {
    pub enabled: bool,
    pub in_opener: bool,
    pub opener_step: usize,
    pub combo_step: u8,
    pub burst: BurstWindow,
    pub timers: LaneTimers,
    /// Last successful use of the reserved finisher (Wildfire).
    pub last_finisher_at: Option<Timestamp>,
    pub last_action: String,
    pub next_action: String,
    pub status: RotationStatus,
    pub history: History,
}

impl RotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookkeeping for one successful execution, shared by the opener and the
    /// steady-state policy. Gauges are applied by the caller.
    pub(crate) fn record_execution(
        &mut self,
        ability: Ability,
        lane: Lane,
        label: &str,
        at: Timestamp,
    ) {
        self.timers.record(lane, at);
        if ability == Ability::Wildfire {
            self.last_finisher_at = Some(at);
        }
        self.combo_step = next_combo_step(ability, self.combo_step);
        self.last_action.clear();
        self.last_action.push_str(label);
    }

    pub(crate) fn set_next_action(&mut self, label: &str) {
        if self.next_action != label {
            self.next_action.clear();
            self.next_action.push_str(label);
        }
    }

    /// Clears opener, combo, and burst progress.
    pub(crate) fn clear_progress(&mut self) {
        self.in_opener = false;
        self.opener_step = 0;
        self.combo_step = 0;
        self.burst.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(RotationStatus::Idle.to_string(), "Idle");
        assert_eq!(
            RotationStatus::OpenerProgress { step: 3, total: 31 }.to_string(),
            "Opener 3/31"
        );
        assert_eq!(
            RotationStatus::SteadyState { heat: 45 }.to_string(),
            "Running (Heat: 45)"
        );
        assert_eq!(
            RotationStatus::OpenerComplete.to_string(),
            "Opener Complete - Running"
        );
    }

    #[test]
    fn burst_window_closes_after_last_use() {
        let mut burst = BurstWindow::default();
        burst.open(2, Timestamp(0));
        assert!(burst.has_uses());
        burst.consume();
        assert!(burst.active);
        burst.consume();
        assert!(!burst.active);
        assert!(!burst.has_uses());
    }

    #[test]
    fn stale_burst_window_expires() {
        let mut burst = BurstWindow::default();
        burst.open(5, Timestamp(1_000));
        assert!(!burst.expire(Timestamp(5_000), Duration::from_secs(10)));
        assert!(burst.expire(Timestamp(11_000), Duration::from_secs(10)));
        assert!(!burst.active);
        assert_eq!(burst.remaining, 0);
    }

    #[test]
    fn history_evicts_oldest() {
        let mut history = History::default();
        for i in 0..(History::CAPACITY as u64 + 3) {
            history.push(ExecutionRecord {
                ability: Ability::GaussRound,
                lane: Lane::Fast,
                at: Timestamp(i),
                heat: 0,
                battery: 0,
            });
        }
        assert_eq!(history.len(), History::CAPACITY);
        assert_eq!(history.iter().next().map(|r| r.at), Some(Timestamp(3)));
        assert_eq!(
            history.last().map(|r| r.at),
            Some(Timestamp(History::CAPACITY as u64 + 2))
        );
    }

    #[test]
    fn recording_wildfire_tracks_finisher() {
        let mut session = RotationSession::new();
        session.record_execution(Ability::Wildfire, Lane::Fast, "Wildfire", Timestamp(900));
        assert_eq!(session.last_finisher_at, Some(Timestamp(900)));
        assert_eq!(session.timers.last_any, Some(Timestamp(900)));
        assert_eq!(session.timers.last_slow, None);
        assert_eq!(session.last_action, "Wildfire");
    }
}
