//! Per-tick evaluation context shared by the opener and the policy.
//!
//! Every execution the engine performs goes through [`TickContext::try_use_as`],
//! so timers, gauges, the combo cursor, and history are updated exactly once
//! per accepted action regardless of which component chose it.

use std::time::Duration;

use crate::ability::{Ability, Lane};
use crate::config::RotationConfig;
use crate::env::{RotationEnv, TargetId};
use crate::error::AttemptError;
use crate::gauge::ResourceTracker;
use crate::session::{ExecutionRecord, RotationSession};
use crate::time::Timestamp;

pub(crate) struct TickContext<'t, 'e> {
    pub env: &'t mut RotationEnv<'e>,
    pub session: &'t mut RotationSession,
    pub gauges: &'t mut ResourceTracker,
    pub config: &'t RotationConfig,
    /// Clock sample taken once at the start of the tick.
    pub now: Timestamp,
    pub target: TargetId,
    /// Companion weave fired alongside this tick's action, if any.
    pub companion: Option<Ability>,
}

impl<'t, 'e> TickContext<'t, 'e> {
    pub fn new(
        env: &'t mut RotationEnv<'e>,
        session: &'t mut RotationSession,
        gauges: &'t mut ResourceTracker,
        config: &'t RotationConfig,
        now: Timestamp,
        target: TargetId,
    ) -> Self {
        Self {
            env,
            session,
            gauges,
            config,
            now,
            target,
            companion: None,
        }
    }

    pub fn is_enabled(&self, ability: Ability) -> bool {
        self.env.config.is_enabled_in_config(ability.id())
    }

    /// Enabled by configuration and usable right now.
    pub fn is_ready(&self, ability: Ability) -> bool {
        self.is_enabled(ability) && self.env.host.is_usable(ability.id())
    }

    /// Remaining lockout before an action in `lane` may execute.
    pub fn lockout_remaining(&self, lane: Lane) -> Duration {
        let elapsed = self.session.timers.since_lane(lane, self.now);
        self.config.lockout(lane).saturating_sub(elapsed)
    }

    pub fn try_use(&mut self, ability: Ability) -> Result<(), AttemptError> {
        self.try_use_as(ability, ability.lane(), ability.label())
    }

    /// Checks configuration and usability, executes, and records the result.
    pub fn try_use_as(
        &mut self,
        ability: Ability,
        lane: Lane,
        label: &str,
    ) -> Result<(), AttemptError> {
        if !self.is_enabled(ability) {
            return Err(AttemptError::Disabled(ability));
        }
        if !self.env.host.is_usable(ability.id()) {
            return Err(AttemptError::Unavailable(ability));
        }
        if !self.env.host.execute(ability.id(), self.target) {
            return Err(AttemptError::ExecutionFailed(ability));
        }
        self.record(ability, lane, label);
        Ok(())
    }

    /// [`Self::try_use`] for cascade candidates: failures are logged and
    /// reported as `false`.
    pub fn attempt(&mut self, ability: Ability) -> bool {
        match self.try_use(ability) {
            Ok(()) => true,
            Err(error) => {
                if error.reached_host() {
                    tracing::debug!(%error, "execution failed, trying next candidate");
                } else {
                    tracing::trace!(%error, "candidate skipped");
                }
                false
            }
        }
    }

    fn record(&mut self, ability: Ability, lane: Lane, label: &str) {
        self.session.record_execution(ability, lane, label, self.now);
        self.gauges.apply(ability);
        self.session.history.push(ExecutionRecord {
            ability,
            lane,
            at: self.now,
            heat: self.gauges.heat(),
            battery: self.gauges.battery(),
        });

        tracing::info!(
            action = label,
            %lane,
            heat = self.gauges.heat(),
            battery = self.gauges.battery(),
            at = %self.now,
            "ability executed"
        );
    }
}
