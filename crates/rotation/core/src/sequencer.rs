//! Steps through the scripted opener.

use crate::ability::Ability;
use crate::context::TickContext;
use crate::error::AttemptError;
use crate::opener::OpenerPlan;
use crate::session::RotationStatus;

/// Result of one opener advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerAdvance {
    /// Every step has been consumed; the caller should leave opener mode.
    Complete,
    /// The step was disabled by configuration; the cursor moved past it.
    Skipped(Ability),
    /// The step could not run this tick; the cursor did not move.
    Blocked(AttemptError),
    Executed(Ability),
}

/// Drives an [`OpenerPlan`] against the session's opener cursor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequencer {
    plan: OpenerPlan,
}

impl Sequencer {
    pub fn new(plan: OpenerPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &OpenerPlan {
        &self.plan
    }

    /// Attempts the step under the cursor. At most one execution.
    pub(crate) fn advance(&self, ctx: &mut TickContext<'_, '_>) -> OpenerAdvance {
        let cursor = ctx.session.opener_step;
        let Some(step) = self.plan.step(cursor).copied() else {
            return OpenerAdvance::Complete;
        };

        ctx.session.set_next_action(step.label);

        if !ctx.is_enabled(step.ability) {
            ctx.session.opener_step += 1;
            tracing::debug!(step = cursor, action = step.label, "opener step disabled, skipping");
            return OpenerAdvance::Skipped(step.ability);
        }

        let remaining = ctx.lockout_remaining(step.lane);
        if !remaining.is_zero() {
            return OpenerAdvance::Blocked(AttemptError::Locked {
                ability: step.ability,
                remaining,
            });
        }

        if let Err(error) = ctx.try_use_as(step.ability, step.lane, step.label) {
            tracing::trace!(step = cursor, %error, "opener step waiting");
            return OpenerAdvance::Blocked(error);
        }

        ctx.session.opener_step += 1;
        ctx.session.status = RotationStatus::OpenerProgress {
            step: ctx.session.opener_step,
            total: self.plan.len(),
        };
        tracing::info!(
            step = ctx.session.opener_step,
            total = self.plan.len(),
            action = step.label,
            heat = ctx.gauges.heat(),
            "opener step executed"
        );
        OpenerAdvance::Executed(step.ability)
    }
}
