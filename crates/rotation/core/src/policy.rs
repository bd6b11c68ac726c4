//! Steady-state priority cascade.
//!
//! Runs once per tick after the opener is finished or skipped. Categories are
//! tried in a fixed order and the first accepted action ends the tick:
//!
//! 1. weave window: Barrel Stabilizer, Hypercharge, Wildfire, charge weaves
//! 2. slow lane lockout
//! 3. Heat Blast while a burst window has uses left
//! 4. tools (Air Anchor, Drill, Chain Saw, Excavator, Full Metal Field)
//! 5. basic combo
//!
//! Candidate lists are data so that reordering or adding an ability does not
//! touch control flow.

use std::time::Duration;

use crate::ability::{Ability, COMBO_CHAIN};
use crate::context::TickContext;
use crate::gauge::heat_cost;
use crate::session::RotationStatus;
use crate::time::elapsed_since;

/// Tools in priority order, each flagged with whether Reassemble should be
/// fired in front of it.
pub const TOOL_PRIORITY: &[(Ability, bool)] = &[
    (Ability::AirAnchor, true),
    (Ability::Drill, true),
    (Ability::ChainSaw, true),
    (Ability::Excavator, false),
    (Ability::FullMetalField, false),
];

/// Charge weaves, each pair tried primary then alternate.
pub const CHARGE_WEAVES: [[Ability; 2]; 2] = [
    [Ability::GaussRound, Ability::DoubleCheck],
    [Ability::Ricochet, Ability::Checkmate],
];

/// Why Hypercharge was judged worth spending heat on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SpendReason {
    /// Heat is capped; any further gain is wasted.
    Overcap,
    /// Wildfire is ready or coming off cooldown soon.
    FinisherAligned,
    /// Heat is close enough to cap to spend anyway.
    NearMax,
    /// Heat covers the cost and Wildfire is not imminent.
    Surplus,
}

/// Decides whether Hypercharge should fire given current heat and Wildfire
/// timing. `None` means hold.
pub fn spend_reason(
    heat: u8,
    finisher_ready: bool,
    since_finisher: Duration,
    config: &crate::RotationConfig,
) -> Option<SpendReason> {
    let cost = heat_cost(Ability::Hypercharge);
    if heat >= config.overcap_threshold {
        return Some(SpendReason::Overcap);
    }

    let imminent_from = config
        .finisher_cooldown
        .saturating_sub(config.finisher_lookahead);
    let finisher_imminent =
        since_finisher >= imminent_from && since_finisher < config.finisher_cooldown;

    if (finisher_ready || finisher_imminent) && heat >= cost {
        return Some(SpendReason::FinisherAligned);
    }
    if finisher_imminent {
        return None;
    }
    if heat >= config.near_max_threshold {
        Some(SpendReason::NearMax)
    } else if heat >= cost {
        Some(SpendReason::Surplus)
    } else {
        None
    }
}

/// The steady-state decision procedure.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationPolicy;

impl RotationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Runs the cascade; returns the ability executed this tick, if any.
    pub(crate) fn evaluate(&self, ctx: &mut TickContext<'_, '_>) -> Option<Ability> {
        ctx.session.status = RotationStatus::SteadyState {
            heat: ctx.gauges.heat(),
        };

        if ctx.session.burst.expire(ctx.now, ctx.config.burst_window) {
            tracing::debug!("burst window expired with uses left");
        }

        let since_slow = ctx.session.timers.since_slow(ctx.now);
        let since_any = ctx.session.timers.since_any(ctx.now);

        let weave_open = since_slow >= ctx.config.slow_lockout
            && since_slow < ctx.config.weave_window_end
            && since_any >= ctx.config.fast_lockout;
        if weave_open {
            if let Some(ability) = self.weave(ctx) {
                return Some(ability);
            }
        }

        if since_slow < ctx.config.slow_lockout {
            return None;
        }

        if ctx.session.burst.has_uses() && ctx.is_enabled(Ability::HeatBlast) {
            if ctx.attempt(Ability::HeatBlast) {
                ctx.session.burst.consume();
                tracing::debug!(remaining = ctx.session.burst.remaining, "burst use spent");
                return Some(Ability::HeatBlast);
            }
        }

        if let Some(ability) = self.tools(ctx) {
            return Some(ability);
        }

        self.combo(ctx)
    }

    fn weave(&self, ctx: &mut TickContext<'_, '_>) -> Option<Ability> {
        if ctx.attempt(Ability::BarrelStabilizer) {
            return Some(Ability::BarrelStabilizer);
        }

        if !ctx.session.burst.active && ctx.is_ready(Ability::Hypercharge) {
            let reason = spend_reason(
                ctx.gauges.heat(),
                ctx.is_ready(Ability::Wildfire),
                elapsed_since(ctx.now, ctx.session.last_finisher_at),
                ctx.config,
            );
            if let Some(reason) = reason {
                tracing::debug!(%reason, heat = ctx.gauges.heat(), "spending heat on Hypercharge");
                if ctx.attempt(Ability::Hypercharge) {
                    ctx.session.burst.open(ctx.config.burst_uses, ctx.now);
                    return Some(Ability::Hypercharge);
                }
            }
        }

        if ctx.session.burst.active && ctx.attempt(Ability::Wildfire) {
            return Some(Ability::Wildfire);
        }

        CHARGE_WEAVES
            .iter()
            .flatten()
            .copied()
            .find(|ability| ctx.attempt(*ability))
    }

    fn tools(&self, ctx: &mut TickContext<'_, '_>) -> Option<Ability> {
        let mut reassemble = ctx.is_ready(Ability::Reassemble);

        for &(tool, wants_reassemble) in TOOL_PRIORITY {
            if !ctx.is_ready(tool) {
                continue;
            }
            // Only the first available tool is considered for Reassemble.
            if std::mem::take(&mut reassemble)
                && wants_reassemble
                && ctx.attempt(Ability::Reassemble)
            {
                ctx.companion = Some(Ability::Reassemble);
            }
            if ctx.attempt(tool) {
                return Some(tool);
            }
        }
        None
    }

    fn combo(&self, ctx: &mut TickContext<'_, '_>) -> Option<Ability> {
        let cursor = ctx.session.combo_step as usize;
        let step = COMBO_CHAIN.get(cursor).copied().unwrap_or(COMBO_CHAIN[0]);
        ctx.session.set_next_action(step.label());

        if ctx.attempt(step) {
            return Some(step);
        }

        if cursor != 0 {
            tracing::debug!(from = cursor, "combo broken, restarting chain");
            ctx.session.combo_step = 0;
            if ctx.attempt(COMBO_CHAIN[0]) {
                return Some(COMBO_CHAIN[0]);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RotationConfig;

    const LONG_AGO: Duration = Duration::MAX;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn capped_heat_always_spends() {
        let config = RotationConfig::default();
        assert_eq!(
            spend_reason(100, false, secs(110), &config),
            Some(SpendReason::Overcap)
        );
    }

    #[test]
    fn ready_or_imminent_finisher_pulls_spend_forward() {
        let config = RotationConfig::default();
        assert_eq!(
            spend_reason(50, true, LONG_AGO, &config),
            Some(SpendReason::FinisherAligned)
        );
        assert_eq!(
            spend_reason(60, false, secs(110), &config),
            Some(SpendReason::FinisherAligned)
        );
        // The look-ahead starts at cooldown minus look-ahead, inclusive.
        assert_eq!(
            spend_reason(50, false, secs(105), &config),
            Some(SpendReason::FinisherAligned)
        );
    }

    #[test]
    fn holds_when_short_of_cost() {
        let config = RotationConfig::default();
        assert_eq!(spend_reason(45, true, LONG_AGO, &config), None);
        assert_eq!(spend_reason(45, false, secs(110), &config), None);
        assert_eq!(spend_reason(0, false, LONG_AGO, &config), None);
    }

    #[test]
    fn surplus_spends_when_finisher_is_far() {
        let config = RotationConfig::default();
        assert_eq!(
            spend_reason(55, false, secs(30), &config),
            Some(SpendReason::Surplus)
        );
        assert_eq!(
            spend_reason(95, false, LONG_AGO, &config),
            Some(SpendReason::NearMax)
        );
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = RotationConfig {
            overcap_threshold: 80,
            ..RotationConfig::default()
        };
        assert_eq!(
            spend_reason(80, false, secs(110), &config),
            Some(SpendReason::Overcap)
        );
    }
}
