//! Session lifecycle and the per-tick entry point.
//!
//! [`RotationEngine`] owns the session, the gauge model, and the opener. The
//! host calls [`RotationEngine::tick`] from its update loop; `&mut self`
//! guarantees ticks never overlap.

use crate::ability::Ability;
use crate::config::{RotationConfig, count_enabled};
use crate::context::TickContext;
use crate::env::{ConfigOracle, RotationEnv};
use crate::error::AttemptError;
use crate::gauge::ResourceTracker;
use crate::opener::OpenerPlan;
use crate::policy::RotationPolicy;
use crate::sequencer::{OpenerAdvance, Sequencer};
use crate::session::{ExecutionRecord, RotationSession, RotationStatus};

const WAITING_FOR_TARGET: &str = "Waiting for target...";

/// An action the engine executed during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Execution {
    pub ability: Ability,
    /// Companion weave fired immediately before `ability` (Reassemble).
    pub companion: Option<Ability>,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Disabled,
    NoTarget,
    TargetDead,
    /// Less than the minimum spacing since the previous execution.
    Throttled,
    /// The opener ran out of steps; steady state starts next tick.
    OpenerComplete,
    /// A configuration-disabled opener step was passed over.
    OpenerSkipped(Ability),
    /// The pending opener step could not run this tick.
    OpenerBlocked(AttemptError),
    /// Only a companion weave went out; its slow action failed.
    CompanionOnly(Ability),
    /// Nothing was executed.
    Idle,
    Executed(Execution),
}

impl TickOutcome {
    /// The primary ability executed this tick.
    pub fn executed(&self) -> Option<Ability> {
        match self {
            TickOutcome::Executed(execution) => Some(execution.ability),
            _ => None,
        }
    }
}

/// Read-only view of the engine for a host UI.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationSnapshot {
    pub enabled: bool,
    pub in_opener: bool,
    pub opener_step: usize,
    pub opener_len: usize,
    pub combo_step: u8,
    pub last_action: String,
    pub next_action: String,
    pub status: RotationStatus,
    pub heat: u8,
    pub battery: u8,
    pub burst_active: bool,
    pub burst_remaining: u8,
    pub preview: String,
    pub history: Vec<ExecutionRecord>,
}

/// The rotation engine.
#[derive(Clone, Debug, Default)]
pub struct RotationEngine {
    config: RotationConfig,
    session: RotationSession,
    gauges: ResourceTracker,
    sequencer: Sequencer,
    policy: RotationPolicy,
}

impl RotationEngine {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_opener_plan(mut self, plan: OpenerPlan) -> Self {
        self.sequencer = Sequencer::new(plan);
        self
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn session(&self) -> &RotationSession {
        &self.session
    }

    pub fn gauges(&self) -> &ResourceTracker {
        &self.gauges
    }

    /// Mutable access to the gauge model, for reconciling with host truth.
    pub fn gauges_mut(&mut self) -> &mut ResourceTracker {
        &mut self.gauges
    }

    pub fn opener_plan(&self) -> &OpenerPlan {
        self.sequencer.plan()
    }

    // ===== lifecycle =====

    /// Enables the rotation, entering the opener when configured to.
    pub fn start(&mut self) {
        self.session.enabled = true;
        if self.config.use_opener {
            self.start_opener();
        } else {
            self.session.status = RotationStatus::Running;
        }
        tracing::info!(opener = self.config.use_opener, "rotation started");
    }

    /// Restarts the opener from its first step.
    pub fn start_opener(&mut self) {
        self.session.in_opener = true;
        self.session.opener_step = 0;
        self.session.combo_step = 0;
        self.session.status = RotationStatus::OpenerActive;
        tracing::info!(steps = self.sequencer.plan().len(), "opener started");
    }

    /// Disables the rotation and resets all transient session state.
    ///
    /// The gauge model is kept: stopping the engine does not change the
    /// host's gauges.
    pub fn stop(&mut self) {
        self.session = RotationSession {
            status: RotationStatus::Stopped,
            ..RotationSession::default()
        };
        tracing::info!("rotation stopped");
    }

    /// Leaves the opener and clears combo and burst progress; the enabled
    /// flag is untouched.
    pub fn reset_opener(&mut self) {
        self.session.clear_progress();
        self.session.status = if self.session.enabled {
            RotationStatus::Running
        } else {
            RotationStatus::Idle
        };
        tracing::debug!("opener reset");
    }

    pub fn reset_combo(&mut self) {
        self.session.combo_step = 0;
    }

    /// Begins the rotation if it is not already running.
    pub fn on_primary_button_pressed(&mut self) {
        if !self.session.enabled {
            self.start();
            tracing::info!("rotation started from combo button");
        }
    }

    // ===== tick =====

    /// Evaluates one tick. Executes at most one primary action.
    pub fn tick(&mut self, env: &mut RotationEnv<'_>) -> TickOutcome {
        if !self.session.enabled {
            return TickOutcome::Disabled;
        }

        let target = match env.host.current_target() {
            None => {
                self.session.status = RotationStatus::NoTarget;
                self.session.set_next_action(WAITING_FOR_TARGET);
                return TickOutcome::NoTarget;
            }
            Some(target) if !target.is_alive => {
                self.session.status = RotationStatus::TargetDead;
                self.session.set_next_action(WAITING_FOR_TARGET);
                return TickOutcome::TargetDead;
            }
            Some(target) => target.id,
        };

        let now = env.clock.now();
        if self.session.timers.since_any(now) < self.config.min_spacing {
            return TickOutcome::Throttled;
        }

        let opener_len = self.sequencer.plan().len();
        let mut ctx = TickContext::new(
            env,
            &mut self.session,
            &mut self.gauges,
            &self.config,
            now,
            target,
        );

        if ctx.session.in_opener {
            if matches!(
                ctx.session.status,
                RotationStatus::NoTarget | RotationStatus::TargetDead
            ) {
                ctx.session.status = RotationStatus::OpenerProgress {
                    step: ctx.session.opener_step,
                    total: opener_len,
                };
            }
            return match self.sequencer.advance(&mut ctx) {
                OpenerAdvance::Complete => {
                    ctx.session.in_opener = false;
                    ctx.session.status = RotationStatus::OpenerComplete;
                    tracing::info!("opener completed, switching to rotation");
                    TickOutcome::OpenerComplete
                }
                OpenerAdvance::Skipped(ability) => TickOutcome::OpenerSkipped(ability),
                OpenerAdvance::Blocked(error) => TickOutcome::OpenerBlocked(error),
                OpenerAdvance::Executed(ability) => TickOutcome::Executed(Execution {
                    ability,
                    companion: None,
                }),
            };
        }

        match self.policy.evaluate(&mut ctx) {
            Some(ability) => TickOutcome::Executed(Execution {
                ability,
                companion: ctx.companion,
            }),
            None => match ctx.companion {
                Some(companion) => TickOutcome::CompanionOnly(companion),
                None => TickOutcome::Idle,
            },
        }
    }

    // ===== host-facing views =====

    /// Text describing what the engine intends to do next.
    pub fn next_action_preview(&self) -> String {
        if !self.session.enabled {
            return "Rotation disabled".to_string();
        }
        if self.session.in_opener {
            if let Some(step) = self.sequencer.plan().step(self.session.opener_step) {
                return format!("[Opener] {}", step.label);
            }
        }
        if self.session.next_action.is_empty() {
            "Basic combo".to_string()
        } else {
            self.session.next_action.clone()
        }
    }

    /// Number of optional categories `config` currently enables.
    pub fn count_enabled_abilities(&self, config: &dyn ConfigOracle) -> usize {
        count_enabled(config)
    }

    pub fn snapshot(&self) -> RotationSnapshot {
        RotationSnapshot {
            enabled: self.session.enabled,
            in_opener: self.session.in_opener,
            opener_step: self.session.opener_step,
            opener_len: self.sequencer.plan().len(),
            combo_step: self.session.combo_step,
            last_action: self.session.last_action.clone(),
            next_action: self.session.next_action.clone(),
            status: self.session.status,
            heat: self.gauges.heat(),
            battery: self.gauges.battery(),
            burst_active: self.session.burst.active,
            burst_remaining: self.session.burst.remaining,
            preview: self.next_action_preview(),
            history: self.session.history.iter().copied().collect(),
        }
    }
}
