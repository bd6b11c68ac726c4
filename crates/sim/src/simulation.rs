//! Fixed-cadence fight replay.

use std::fmt;

use rotation_core::{
    Ability, Clock, ManualClock, RotationEngine, RotationEnv, RotationStatus, Settings, TargetId,
    TickOutcome, Timestamp,
};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::host::SimHost;

/// Target every simulated fight is pulled against.
pub const SIM_TARGET: TargetId = TargetId(0x4000_0001);

/// Summary of one simulated fight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimReport {
    pub ticks: u64,
    /// Successful executions per ability, in order of first use.
    pub executions: Vec<(Ability, u32)>,
    pub opener_completed_at: Option<Timestamp>,
    pub idle_ticks: u64,
    pub throttled_ticks: u64,
    /// Ticks spent without a live target.
    pub waiting_ticks: u64,
    /// Executions the host refused.
    pub rejected: u32,
    pub heat: u8,
    pub battery: u8,
    pub status: RotationStatus,
}

impl SimReport {
    pub fn count(&self, ability: Ability) -> u32 {
        self.executions
            .iter()
            .find(|(used, _)| *used == ability)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> u32 {
        self.executions.iter().map(|(_, count)| count).sum()
    }

    fn record(&mut self, ability: Ability) {
        match self.executions.iter_mut().find(|(used, _)| *used == ability) {
            Some((_, count)) => *count += 1,
            None => self.executions.push((ability, 1)),
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:      {}", self.ticks)?;
        match self.opener_completed_at {
            Some(at) => writeln!(f, "opener:     complete at {at}")?,
            None => writeln!(f, "opener:     not completed")?,
        }
        writeln!(
            f,
            "idle:       {} (throttled {}, waiting {})",
            self.idle_ticks, self.throttled_ticks, self.waiting_ticks
        )?;
        writeln!(f, "rejected:   {}", self.rejected)?;
        writeln!(f, "gauges:     heat {} / battery {}", self.heat, self.battery)?;
        writeln!(f, "status:     {}", self.status)?;
        writeln!(f, "executions: {}", self.total())?;
        for (ability, count) in &self.executions {
            writeln!(f, "  {:<20} {count}", ability.label())?;
        }
        Ok(())
    }
}

/// Engine, host and clock wired together for one fight.
pub struct Simulation {
    config: SimConfig,
    engine: RotationEngine,
    host: SimHost,
    settings: Settings,
    clock: ManualClock,
    report: SimReport,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut host = SimHost::new(SIM_TARGET);
        if let Some(lifetime) = config.target_lifetime {
            host = host.with_target_death(Timestamp::ZERO.saturating_add(lifetime));
        }

        Ok(Self {
            engine: RotationEngine::new(config.rotation_config()),
            settings: config.settings(),
            host,
            clock: ManualClock::new(),
            report: SimReport::default(),
            config,
        })
    }

    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RotationEngine {
        &mut self.engine
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut SimHost {
        &mut self.host
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Ticks once at the current time, then advances the clock one interval.
    pub fn step(&mut self) -> TickOutcome {
        let now = self.clock.now();
        self.host.sync(now);

        let mut env = RotationEnv::new(&mut self.host, &self.settings, &self.clock);
        let outcome = self.engine.tick(&mut env);
        self.observe(now, outcome);

        self.clock.advance(self.config.tick);
        outcome
    }

    /// Presses the combo button and plays the whole fight.
    pub fn run(mut self) -> SimReport {
        self.engine.on_primary_button_pressed();

        let end = Timestamp::ZERO.saturating_add(self.config.duration);
        while self.clock.now() < end {
            self.step();
        }

        tracing::info!(
            ticks = self.report.ticks,
            executions = self.report.total(),
            "fight finished"
        );
        self.finish()
    }

    /// Report for everything stepped so far.
    pub fn finish(mut self) -> SimReport {
        self.report.rejected = self.host.rejected();
        self.report.heat = self.engine.gauges().heat();
        self.report.battery = self.engine.gauges().battery();
        self.report.status = self.engine.session().status;
        self.report
    }

    fn observe(&mut self, now: Timestamp, outcome: TickOutcome) {
        self.report.ticks += 1;
        match outcome {
            TickOutcome::Executed(execution) => {
                if let Some(companion) = execution.companion {
                    self.report.record(companion);
                }
                self.report.record(execution.ability);
            }
            TickOutcome::CompanionOnly(companion) => self.report.record(companion),
            TickOutcome::OpenerComplete => {
                self.report.opener_completed_at = Some(now);
                tracing::info!(at = %now, "opener finished");
            }
            TickOutcome::Throttled => self.report.throttled_ticks += 1,
            TickOutcome::NoTarget | TickOutcome::TargetDead => self.report.waiting_ticks += 1,
            TickOutcome::Disabled
            | TickOutcome::Idle
            | TickOutcome::OpenerSkipped(_)
            | TickOutcome::OpenerBlocked(_) => self.report.idle_ticks += 1,
        }
        tracing::debug!(
            at = %now,
            ?outcome,
            status = %self.engine.session().status,
            preview = %self.engine.next_action_preview(),
            "tick"
        );
    }
}
