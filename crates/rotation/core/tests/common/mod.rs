#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use rotation_core::{
    Ability, AbilityId, ActionHost, Clock, ManualClock, RotationConfig, RotationEngine, RotationEnv,
    Settings, TargetHandle, TargetId, TickOutcome, Timestamp,
};

pub const TARGET: TargetId = TargetId(0x4000_1234);

/// Host that accepts everything unless told otherwise and records every
/// accepted execution.
#[derive(Debug)]
pub struct ScriptedHost {
    pub target: Option<TargetHandle>,
    pub unusable: HashSet<Ability>,
    pub rejects: HashSet<Ability>,
    pub executed: Vec<Ability>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            target: Some(TargetHandle::alive(TARGET)),
            unusable: HashSet::new(),
            rejects: HashSet::new(),
            executed: Vec::new(),
        }
    }
}

impl ActionHost for ScriptedHost {
    fn is_usable(&self, ability: AbilityId) -> bool {
        Ability::from_id(ability).is_some_and(|ability| !self.unusable.contains(&ability))
    }

    fn execute(&mut self, ability: AbilityId, target: TargetId) -> bool {
        assert_eq!(target, TARGET, "executed against the wrong target");
        let Some(ability) = Ability::from_id(ability) else {
            return false;
        };
        if self.rejects.contains(&ability) {
            return false;
        }
        self.executed.push(ability);
        true
    }

    fn current_target(&self) -> Option<TargetHandle> {
        self.target
    }
}

pub struct Harness {
    pub engine: RotationEngine,
    pub host: ScriptedHost,
    pub settings: Settings,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            engine: RotationEngine::new(config),
            host: ScriptedHost::default(),
            settings: Settings::new(),
            clock: ManualClock::starting_at(Timestamp::from_millis(10_000)),
        }
    }

    /// Harness with the opener switched off.
    pub fn steady() -> Self {
        Self::new(RotationConfig::default().with_opener(false))
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tick(&mut self) -> TickOutcome {
        let mut env = RotationEnv::new(&mut self.host, &self.settings, &self.clock);
        self.engine.tick(&mut env)
    }

    /// Advances the clock by `millis` and ticks.
    pub fn step(&mut self, millis: u64) -> TickOutcome {
        self.clock.advance(Duration::from_millis(millis));
        self.tick()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn executed_count(&self) -> usize {
        self.host.executed.len()
    }
}
