//! Simulated game client.
//!
//! [`SimHost`] answers the engine's usability queries from a small cooldown
//! model: per-ability recasts with charges, a shared global cooldown for slow
//! actions, the Overheated window that gates Heat Blast, and the two
//! follow-up tools unlocked by Chain Saw and Barrel Stabilizer.

use std::collections::HashMap;
use std::time::Duration;

use rotation_core::{Ability, AbilityId, ActionHost, TargetHandle, TargetId, Timestamp};

/// Recast of the shared global cooldown.
pub const GLOBAL_COOLDOWN: Duration = Duration::from_millis(2_500);
/// Heat Blast runs on a shortened global cooldown.
pub const HEAT_COOLDOWN: Duration = Duration::from_millis(1_500);
/// How long Hypercharge keeps Heat Blast available.
pub const OVERHEAT_DURATION: Duration = Duration::from_secs(8);
/// Recast Heat Blast takes off the charge weaves.
pub const HEAT_BLAST_REFUND: Duration = Duration::from_secs(15);

/// Recast data for one cooldown group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recast {
    pub charges: u8,
    pub recast: Duration,
}

impl Recast {
    const fn single(secs: u64) -> Self {
        Self {
            charges: 1,
            recast: Duration::from_secs(secs),
        }
    }

    const fn charged(charges: u8, secs: u64) -> Self {
        Self {
            charges,
            recast: Duration::from_secs(secs),
        }
    }
}

/// Recast table, keyed by the ability that owns the cooldown group.
pub const RECASTS: &[(Ability, Recast)] = &[
    (Ability::Reassemble, Recast::charged(2, 55)),
    (Ability::Drill, Recast::single(20)),
    (Ability::AirAnchor, Recast::single(40)),
    (Ability::ChainSaw, Recast::single(60)),
    (Ability::BarrelStabilizer, Recast::single(120)),
    (Ability::Wildfire, Recast::single(120)),
    (Ability::Hypercharge, Recast::single(10)),
    (Ability::GaussRound, Recast::charged(3, 30)),
    (Ability::Ricochet, Recast::charged(3, 30)),
];

/// Upgraded abilities share their base ability's cooldown.
fn cooldown_group(ability: Ability) -> Ability {
    match ability {
        Ability::DoubleCheck => Ability::GaussRound,
        Ability::Checkmate => Ability::Ricochet,
        Ability::BlazingShot => Ability::HeatBlast,
        other => other,
    }
}

#[derive(Clone, Copy, Debug)]
struct Cooldown {
    recast: Recast,
    charges: u8,
    next_charge_at: Option<Timestamp>,
}

impl Cooldown {
    fn new(recast: Recast) -> Self {
        Self {
            recast,
            charges: recast.charges,
            next_charge_at: None,
        }
    }

    fn refresh(&mut self, now: Timestamp) {
        while let Some(at) = self.next_charge_at {
            if at > now {
                break;
            }
            self.charges += 1;
            self.next_charge_at = (self.charges < self.recast.charges)
                .then(|| at.saturating_add(self.recast.recast));
        }
    }

    fn refund(&mut self, by: Duration, now: Timestamp) {
        if let Some(at) = self.next_charge_at {
            let millis = at.as_millis().saturating_sub(by.as_millis() as u64);
            self.next_charge_at = Some(Timestamp::from_millis(millis));
            self.refresh(now);
        }
    }

    fn spend(&mut self, now: Timestamp) {
        self.charges = self.charges.saturating_sub(1);
        if self.next_charge_at.is_none() {
            self.next_charge_at = Some(now.saturating_add(self.recast.recast));
        }
    }
}

/// Cooldown-tracking host with a single target.
#[derive(Clone, Debug)]
pub struct SimHost {
    now: Timestamp,
    cooldowns: HashMap<Ability, Cooldown>,
    gcd_ready_at: Timestamp,
    overheated_until: Option<Timestamp>,
    excavator_ready: bool,
    full_metal_field_ready: bool,
    target: Option<TargetHandle>,
    target_dies_at: Option<Timestamp>,
    rejected: u32,
}

impl SimHost {
    pub fn new(target: TargetId) -> Self {
        Self {
            now: Timestamp::ZERO,
            cooldowns: RECASTS
                .iter()
                .map(|(ability, recast)| (*ability, Cooldown::new(*recast)))
                .collect(),
            gcd_ready_at: Timestamp::ZERO,
            overheated_until: None,
            excavator_ready: false,
            full_metal_field_ready: false,
            target: Some(TargetHandle::alive(target)),
            target_dies_at: None,
            rejected: 0,
        }
    }

    /// Kills the target once the host clock reaches `at`.
    pub fn with_target_death(mut self, at: Timestamp) -> Self {
        self.target_dies_at = Some(at);
        self
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn set_target(&mut self, target: TargetHandle) {
        self.target = Some(target);
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Executions refused because the ability was not usable.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Moves the host clock forward and recovers charges.
    pub fn sync(&mut self, now: Timestamp) {
        self.now = now;
        for cooldown in self.cooldowns.values_mut() {
            cooldown.refresh(now);
        }
        if self.overheated_until.is_some_and(|until| until <= now) {
            self.overheated_until = None;
            tracing::debug!(at = %now, "overheat ended");
        }
        if let (Some(target), Some(at)) = (self.target.as_mut(), self.target_dies_at) {
            if target.is_alive && at <= now {
                target.is_alive = false;
                tracing::info!(at = %now, target = %target.id, "target died");
            }
        }
    }

    pub fn is_overheated(&self) -> bool {
        self.overheated_until.is_some()
    }

    /// Charges currently available for `ability`'s cooldown group.
    pub fn charges(&self, ability: Ability) -> Option<u8> {
        self.cooldowns
            .get(&cooldown_group(ability))
            .map(|cooldown| cooldown.charges)
    }

    fn usable(&self, ability: Ability) -> bool {
        if ability.lane().is_slow() && self.now < self.gcd_ready_at {
            return false;
        }
        let gated = match ability {
            Ability::HeatBlast | Ability::BlazingShot => self.is_overheated(),
            Ability::Hypercharge => !self.is_overheated(),
            Ability::Excavator => self.excavator_ready,
            Ability::FullMetalField => self.full_metal_field_ready,
            _ => true,
        };
        gated
            && self
                .cooldowns
                .get(&cooldown_group(ability))
                .is_none_or(|cooldown| cooldown.charges > 0)
    }

    fn apply(&mut self, ability: Ability) {
        if ability.lane().is_slow() {
            let gcd = match ability {
                Ability::HeatBlast | Ability::BlazingShot => HEAT_COOLDOWN,
                _ => GLOBAL_COOLDOWN,
            };
            self.gcd_ready_at = self.now.saturating_add(gcd);
        }
        if let Some(cooldown) = self.cooldowns.get_mut(&cooldown_group(ability)) {
            cooldown.spend(self.now);
        }
        match ability {
            Ability::Hypercharge => {
                self.overheated_until = Some(self.now.saturating_add(OVERHEAT_DURATION));
            }
            Ability::HeatBlast | Ability::BlazingShot => {
                for group in [Ability::GaussRound, Ability::Ricochet] {
                    if let Some(cooldown) = self.cooldowns.get_mut(&group) {
                        cooldown.refund(HEAT_BLAST_REFUND, self.now);
                    }
                }
            }
            Ability::ChainSaw => self.excavator_ready = true,
            Ability::BarrelStabilizer => self.full_metal_field_ready = true,
            Ability::Excavator => self.excavator_ready = false,
            Ability::FullMetalField => self.full_metal_field_ready = false,
            _ => {}
        }
    }
}

impl ActionHost for SimHost {
    fn is_usable(&self, ability: AbilityId) -> bool {
        Ability::from_id(ability).is_some_and(|ability| self.usable(ability))
    }

    fn execute(&mut self, ability: AbilityId, target: TargetId) -> bool {
        let Some(ability) = Ability::from_id(ability) else {
            tracing::warn!(%ability, "unknown ability id");
            return false;
        };
        let valid_target = self
            .target
            .is_some_and(|handle| handle.id == target && handle.is_alive);
        if !valid_target || !self.usable(ability) {
            self.rejected += 1;
            tracing::debug!(%ability, %target, "execution rejected");
            return false;
        }
        self.apply(ability);
        tracing::trace!(%ability, at = %self.now, "host executed ability");
        true
    }

    fn current_target(&self) -> Option<TargetHandle> {
        self.target
    }
}
