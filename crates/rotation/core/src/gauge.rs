//! Simulated job gauges.
//!
//! The host does not expose its gauges, so the engine keeps its own model:
//! two bounded counters moved only by the abilities it executed itself. This
//! is an approximation. Anything the engine did not execute (a manual press,
//! a death, a zone change) leaves the model stale until the host calls
//! [`ResourceTracker::reconcile`] with ground truth or [`ResourceTracker::reset`].

use crate::ability::Ability;

/// The two tracked gauges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GaugeKind {
    /// Spent by Hypercharge.
    Heat,
    /// Built by tools and the combo finisher.
    Battery,
}

/// Bounded integer counter clamped to `[0, Gauge::MAX]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gauge(u8);

impl Gauge {
    pub const MAX: u8 = 100;

    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_full(self) -> bool {
        self.0 >= Self::MAX
    }

    /// Adds a signed delta and clamps the result into range.
    pub fn shift(&mut self, delta: i16) {
        let next = (self.0 as i16 + delta).clamp(0, Self::MAX as i16);
        self.0 = next as u8;
    }
}

/// Signed gauge deltas produced by one execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GaugeEffect {
    pub heat: i16,
    pub battery: i16,
}

impl GaugeEffect {
    pub const NONE: Self = Self::new(0, 0);

    pub const fn new(heat: i16, battery: i16) -> Self {
        Self { heat, battery }
    }

    pub const fn is_none(self) -> bool {
        self.heat == 0 && self.battery == 0
    }
}

/// Static effect table: every ability with a non-zero gauge effect.
pub const EFFECT_TABLE: &[(Ability, GaugeEffect)] = &[
    (Ability::HeatedSplitShot, GaugeEffect::new(5, 0)),
    (Ability::HeatedSlugShot, GaugeEffect::new(5, 0)),
    (Ability::HeatedCleanShot, GaugeEffect::new(5, 10)),
    (Ability::BarrelStabilizer, GaugeEffect::new(50, 0)),
    (Ability::Hypercharge, GaugeEffect::new(-50, 0)),
    (Ability::AirAnchor, GaugeEffect::new(0, 20)),
    (Ability::ChainSaw, GaugeEffect::new(0, 20)),
];

/// Gauge effect of `ability`; abilities missing from the table do nothing.
pub fn effect_of(ability: Ability) -> GaugeEffect {
    EFFECT_TABLE
        .iter()
        .find(|(entry, _)| *entry == ability)
        .map_or(GaugeEffect::NONE, |(_, effect)| *effect)
}

/// Heat an ability consumes (zero for builders and neutral abilities).
pub fn heat_cost(ability: Ability) -> u8 {
    let heat = effect_of(ability).heat;
    if heat < 0 { heat.unsigned_abs() as u8 } else { 0 }
}

/// Errors raised while reconciling the model with host-reported values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GaugeError {
    #[error("{kind} value {value} exceeds gauge maximum {max}", max = Gauge::MAX)]
    OutOfRange { kind: GaugeKind, value: u8 },
}

/// Best-effort model of the two job gauges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceTracker {
    heat: Gauge,
    battery: Gauge,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heat(&self) -> u8 {
        self.heat.value()
    }

    pub fn battery(&self) -> u8 {
        self.battery.value()
    }

    pub fn gauge(&self, kind: GaugeKind) -> Gauge {
        match kind {
            GaugeKind::Heat => self.heat,
            GaugeKind::Battery => self.battery,
        }
    }

    /// Applies the static effect of one successful execution of `ability`.
    pub fn apply(&mut self, ability: Ability) {
        let effect = effect_of(ability);
        if effect.is_none() {
            return;
        }
        self.heat.shift(effect.heat);
        self.battery.shift(effect.battery);
    }

    /// Replaces the model with values reported by the host.
    ///
    /// Both values are validated before either gauge changes.
    pub fn reconcile(&mut self, heat: u8, battery: u8) -> Result<(), GaugeError> {
        for (kind, value) in [(GaugeKind::Heat, heat), (GaugeKind::Battery, battery)] {
            if value > Gauge::MAX {
                return Err(GaugeError::OutOfRange { kind, value });
            }
        }
        self.heat = Gauge(heat);
        self.battery = Gauge(battery);
        tracing::debug!(heat, battery, "gauges reconciled with host");
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn combo_finisher_builds_both_gauges() {
        let mut tracker = ResourceTracker::new();
        tracker.apply(Ability::HeatedSplitShot);
        tracker.apply(Ability::HeatedSlugShot);
        tracker.apply(Ability::HeatedCleanShot);
        assert_eq!(tracker.heat(), 15);
        assert_eq!(tracker.battery(), 10);
    }

    #[test]
    fn gains_clamp_at_maximum() {
        let mut tracker = ResourceTracker::new();
        tracker.reconcile(80, 95).unwrap();
        tracker.apply(Ability::BarrelStabilizer);
        tracker.apply(Ability::AirAnchor);
        assert_eq!(tracker.heat(), 100);
        assert_eq!(tracker.battery(), 100);
    }

    #[test]
    fn spending_clamps_at_zero() {
        let mut tracker = ResourceTracker::new();
        tracker.reconcile(20, 0).unwrap();
        tracker.apply(Ability::Hypercharge);
        assert_eq!(tracker.heat(), 0);
    }

    #[test]
    fn neutral_abilities_leave_gauges_alone() {
        let mut tracker = ResourceTracker::new();
        tracker.reconcile(40, 40).unwrap();
        for ability in [Ability::Drill, Ability::Wildfire, Ability::HeatBlast, Ability::Reassemble] {
            tracker.apply(ability);
        }
        assert_eq!((tracker.heat(), tracker.battery()), (40, 40));
    }

    #[test]
    fn every_ability_keeps_gauges_in_range() {
        let mut tracker = ResourceTracker::new();
        for _ in 0..30 {
            for ability in Ability::iter() {
                tracker.apply(ability);
                assert!(tracker.heat() <= Gauge::MAX);
                assert!(tracker.battery() <= Gauge::MAX);
            }
        }
    }

    #[test]
    fn reconcile_rejects_out_of_range_values() {
        let mut tracker = ResourceTracker::new();
        tracker.reconcile(30, 30).unwrap();

        let err = tracker.reconcile(30, 120).unwrap_err();
        assert_eq!(
            err,
            GaugeError::OutOfRange {
                kind: GaugeKind::Battery,
                value: 120
            }
        );
        // Rejected input leaves the model untouched.
        assert_eq!((tracker.heat(), tracker.battery()), (30, 30));

        tracker.reset();
        assert_eq!((tracker.heat(), tracker.battery()), (0, 0));
    }

    #[test]
    fn hypercharge_cost_comes_from_table() {
        assert_eq!(heat_cost(Ability::Hypercharge), 50);
        assert_eq!(heat_cost(Ability::BarrelStabilizer), 0);
        assert_eq!(heat_cost(Ability::Drill), 0);
    }
}
