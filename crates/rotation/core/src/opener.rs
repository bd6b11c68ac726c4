//! The scripted opening sequence.

use crate::ability::{Ability, Lane};

/// One step of the opener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenerStep {
    pub ability: Ability,
    pub lane: Lane,
    /// Label shown while this step is pending (e.g. "Heat Blast 3").
    pub label: &'static str,
}

impl OpenerStep {
    const fn slow(ability: Ability, label: &'static str) -> Self {
        Self {
            ability,
            lane: Lane::Slow,
            label,
        }
    }

    const fn fast(ability: Ability, label: &'static str) -> Self {
        Self {
            ability,
            lane: Lane::Fast,
            label,
        }
    }
}

/// Level 100 standard opener: tools first, Barrel Stabilizer aligned before
/// the combo, then a single Hypercharge window with Wildfire woven after the
/// first Heat Blast.
pub const STANDARD_OPENER: &[OpenerStep] = &[
    OpenerStep::fast(Ability::Reassemble, "Reassemble"),
    OpenerStep::slow(Ability::AirAnchor, "Air Anchor"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::slow(Ability::Drill, "Drill"),
    OpenerStep::fast(Ability::BarrelStabilizer, "Barrel Stabilizer"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::slow(Ability::HeatedSplitShot, "Heated Split Shot"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::slow(Ability::HeatedSlugShot, "Heated Slug Shot"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::slow(Ability::HeatedCleanShot, "Heated Clean Shot"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::fast(Ability::Reassemble, "Reassemble"),
    OpenerStep::slow(Ability::ChainSaw, "Chain Saw"),
    OpenerStep::slow(Ability::Excavator, "Excavator"),
    OpenerStep::slow(Ability::FullMetalField, "Full Metal Field"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::fast(Ability::Hypercharge, "Hypercharge"),
    OpenerStep::slow(Ability::HeatBlast, "Heat Blast 1"),
    OpenerStep::fast(Ability::Wildfire, "Wildfire"),
    OpenerStep::slow(Ability::HeatBlast, "Heat Blast 2"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::slow(Ability::HeatBlast, "Heat Blast 3"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::slow(Ability::HeatBlast, "Heat Blast 4"),
    OpenerStep::fast(Ability::GaussRound, "Gauss Round"),
    OpenerStep::slow(Ability::HeatBlast, "Heat Blast 5"),
    OpenerStep::fast(Ability::Ricochet, "Ricochet"),
    OpenerStep::slow(Ability::Drill, "Drill"),
];

/// Immutable opener plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenerPlan {
    steps: &'static [OpenerStep],
}

impl OpenerPlan {
    pub const fn new(steps: &'static [OpenerStep]) -> Self {
        Self { steps }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_OPENER)
    }

    pub fn step(&self, cursor: usize) -> Option<&OpenerStep> {
        self.steps.get(cursor)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_exhausted(&self, cursor: usize) -> bool {
        cursor >= self.steps.len()
    }

    pub fn steps(&self) -> &'static [OpenerStep] {
        self.steps
    }
}

impl Default for OpenerPlan {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_lanes_match_ability_lanes() {
        for step in STANDARD_OPENER {
            assert_eq!(step.lane, step.ability.lane(), "{}", step.label);
        }
    }

    #[test]
    fn standard_plan_shape() {
        let plan = OpenerPlan::standard();
        assert_eq!(plan.len(), 31);
        assert_eq!(plan.step(0).map(|s| s.ability), Some(Ability::Reassemble));
        assert_eq!(plan.step(30).map(|s| s.ability), Some(Ability::Drill));
        assert!(plan.is_exhausted(31));
        assert!(!plan.is_exhausted(30));
        assert_eq!(plan.step(31), None);
    }

    #[test]
    fn heat_blasts_follow_hypercharge() {
        let hypercharge = STANDARD_OPENER
            .iter()
            .position(|s| s.ability == Ability::Hypercharge)
            .unwrap();
        let blasts = STANDARD_OPENER
            .iter()
            .enumerate()
            .filter(|(_, s)| s.ability == Ability::HeatBlast)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(blasts.len(), 5);
        assert!(blasts.iter().all(|i| *i > hypercharge));
    }
}
