//! Ability identity and static reference data.
//!
//! Every ability the engine knows about is a variant of [`Ability`]. The
//! discriminant is the host's numeric action id, so converting in either
//! direction is a table lookup rather than a branch in decision code.
//!
//! Gauge effects live in [`crate::gauge`]; configuration categories live in
//! [`crate::config`]. Both are keyed by [`Ability`].

use std::fmt;

use strum::IntoEnumIterator;

use crate::config::Category;

/// Host-facing numeric identifier of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Timing lane an ability occupies.
///
/// Slow actions share the primary lane and trigger its lockout. Fast actions
/// are woven between slow ones and only respect the short any-action lockout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Lane {
    Slow,
    Fast,
}

impl Lane {
    #[inline]
    pub const fn is_slow(self) -> bool {
        matches!(self, Lane::Slow)
    }
}

/// Every ability the engine can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Ability {
    // Basic combo
    HeatedSplitShot = 7411,
    HeatedSlugShot = 7412,
    HeatedCleanShot = 7413,

    // Tools
    Drill = 16498,
    AirAnchor = 16500,
    ChainSaw = 25788,
    Excavator = 36981,
    FullMetalField = 36982,

    // Charge weaves
    GaussRound = 2874,
    Ricochet = 2890,
    DoubleCheck = 36979,
    Checkmate = 36980,

    // Heat window
    Hypercharge = 17209,
    HeatBlast = 7410,
    BlazingShot = 36978,
    Wildfire = 2878,
    Reassemble = 2876,
    BarrelStabilizer = 7414,
}

/// The cyclic three-step basic combo, in order.
pub const COMBO_CHAIN: [Ability; 3] = [
    Ability::HeatedSplitShot,
    Ability::HeatedSlugShot,
    Ability::HeatedCleanShot,
];

impl Ability {
    #[inline]
    pub const fn id(self) -> AbilityId {
        AbilityId(self as u32)
    }

    /// Resolves a host id back to a known ability.
    pub fn from_id(id: AbilityId) -> Option<Self> {
        Self::iter().find(|ability| ability.id() == id)
    }

    pub const fn lane(self) -> Lane {
        match self {
            Ability::HeatedSplitShot
            | Ability::HeatedSlugShot
            | Ability::HeatedCleanShot
            | Ability::Drill
            | Ability::AirAnchor
            | Ability::ChainSaw
            | Ability::Excavator
            | Ability::FullMetalField
            | Ability::HeatBlast
            | Ability::BlazingShot => Lane::Slow,
            Ability::GaussRound
            | Ability::Ricochet
            | Ability::DoubleCheck
            | Ability::Checkmate
            | Ability::Hypercharge
            | Ability::Wildfire
            | Ability::Reassemble
            | Ability::BarrelStabilizer => Lane::Fast,
        }
    }

    /// Configuration category gating this ability, or `None` when the ability
    /// is part of the always-on basic combo.
    pub const fn category(self) -> Option<Category> {
        match self {
            Ability::Drill => Some(Category::Drill),
            Ability::AirAnchor => Some(Category::AirAnchor),
            Ability::ChainSaw => Some(Category::ChainSaw),
            Ability::Excavator => Some(Category::Excavator),
            Ability::FullMetalField => Some(Category::FullMetalField),
            Ability::Reassemble => Some(Category::Reassemble),
            Ability::BarrelStabilizer => Some(Category::BarrelStabilizer),
            Ability::Hypercharge => Some(Category::Hypercharge),
            Ability::Wildfire => Some(Category::Wildfire),
            Ability::GaussRound | Ability::DoubleCheck => Some(Category::GaussRound),
            Ability::Ricochet | Ability::Checkmate => Some(Category::Ricochet),
            Ability::HeatBlast | Ability::BlazingShot => Some(Category::HeatBlast),
            Ability::HeatedSplitShot | Ability::HeatedSlugShot | Ability::HeatedCleanShot => None,
        }
    }

    /// Human-readable label shown in status text and history.
    pub const fn label(self) -> &'static str {
        match self {
            Ability::HeatedSplitShot => "Heated Split Shot",
            Ability::HeatedSlugShot => "Heated Slug Shot",
            Ability::HeatedCleanShot => "Heated Clean Shot",
            Ability::Drill => "Drill",
            Ability::AirAnchor => "Air Anchor",
            Ability::ChainSaw => "Chain Saw",
            Ability::Excavator => "Excavator",
            Ability::FullMetalField => "Full Metal Field",
            Ability::GaussRound => "Gauss Round",
            Ability::Ricochet => "Ricochet",
            Ability::DoubleCheck => "Double Check",
            Ability::Checkmate => "Checkmate",
            Ability::Hypercharge => "Hypercharge",
            Ability::HeatBlast => "Heat Blast",
            Ability::BlazingShot => "Blazing Shot",
            Ability::Wildfire => "Wildfire",
            Ability::Reassemble => "Reassemble",
            Ability::BarrelStabilizer => "Barrel Stabilizer",
        }
    }

    /// Position of this ability in [`COMBO_CHAIN`], if it is a combo step.
    pub fn combo_position(self) -> Option<usize> {
        COMBO_CHAIN.iter().position(|step| *step == self)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Combo cursor after `ability` executes from cursor `current`.
///
/// Combo steps move the cursor to the following step (wrapping after the
/// last); anything else leaves it where it was.
pub fn next_combo_step(ability: Ability, current: u8) -> u8 {
    match ability.combo_position() {
        Some(position) => ((position + 1) % COMBO_CHAIN.len()) as u8,
        None => current,
    }
}
