//! Rotation configuration: tuning constants and per-category toggles.
//!
//! [`RotationConfig`] holds the timing and gauge thresholds the engine decides
//! against. [`Settings`] is the flat set of named booleans a host supplies,
//! one per optional [`Category`]; it implements [`ConfigOracle`] so it can be
//! handed straight to a [`crate::RotationEnv`].

use std::time::Duration;

use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::env::ConfigOracle;

/// Optional ability categories a host can switch on or off.
///
/// The basic combo is not a category: it is always enabled.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    Drill,
    AirAnchor,
    ChainSaw,
    Excavator,
    FullMetalField,
    Reassemble,
    BarrelStabilizer,
    Hypercharge,
    HeatBlast,
    Wildfire,
    GaussRound,
    Ricochet,
}

impl Category {
    /// Bit used for this category inside a [`CategorySet`].
    pub const fn flag(self) -> CategorySet {
        match self {
            Category::Drill => CategorySet::DRILL,
            Category::AirAnchor => CategorySet::AIR_ANCHOR,
            Category::ChainSaw => CategorySet::CHAIN_SAW,
            Category::Excavator => CategorySet::EXCAVATOR,
            Category::FullMetalField => CategorySet::FULL_METAL_FIELD,
            Category::Reassemble => CategorySet::REASSEMBLE,
            Category::BarrelStabilizer => CategorySet::BARREL_STABILIZER,
            Category::Hypercharge => CategorySet::HYPERCHARGE,
            Category::HeatBlast => CategorySet::HEAT_BLAST,
            Category::Wildfire => CategorySet::WILDFIRE,
            Category::GaussRound => CategorySet::GAUSS_ROUND,
            Category::Ricochet => CategorySet::RICOCHET,
        }
    }
}

bitflags! {
    /// Set of enabled [`Category`] values.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CategorySet: u16 {
        const DRILL             = 1 << 0;
        const AIR_ANCHOR        = 1 << 1;
        const CHAIN_SAW         = 1 << 2;
        const EXCAVATOR         = 1 << 3;
        const FULL_METAL_FIELD  = 1 << 4;
        const REASSEMBLE        = 1 << 5;
        const BARREL_STABILIZER = 1 << 6;
        const HYPERCHARGE       = 1 << 7;
        const HEAT_BLAST        = 1 << 8;
        const WILDFIRE          = 1 << 9;
        const GAUSS_ROUND       = 1 << 10;
        const RICOCHET          = 1 << 11;
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::all()
    }
}

/// Host-supplied ability toggles.
///
/// Every category starts enabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    enabled: CategorySet,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with every optional category switched off (basic combo only).
    pub fn none() -> Self {
        Self {
            enabled: CategorySet::empty(),
        }
    }

    pub fn with(mut self, category: Category, enabled: bool) -> Self {
        self.set(category, enabled);
        self
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        self.enabled.set(category.flag(), enabled);
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled.contains(category.flag())
    }

    pub fn enabled(&self) -> CategorySet {
        self.enabled
    }
}

impl ConfigOracle for Settings {
    fn category_enabled(&self, category: Category) -> bool {
        self.is_enabled(category)
    }
}

/// Counts how many optional categories `config` currently enables.
pub fn count_enabled(config: &dyn ConfigOracle) -> usize {
    Category::iter()
        .filter(|category| config.category_enabled(*category))
        .count()
}

/// Timing and gauge thresholds the engine decides against.
///
/// The defaults encode game-specific tuning carried over as-is; every value
/// can be overridden without touching control flow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationConfig {
    /// Whether `start` enters the scripted opener.
    pub use_opener: bool,
    /// Minimum time since the last slow action before another slow action.
    pub slow_lockout: Duration,
    /// Minimum time since any action before a fast action.
    pub fast_lockout: Duration,
    /// Minimum time since any action before a tick evaluates at all.
    pub min_spacing: Duration,
    /// Weaving is allowed while time since the last slow action is below this.
    pub weave_window_end: Duration,
    /// Heat at which Hypercharge is forced to avoid wasting gains.
    pub overcap_threshold: u8,
    /// Heat treated as close enough to cap to spend regardless.
    pub near_max_threshold: u8,
    /// Recast of the reserved finisher (Wildfire).
    pub finisher_cooldown: Duration,
    /// How far ahead of its recast the finisher counts as imminent.
    pub finisher_lookahead: Duration,
    /// Heat Blast uses granted per Hypercharge.
    pub burst_uses: u8,
    /// A burst window older than this is closed even with uses left.
    pub burst_window: Duration,
}

impl RotationConfig {
    pub const SLOW_LOCKOUT: Duration = Duration::from_millis(600);
    pub const FAST_LOCKOUT: Duration = Duration::from_millis(600);
    pub const MIN_SPACING: Duration = Duration::from_millis(100);
    pub const WEAVE_WINDOW_END: Duration = Duration::from_millis(2000);
    pub const OVERCAP_THRESHOLD: u8 = 100;
    pub const NEAR_MAX_THRESHOLD: u8 = 95;
    pub const FINISHER_COOLDOWN: Duration = Duration::from_secs(120);
    pub const FINISHER_LOOKAHEAD: Duration = Duration::from_secs(15);
    pub const BURST_USES: u8 = 5;
    pub const BURST_WINDOW: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self {
            use_opener: true,
            slow_lockout: Self::SLOW_LOCKOUT,
            fast_lockout: Self::FAST_LOCKOUT,
            min_spacing: Self::MIN_SPACING,
            weave_window_end: Self::WEAVE_WINDOW_END,
            overcap_threshold: Self::OVERCAP_THRESHOLD,
            near_max_threshold: Self::NEAR_MAX_THRESHOLD,
            finisher_cooldown: Self::FINISHER_COOLDOWN,
            finisher_lookahead: Self::FINISHER_LOOKAHEAD,
            burst_uses: Self::BURST_USES,
            burst_window: Self::BURST_WINDOW,
        }
    }

    pub fn with_opener(mut self, use_opener: bool) -> Self {
        self.use_opener = use_opener;
        self
    }

    /// Lockout that applies before an action in `lane` may execute.
    pub fn lockout(&self, lane: crate::Lane) -> Duration {
        match lane {
            crate::Lane::Slow => self.slow_lockout,
            crate::Lane::Fast => self.fast_lockout,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self::new()
    }
}
