//! Traits describing the host the engine runs inside.
//!
//! The engine never reads host memory. It sees the game through three narrow
//! capabilities, bundled per tick by [`RotationEnv`]:
//!
//! - [`ActionHost`]: usability checks, execution, and the current target
//! - [`ConfigOracle`]: per-category enable flags
//! - [`Clock`]: a monotonic timestamp source

use std::fmt;

use crate::ability::{Ability, AbilityId};
use crate::config::Category;
use crate::time::Timestamp;

/// Host identifier of a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target:{:#x}", self.0)
    }
}

/// Live view of the currently selected target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetHandle {
    pub id: TargetId,
    pub is_alive: bool,
}

impl TargetHandle {
    pub const fn alive(id: TargetId) -> Self {
        Self { id, is_alive: true }
    }

    pub const fn dead(id: TargetId) -> Self {
        Self {
            id,
            is_alive: false,
        }
    }
}

/// Ability execution surface of the host.
///
/// Both calls are synchronous. `is_usable` already folds in cooldown,
/// resource and range checks; `execute` may still fail if host state changed
/// between the two calls.
pub trait ActionHost {
    fn is_usable(&self, ability: AbilityId) -> bool;

    /// Returns `true` when the host accepted and applied the action.
    fn execute(&mut self, ability: AbilityId, target: TargetId) -> bool;

    fn current_target(&self) -> Option<TargetHandle>;
}

/// Per-ability configuration gating.
pub trait ConfigOracle {
    fn category_enabled(&self, category: Category) -> bool;

    /// Whether the host configuration allows `ability`.
    ///
    /// Abilities without a category (the basic combo) and ids the engine does
    /// not know are always allowed.
    fn is_enabled_in_config(&self, ability: AbilityId) -> bool {
        match Ability::from_id(ability).and_then(Ability::category) {
            Some(category) => self.category_enabled(category),
            None => true,
        }
    }
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Host capabilities lent to the engine for one tick.
pub struct RotationEnv<'a> {
    pub host: &'a mut dyn ActionHost,
    pub config: &'a dyn ConfigOracle,
    pub clock: &'a dyn Clock,
}

impl<'a> RotationEnv<'a> {
    pub fn new(
        host: &'a mut dyn ActionHost,
        config: &'a dyn ConfigOracle,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            host,
            config,
            clock,
        }
    }
}
