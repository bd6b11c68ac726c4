//! Reasons a single ability attempt did not happen.
//!
//! None of these escape a tick. The opener and the policy treat every variant
//! as "try the next candidate (or nothing) this tick"; they exist so that the
//! reason can be logged and, for the opener, reported in the tick outcome.

use std::time::Duration;

use crate::ability::Ability;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("{0} is disabled by configuration")]
    Disabled(Ability),

    #[error("{ability} is locked out for another {remaining:?}")]
    Locked {
        ability: Ability,
        remaining: Duration,
    },

    #[error("{0} is not usable")]
    Unavailable(Ability),

    #[error("host rejected {0}")]
    ExecutionFailed(Ability),
}

impl AttemptError {
    pub const fn ability(&self) -> Ability {
        match self {
            AttemptError::Disabled(ability)
            | AttemptError::Unavailable(ability)
            | AttemptError::ExecutionFailed(ability) => *ability,
            AttemptError::Locked { ability, .. } => *ability,
        }
    }

    /// `true` when the host was actually asked to execute and refused.
    pub const fn reached_host(&self) -> bool {
        matches!(self, AttemptError::ExecutionFailed(_))
    }
}
