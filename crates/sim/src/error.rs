use std::time::Duration;

/// Errors raised while setting up a simulated fight.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("tick interval must be greater than zero")]
    ZeroTick,

    #[error("fight duration {duration:?} is shorter than one tick ({tick:?})")]
    DurationTooShort { duration: Duration, tick: Duration },
}
