//! Per-tick combat rotation decision engine.
//!
//! `rotation-core` decides, once per host update, which single ability to
//! execute next. It tracks two simulated gauges, walks a scripted opener, and
//! then hands off to a fixed-priority steady-state cascade that weaves fast
//! abilities between slow ones without overcapping heat.
//!
//! The host is reached only through the traits in [`env`]; all decision state
//! lives in [`RotationEngine`], and every mutation happens inside
//! [`RotationEngine::tick`] or one of the lifecycle commands.
//!
//! # Architecture
//!
//! - [`ResourceTracker`]: heat and battery model driven by a static effect table
//! - [`Sequencer`]: steps through the [`OpenerPlan`]
//! - [`RotationPolicy`]: steady-state priority cascade
//! - [`RotationEngine`]: lifecycle, tick entry point, snapshots
pub mod ability;
pub mod config;
mod context;
pub mod engine;
pub mod env;
pub mod error;
pub mod gauge;
pub mod opener;
pub mod policy;
pub mod sequencer;
pub mod session;
pub mod time;

pub use ability::{Ability, AbilityId, COMBO_CHAIN, Lane};
pub use config::{Category, CategorySet, RotationConfig, Settings, count_enabled};
pub use engine::{Execution, RotationEngine, RotationSnapshot, TickOutcome};
pub use env::{ActionHost, Clock, ConfigOracle, RotationEnv, TargetHandle, TargetId};
pub use error::AttemptError;
pub use gauge::{Gauge, GaugeEffect, GaugeError, GaugeKind, ResourceTracker};
pub use opener::{OpenerPlan, OpenerStep, STANDARD_OPENER};
pub use policy::{RotationPolicy, SpendReason};
pub use sequencer::{OpenerAdvance, Sequencer};
pub use session::{BurstWindow, ExecutionRecord, History, RotationSession, RotationStatus};
pub use time::{LaneTimers, ManualClock, SystemClock, Timestamp};
