//! Simulated host for the rotation engine.
//!
//! [`SimHost`] stands in for the game client with a cooldown and charge
//! model; [`Simulation`] drives [`rotation_core::RotationEngine`] against it
//! at a fixed tick cadence and summarises the fight in a [`SimReport`].
pub mod config;
pub mod error;
pub mod host;
pub mod simulation;

pub use config::SimConfig;
pub use error::SimError;
pub use host::{GLOBAL_COOLDOWN, RECASTS, Recast, SimHost};
pub use simulation::{SIM_TARGET, SimReport, Simulation};
