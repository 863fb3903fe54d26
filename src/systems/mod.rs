//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod simulation;

pub use simulation::{cap_dt, SimulationResult, SimulationSystem, MAX_FRAME_DT};
