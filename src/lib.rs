//! Billiards - ball physics on a flat table
//!
//! Application layer: configuration loading and the per-frame simulation
//! system. The physics and table types live in the workspace crates.

pub mod config;
pub mod systems;
