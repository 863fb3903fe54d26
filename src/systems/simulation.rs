//! Table simulation system
//!
//! Drives the table once per frame:
//! - Delta time calculation
//! - Physics stepping and entity sync
//! - Frame statistics for logging

use std::time::Instant;

use billiards_core::{TableError, TableWorld};

/// Longest frame the simulation will integrate in one step
pub const MAX_FRAME_DT: f64 = 0.25;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationResult {
    /// Time actually simulated this frame
    pub dt: f64,
    /// Ball-ball contacts resolved this frame
    pub contacts: usize,
    /// Balls that bounced off a cushion this frame
    pub wall_hits: usize,
    /// Whether any entity needs re-uploading
    pub instances_dirty: bool,
}

/// Manages the table simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    frames: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frames: 0,
        }
    }

    /// Frames simulated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame using wall-clock time since the previous frame
    pub fn update(&mut self, table: &mut TableWorld) -> Result<SimulationResult, TableError> {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.step(table, raw_dt)
    }

    /// Run one frame of `dt` seconds
    ///
    /// `dt` is capped at [`MAX_FRAME_DT`] so a stall (first frame, debugger
    /// pause) does not teleport balls through each other.
    pub fn step(&mut self, table: &mut TableWorld, dt: f64) -> Result<SimulationResult, TableError> {
        let dt = cap_dt(dt);
        let report = table.update(dt)?;
        self.frames += 1;

        let result = SimulationResult {
            dt,
            contacts: report.contacts.len(),
            wall_hits: report.wall_hits(),
            instances_dirty: table.entities().iter().any(|e| e.is_dirty()),
        };
        if result.contacts > 0 || result.wall_hits > 0 {
            log::debug!(
                "Frame {}: {} contacts, {} cushion hits",
                self.frames,
                result.contacts,
                result.wall_hits
            );
        }
        Ok(result)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a frame time into [0, MAX_FRAME_DT]
pub fn cap_dt(dt: f64) -> f64 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}
