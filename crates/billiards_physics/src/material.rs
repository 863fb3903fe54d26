//! Table surface and cushion properties

use serde::{Deserialize, Serialize};

use crate::collision::DEFAULT_CUSHION_DAMPING;

/// Per-frame rolling friction coefficient
pub const DEFAULT_FRICTION: f64 = 0.999;

/// Frame rate the per-frame friction coefficient was tuned for
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// How the friction coefficient is applied each integration step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionModel {
    /// `v *= friction` once per step, regardless of `dt`
    ///
    /// Deceleration depends on frame rate.
    #[default]
    PerFrame,
    /// `v *= friction^(dt * REFERENCE_FRAME_RATE)`
    ///
    /// Matches `PerFrame` at the reference rate and stays consistent at others.
    TimeScaled,
}

impl FrictionModel {
    /// Velocity multiplier for one step of length `dt`
    pub fn decay(self, friction: f64, dt: f64) -> f64 {
        match self {
            FrictionModel::PerFrame => friction,
            FrictionModel::TimeScaled => friction.powf(dt * REFERENCE_FRAME_RATE),
        }
    }
}

/// Physical properties of the table surface and cushions
///
/// `friction` is the per-step velocity retention (1.0 = frictionless) and
/// `cushion_damping` scales a velocity component reflected off a cushion
/// (1.0 = perfectly elastic cushion).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    pub friction: f64,
    pub cushion_damping: f64,
    #[serde(default)]
    pub friction_model: FrictionModel,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            cushion_damping: DEFAULT_CUSHION_DAMPING,
            friction_model: FrictionModel::PerFrame,
        }
    }
}

impl PhysicsMaterial {
    /// No rolling friction and perfectly elastic cushions
    pub const FRICTIONLESS: Self = Self {
        friction: 1.0,
        cushion_damping: 1.0,
        friction_model: FrictionModel::PerFrame,
    };

    /// Create a material with custom friction and cushion damping
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(friction: f64, cushion_damping: f64) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            cushion_damping: cushion_damping.clamp(0.0, 1.0),
            friction_model: FrictionModel::PerFrame,
        }
    }

    /// Select the friction model
    pub fn with_friction_model(mut self, model: FrictionModel) -> Self {
        self.friction_model = model;
        self
    }

    /// Velocity multiplier for one step of length `dt`
    #[inline]
    pub fn friction_decay(&self, dt: f64) -> f64 {
        self.friction_model.decay(self.friction, dt)
    }
}
