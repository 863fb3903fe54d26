//! Table wall bounds

use serde::{Deserialize, Serialize};

use crate::error::BoundsError;

/// Axis-aligned rectangle on the table plane limiting ball centers
///
/// The ball's radius is accounted for at detection time, so these are the
/// cushion lines themselves, not the legal center range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for WallBounds {
    /// 20x20 square centered at the origin
    fn default() -> Self {
        Self {
            min_x: -10.0,
            max_x: 10.0,
            min_z: -10.0,
            max_z: 10.0,
        }
    }
}

impl WallBounds {
    /// Create validated bounds
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Result<Self, BoundsError> {
        Self { min_x, max_x, min_z, max_z }.validated()
    }

    /// Bounds centered at the origin with the given half extents
    pub fn centered(half_x: f64, half_z: f64) -> Result<Self, BoundsError> {
        Self::new(-half_x, half_x, -half_z, half_z)
    }

    /// Check the invariants, returning the bounds unchanged when they hold
    ///
    /// Deserialized bounds bypass `new`, so loaders call this explicitly.
    pub fn validated(self) -> Result<Self, BoundsError> {
        if ![self.min_x, self.max_x, self.min_z, self.max_z]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(BoundsError::NonFinite);
        }
        if self.min_x >= self.max_x {
            return Err(BoundsError::Inverted { axis: "x", min: self.min_x, max: self.max_x });
        }
        if self.min_z >= self.max_z {
            return Err(BoundsError::Inverted { axis: "z", min: self.min_z, max: self.max_z });
        }
        Ok(self)
    }

    /// Width along X
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Depth along Z
    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}
