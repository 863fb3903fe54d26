//! Ball body for table physics

use billiards_math::{PlaneVec, Rotor3, Vec3};
use slotmap::new_key_type;

use crate::bounds::WallBounds;
use crate::collision::{self, CollisionResponse, WallAxes};
use crate::error::BallError;
use crate::integrator::{self, StepOutcome};
use crate::material::PhysicsMaterial;

new_key_type! {
    /// Key to a ball in the physics world
    ///
    /// Generational: a key to a removed ball returns None instead of
    /// aliasing whatever ball reuses the slot.
    pub struct BallKey;
}

/// A ball on the table
///
/// Only the X and Z components of `position` move; Y is the table height
/// fixed at construction. Mass and radius are validated once and never
/// change afterwards.
#[derive(Clone, Debug)]
pub struct Ball {
    /// Center in world space
    pub position: Vec3,
    /// Planar velocity (world units per second)
    pub velocity: PlaneVec,
    /// Accumulated rolling orientation, for the renderer
    pub orientation: Rotor3,
    mass: f64,
    radius: f64,
    wall_bounds: WallBounds,
}

impl Ball {
    /// Create a ball at rest with the default wall bounds
    ///
    /// Fails on non-positive or non-finite mass/radius, or a non-finite
    /// position.
    pub fn new(position: Vec3, mass: f64, radius: f64) -> Result<Self, BallError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BallError::InvalidMass(mass));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BallError::InvalidRadius(radius));
        }
        if !position.is_finite() {
            return Err(BallError::NonFinite);
        }
        Ok(Self {
            position,
            velocity: PlaneVec::ZERO,
            orientation: Rotor3::IDENTITY,
            mass,
            radius,
            wall_bounds: WallBounds::default(),
        })
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: PlaneVec) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial velocity, rejecting NaN or infinite components
    pub fn try_with_velocity(self, velocity: PlaneVec) -> Result<Self, BallError> {
        if !velocity.is_finite() {
            return Err(BallError::NonFinite);
        }
        Ok(self.with_velocity(velocity))
    }

    /// Set the wall bounds
    pub fn with_wall_bounds(mut self, bounds: WallBounds) -> Self {
        self.wall_bounds = bounds;
        self
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn wall_bounds(&self) -> &WallBounds {
        &self.wall_bounds
    }

    /// Replace the planar velocity
    pub fn set_velocity(&mut self, velocity: PlaneVec) {
        self.velocity = velocity;
    }

    /// Replace the wall bounds used by `update_place`
    pub fn set_wall_bounds(&mut self, bounds: WallBounds) {
        self.wall_bounds = bounds;
    }

    /// Planar speed
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Planar momentum (mass * velocity)
    #[inline]
    pub fn momentum(&self) -> PlaneVec {
        self.velocity * self.mass
    }

    /// Translational kinetic energy
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True when position, velocity and orientation hold no NaN/infinity
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.orientation.is_finite()
    }

    /// See [`collision::detect_collision`]
    pub fn detect_collision(&self, other: &Ball) -> bool {
        collision::detect_collision(self, other)
    }

    /// See [`collision::handle_collision`]
    pub fn handle_collision(&mut self, other: &mut Ball) -> CollisionResponse {
        collision::handle_collision(self, other)
    }

    /// See [`collision::detect_wall_collision`]
    pub fn detect_wall_collision(&self, bounds: &WallBounds) -> WallAxes {
        collision::detect_wall_collision(self, bounds)
    }

    /// See [`collision::handle_wall_collision`]
    pub fn handle_wall_collision(&mut self, hits: WallAxes, damping: f64) {
        collision::handle_wall_collision(self, hits, damping)
    }

    /// Advance one frame with the given per-frame friction coefficient
    ///
    /// Uses the default cushion damping and per-frame friction decay.
    pub fn update_place(&mut self, dt: f64, friction: f64) -> StepOutcome {
        let material = PhysicsMaterial {
            friction,
            ..PhysicsMaterial::default()
        };
        integrator::integrate(self, dt, &material)
    }
}
