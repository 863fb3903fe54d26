//! Ball physics for the billiards table
//!
//! This crate provides the simulation of balls rolling on a flat table:
//! - Ball-ball elastic collisions with depenetration
//! - Axis-aligned cushions with damped reflection
//! - Rolling friction and rolling orientation
//! - A world that steps every ball and resolves each contact pair once

pub mod body;
pub mod bounds;
pub mod collision;
pub mod error;
pub mod integrator;
pub mod material;
pub mod world;

// Re-export commonly used types
pub use body::{Ball, BallKey};
pub use bounds::WallBounds;
pub use collision::{
    detect_collision, detect_wall_collision, handle_collision, handle_wall_collision,
    CollisionResponse, WallAxes, DEFAULT_CUSHION_DAMPING,
};
pub use error::{BallError, BoundsError, PhysicsError};
pub use integrator::{integrate, rolling_rotation, StepOutcome};
pub use material::{FrictionModel, PhysicsMaterial, DEFAULT_FRICTION, REFERENCE_FRAME_RATE};
pub use world::{Contact, PhysicsWorld, StepReport};
