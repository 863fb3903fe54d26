//! Core types for the billiards table
//!
//! This crate sits between the physics and a renderer:
//!
//! - [`TableLayout`] - Loadable/saveable description of the balls on a table
//! - [`TableWorld`] - Physics world plus one entity per ball, kept in sync
//! - [`BallEntity`] - Visual side of a ball (model, color, transform, arrow)
//! - [`BallTransform`] - Position, rolling rotation, and scale
//! - [`BallInstance`] - GPU-ready per-ball record

mod transform;
mod entity;
mod layout;
mod world;
pub mod render_sync;

pub use transform::BallTransform;
pub use entity::{ArrowIndicator, BallEntity, DirtyFlags, Material};
pub use layout::{
    BallTemplate, LayoutLoadError, LayoutSaveError, TableLayout, BALL_RADIUS, CUE_BALL_MASS,
    OBJECT_BALL_MASS, TABLE_HEIGHT,
};
pub use world::{TableError, TableWorld};
pub use render_sync::BallInstance;

// Re-export commonly used types for convenience
pub use billiards_math::{PlaneVec, Rotor3, Vec3};
pub use billiards_physics::{
    Ball, BallKey, FrictionModel, PhysicsError, PhysicsMaterial, PhysicsWorld, StepReport,
    WallBounds,
};
