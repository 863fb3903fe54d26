//! Billiards Mathematics Library
//!
//! Vector and rotation types for a table whose surface is the world X/Z plane.
//!
//! ## Core Types
//!
//! - [`Vec3`] - world-space point or direction (Y is up)
//! - [`PlaneVec`] - planar vector on the table (world X and Z)
//! - [`Rotor3`] - 3D rotation, used for the visual rolling spin
//! - [`Mat4`] - 4x4 column-major matrix for model transforms

mod vec3;
mod plane_vec;
mod rotor3;
pub mod mat4;

pub use vec3::Vec3;
pub use plane_vec::PlaneVec;
pub use rotor3::Rotor3;
pub use mat4::Mat4;
