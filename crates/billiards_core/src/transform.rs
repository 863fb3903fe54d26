//! Ball transform (position, rotation, scale)
//!
//! A BallTransform is the visual placement of a ball model. It follows the
//! physics ball but owns nothing the physics step reads back.

use billiards_math::{mat4, Mat4, Rotor3, Vec3};

/// A transform with position, rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallTransform {
    /// Center in world space
    pub position: Vec3,
    /// Accumulated rolling rotation
    pub rotation: Rotor3,
    /// Uniform scale factor (the model is authored at unit radius)
    pub scale: f64,
}

impl Default for BallTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl BallTransform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Rotor3::IDENTITY,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix for GPU upload (scale, then rotation, then translation)
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        mat4::model_matrix(self.position, &self.rotation, self.scale)
    }

    /// Transform a point from model space to world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p * self.scale) + self.position
    }

    /// Transform a direction from model space to world space
    ///
    /// Applies scale and rotation, but not translation.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d * self.scale)
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate the transform by a rotor (applied after the current rotation)
    pub fn rotate(&mut self, rotor: Rotor3) {
        self.rotation = rotor.compose(&self.rotation).normalize();
    }
}
