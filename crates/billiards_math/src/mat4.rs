//! 4x4 Matrix utilities for ball model transforms
//!
//! Matrices are column-major `[[f32; 4]; 4]`, the layout renderers expect
//! for uniform and instance buffers.

use crate::{Rotor3, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Build a model matrix: uniform scale, then rotation, then translation
pub fn model_matrix(translation: Vec3, rotation: &Rotor3, scale: f64) -> Mat4 {
    let mut m = rotation.to_matrix();
    let s = scale as f32;
    for col in m.iter_mut().take(3) {
        for value in col.iter_mut().take(3) {
            *value *= s;
        }
    }
    m[3] = [translation.x as f32, translation.y as f32, translation.z as f32, 1.0];
    m
}

/// Transform a point by a column-major matrix (w = 1)
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}
