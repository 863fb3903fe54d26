//! 3D Rotor for ball orientation
//!
//! A 3D rotor has one scalar and three bivector components (the XY, XZ and
//! YZ planes), and is isomorphic to a unit quaternion.
//! Internally the sandwich product and composition are evaluated in
//! quaternion form, where the vector part is the dual of the bivector.

use bytemuck::{Pod, Zeroable};
use crate::Vec3;

/// 3D Rotor for representing rotations
///
/// R = s + b_xy*e12 + b_xz*e13 + b_yz*e23
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Rotor3 {
    /// Scalar component
    pub s: f64,
    /// Bivector component for XY plane (e12)
    pub b_xy: f64,
    /// Bivector component for XZ plane (e13)
    pub b_xz: f64,
    /// Bivector component for YZ plane (e23)
    pub b_yz: f64,
}

impl Default for Rotor3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotor3 {
    /// Identity rotor (no rotation)
    pub const IDENTITY: Self = Self {
        s: 1.0,
        b_xy: 0.0,
        b_xz: 0.0,
        b_yz: 0.0,
    };

    /// Create a rotor rotating by `angle` radians about `axis` (right-handed)
    ///
    /// A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let n = axis.normalized();
        if n == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let (sin_h, cos_h) = half.sin_cos();
        Self::from_quaternion(cos_h, n * sin_h)
    }

    #[inline]
    fn from_quaternion(w: f64, v: Vec3) -> Self {
        Self {
            s: w,
            b_xy: -v.z,
            b_xz: v.y,
            b_yz: -v.x,
        }
    }

    /// Quaternion vector part (dual of the bivector)
    #[inline]
    fn vector_part(&self) -> Vec3 {
        Vec3::new(-self.b_yz, self.b_xz, -self.b_xy)
    }

    /// Compute the squared magnitude of the rotor
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.s * self.s + self.b_xy * self.b_xy + self.b_xz * self.b_xz + self.b_yz * self.b_yz
    }

    /// Compute the magnitude of the rotor
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize the rotor to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            Self {
                s: self.s * inv_mag,
                b_xy: self.b_xy * inv_mag,
                b_xz: self.b_xz * inv_mag,
                b_yz: self.b_yz * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Compute the reverse of the rotor (inverse rotation for unit rotors)
    pub fn reverse(&self) -> Self {
        Self {
            s: self.s,
            b_xy: -self.b_xy,
            b_xz: -self.b_xz,
            b_yz: -self.b_yz,
        }
    }

    /// Rotate a vector using the sandwich product: v' = R * v * R†
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = self.vector_part();
        let t = q.cross(v) * 2.0;
        v + t * self.s + q.cross(t)
    }

    /// Compose two rotations: result = self * other
    /// The composed rotation applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        let a = self.vector_part();
        let b = other.vector_part();
        let w = self.s * other.s - a.dot(b);
        let v = b * self.s + a * other.s + a.cross(b);
        Self::from_quaternion(w, v)
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.b_xy.is_finite() && self.b_xz.is_finite() && self.b_yz.is_finite()
    }

    /// Convert rotor to a 4x4 rotation matrix
    /// Useful for sending to GPU
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let x_col = self.rotate(Vec3::X);
        let y_col = self.rotate(Vec3::Y);
        let z_col = self.rotate(Vec3::Z);

        // Column-major order
        [
            [x_col.x as f32, x_col.y as f32, x_col.z as f32, 0.0],
            [y_col.x as f32, y_col.y as f32, y_col.z as f32, 0.0],
            [z_col.x as f32, z_col.y as f32, z_col.z as f32, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Rotor3::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_xy_rotation_90() {
        let r = Rotor3::from_axis_angle(Vec3::Z, PI / 2.0);
        let rotated = r.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Y), "Expected Y, got {:?}", rotated);
        let rotated = r.rotate(Vec3::Y);
        assert!(vec_approx_eq(rotated, -Vec3::X), "Expected -X, got {:?}", rotated);
    }

    #[test]
    fn test_xz_rotation_90() {
        let r = Rotor3::from_axis_angle(-Vec3::Y, PI / 2.0);
        let rotated = r.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_yz_rotation_90() {
        let r = Rotor3::from_axis_angle(Vec3::X, PI / 2.0);
        let rotated = r.rotate(Vec3::Y);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_axis_angle_components() {
        // Right-handed about +Z lives entirely in the XY plane
        let r = Rotor3::from_axis_angle(Vec3::new(0.0, 0.0, 2.0), 0.7);
        assert!(approx_eq(r.s, 0.35_f64.cos()));
        assert!(approx_eq(r.b_xy, -(0.35_f64.sin())));
        assert!(approx_eq(r.b_xz, 0.0));
        assert!(approx_eq(r.b_yz, 0.0));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Rotor3::from_axis_angle(Vec3::ZERO, 1.0), Rotor3::IDENTITY);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let r = Rotor3::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 1.23);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx_eq(v.length(), r.rotate(v).length()));
    }

    #[test]
    fn test_compose_order() {
        // XY then YZ: X -> Y -> Z
        let first = Rotor3::from_axis_angle(Vec3::Z, PI / 2.0);
        let second = Rotor3::from_axis_angle(Vec3::X, PI / 2.0);
        let composed = second.compose(&first);
        assert!(vec_approx_eq(composed.rotate(Vec3::X), Vec3::Z));
    }

    #[test]
    fn test_compose_inverse() {
        let r = Rotor3::from_axis_angle(Vec3::new(0.3, 1.0, 0.2), PI / 3.0);
        let composed = r.compose(&r.reverse());
        assert!(approx_eq(composed.normalize().s, 1.0), "Expected identity, got {:?}", composed);
    }

    #[test]
    fn test_full_rotation() {
        let r = Rotor3::from_axis_angle(Vec3::Y, PI);
        let composed = r.compose(&r);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(composed.rotate(v), v));
    }

    #[test]
    fn test_normalize() {
        let mut r = Rotor3::from_axis_angle(Vec3::Z, PI / 4.0);
        r.s *= 2.0;
        r.b_xy *= 2.0;
        assert!(approx_eq(r.normalize().magnitude(), 1.0));
    }

    #[test]
    fn test_to_matrix_identity() {
        let m = Rotor3::IDENTITY.to_matrix();
        for (i, col) in m.iter().enumerate() {
            for (j, value) in col.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < 1e-6);
            }
        }
    }
}
