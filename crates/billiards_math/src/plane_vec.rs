//! Planar vector on the table surface
//!
//! The table is the world X/Z plane. `PlaneVec` keeps the two planar axes
//! named `x` and `z` so a planar velocity can never be mistaken for a
//! world-space X/Y pair.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::Vec3;

/// 2D vector in the table plane (world X and world Z)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PlaneVec {
    pub x: f64,
    pub z: f64,
}

impl PlaneVec {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };
    pub const X: Self = Self { x: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, z: 1.0 };

    /// Create a new PlaneVec
    #[inline]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Unit vector at `angle` radians from +X toward +Z
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.z * other.z
    }

    /// Length squared
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length; zero stays zero
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Angle from +X toward +Z, `atan2(z, x)`
    ///
    /// `atan2(0, 0)` is 0, so the zero vector has angle 0.
    #[inline]
    pub fn angle(self) -> f64 {
        self.z.atan2(self.x)
    }

    /// Rotate counter-clockwise (from +X toward +Z) by `angle` radians
    #[inline]
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.z * sin, self.x * sin + self.z * cos)
    }

    /// Lift into world space at height `y`
    #[inline]
    pub fn to_world(self, y: f64) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    /// True when neither component is NaN or infinite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 2]> for PlaneVec {
    fn from(a: [f64; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

impl From<PlaneVec> for [f64; 2] {
    fn from(v: PlaneVec) -> Self {
        [v.x, v.z]
    }
}

impl std::ops::Add for PlaneVec {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.z + other.z)
    }
}

impl std::ops::AddAssign for PlaneVec {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.z += other.z;
    }
}

impl std::ops::Sub for PlaneVec {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.z - other.z)
    }
}

impl std::ops::SubAssign for PlaneVec {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f64> for PlaneVec {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.z * scalar)
    }
}

impl std::ops::MulAssign<f64> for PlaneVec {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Neg for PlaneVec {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_angle() {
        assert!(approx_eq(PlaneVec::X.angle(), 0.0));
        assert!(approx_eq(PlaneVec::Z.angle(), PI / 2.0));
        assert!(approx_eq(PlaneVec::new(-1.0, 0.0).angle(), PI));
        // Negation yields -0.0 for z, which lands on the other side of the cut
        assert!(approx_eq((-PlaneVec::X).angle(), -PI));
        // atan2(0, 0) convention
        assert_eq!(PlaneVec::ZERO.angle(), 0.0);
    }

    #[test]
    fn test_rotated_quarter_turn() {
        let r = PlaneVec::X.rotated(PI / 2.0);
        assert!(approx_eq(r.x, 0.0));
        assert!(approx_eq(r.z, 1.0));
    }

    #[test]
    fn test_rotate_round_trip() {
        let v = PlaneVec::new(0.3, -1.7);
        let back = v.rotated(-0.7).rotated(0.7);
        assert!(approx_eq(v.x, back.x));
        assert!(approx_eq(v.z, back.z));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = PlaneVec::new(3.0, 4.0);
        assert!(approx_eq(v.rotated(1.234).length(), 5.0));
    }

    #[test]
    fn test_from_angle() {
        let v = PlaneVec::from_angle(PI / 2.0);
        assert!(approx_eq(v.x, 0.0));
        assert!(approx_eq(v.z, 1.0));
    }

    #[test]
    fn test_to_world() {
        assert_eq!(PlaneVec::new(1.0, 2.0).to_world(0.88), Vec3::new(1.0, 0.88, 2.0));
    }

    #[test]
    fn test_normalized() {
        assert_eq!(PlaneVec::ZERO.normalized(), PlaneVec::ZERO);
        let n = PlaneVec::new(0.0, -4.0).normalized();
        assert_eq!(n, PlaneVec::new(0.0, -1.0));
    }
}
