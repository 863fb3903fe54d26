//! Collision detection and response for balls and cushions
//!
//! Ball-ball contacts are detected by center distance and resolved as a 2D
//! elastic collision along the line of impact, followed by a symmetric
//! positional correction. Cushions are axis-aligned and reverse the
//! offending velocity component with damping.

use billiards_math::PlaneVec;
use bitflags::bitflags;

use crate::body::Ball;
use crate::bounds::WallBounds;

/// Velocity scale applied to a component reflected off a cushion
pub const DEFAULT_CUSHION_DAMPING: f64 = 0.9;

bitflags! {
    /// Which cushion axes a ball is currently violating
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WallAxes: u8 {
        /// Past the min or max X cushion
        const X = 1 << 0;
        /// Past the min or max Z cushion
        const Z = 1 << 1;
    }
}

impl WallAxes {
    /// X cushion flagged
    #[inline]
    pub fn x(self) -> bool {
        self.contains(WallAxes::X)
    }

    /// Z cushion flagged
    #[inline]
    pub fn z(self) -> bool {
        self.contains(WallAxes::Z)
    }
}

/// Summary of a resolved ball-ball contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResponse {
    /// Line-of-impact angle, `atan2(dz, dx)` from the first ball to the second
    pub angle: f64,
    /// Planar overlap before correction (negative when not overlapping)
    pub overlap: f64,
}

/// Test two balls for contact
///
/// Uses the full 3D center distance, so a Y offset counts. Touching
/// exactly (distance == sum of radii) is not a collision.
pub fn detect_collision(a: &Ball, b: &Ball) -> bool {
    a.position.distance(b.position) < a.radius() + b.radius()
}

/// Resolve a contact between two balls
///
/// Velocities are decomposed into normal and tangential components along
/// the line of impact; the normal components take the 1D elastic result,
/// tangential components are untouched. Any planar overlap is then split
/// evenly between the two balls, independent of mass.
///
/// Coincident centers give `atan2(0, 0) = 0`, so the line of impact falls
/// back to +X.
pub fn handle_collision(a: &mut Ball, b: &mut Ball) -> CollisionResponse {
    let delta = b.position.xz() - a.position.xz();
    let angle = delta.angle();

    // Rotate into the (normal, tangent) frame
    let local_a = a.velocity.rotated(-angle);
    let local_b = b.velocity.rotated(-angle);

    let (m1, m2) = (a.mass(), b.mass());
    let total = m1 + m2;
    let normal_a = (local_a.x * (m1 - m2) + 2.0 * m2 * local_b.x) / total;
    let normal_b = (local_b.x * (m2 - m1) + 2.0 * m1 * local_a.x) / total;

    a.velocity = PlaneVec::new(normal_a, local_a.z).rotated(angle);
    b.velocity = PlaneVec::new(normal_b, local_b.z).rotated(angle);

    let overlap = (a.radius() + b.radius()) - delta.length();
    if overlap > 0.0 {
        let push = PlaneVec::from_angle(angle) * (overlap / 2.0);
        a.position = a.position.with_xz(a.position.xz() - push);
        b.position = b.position.with_xz(b.position.xz() + push);
    }

    CollisionResponse { angle, overlap }
}

/// Test a ball against the cushions
///
/// An axis is flagged when the ball's edge is past either cushion on it.
pub fn detect_wall_collision(ball: &Ball, bounds: &WallBounds) -> WallAxes {
    let p = ball.position;
    let r = ball.radius();
    let mut hits = WallAxes::empty();
    if p.x - r < bounds.min_x || p.x + r > bounds.max_x {
        hits |= WallAxes::X;
    }
    if p.z - r < bounds.min_z || p.z + r > bounds.max_z {
        hits |= WallAxes::Z;
    }
    hits
}

/// Reflect the flagged velocity components, scaled by `damping`
///
/// Position is left alone: a ball can sit slightly past a cushion for a
/// frame while its reversed velocity carries it back.
pub fn handle_wall_collision(ball: &mut Ball, hits: WallAxes, damping: f64) {
    if hits.x() {
        ball.velocity.x = -ball.velocity.x * damping;
    }
    if hits.z() {
        ball.velocity.z = -ball.velocity.z * damping;
    }
}
