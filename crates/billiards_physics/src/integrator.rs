//! Per-frame integration for a single ball
//!
//! Each step:
//!
//! ```text
//! 1. x += vx*dt, z += vz*dt          (explicit Euler, Y untouched)
//! 2. roll = rotation for the distance travelled (rolling without slipping)
//! 3. reflect velocity off any violated cushion axis
//! 4. v *= friction decay
//! ```
//!
//! The rolling rotation is composed into `Ball::orientation` and also
//! returned, along with the movement itself, so a renderer can sync its
//! transforms without reaching back into the physics state.

use billiards_math::{Rotor3, Vec3};

use crate::body::Ball;
use crate::collision::{detect_wall_collision, handle_wall_collision, WallAxes};
use crate::material::PhysicsMaterial;

/// What happened to one ball during one integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Center before the step
    pub previous_position: Vec3,
    /// Distance travelled this step
    pub distance_moved: f64,
    /// Unit direction of travel (zero when the ball did not move)
    pub direction: Vec3,
    /// Rolling rotation applied this step
    pub roll: Rotor3,
    /// Cushion axes that reflected the velocity
    pub wall_hits: WallAxes,
}

/// Rolling rotation for a ball of `radius` moving `distance` along `direction`
///
/// The axis is `direction × up`; one circumference of travel is one full
/// turn. Zero travel gives the identity.
pub fn rolling_rotation(direction: Vec3, distance: f64, radius: f64) -> Rotor3 {
    let circumference = radius * 2.0 * std::f64::consts::PI;
    let angle = -(distance / circumference) * 2.0 * std::f64::consts::PI;
    let axis = direction.cross(Vec3::Y);
    Rotor3::from_axis_angle(axis, angle)
}

/// Advance `ball` by `dt` seconds on a table made of `material`
///
/// Cushions are taken from the ball's own wall bounds.
pub fn integrate(ball: &mut Ball, dt: f64, material: &PhysicsMaterial) -> StepOutcome {
    let previous_position = ball.position;
    ball.position.x += ball.velocity.x * dt;
    ball.position.z += ball.velocity.z * dt;

    let travel = ball.position - previous_position;
    let distance_moved = travel.length();
    let direction = travel.normalized();

    let roll = rolling_rotation(direction, distance_moved, ball.radius());
    ball.orientation = roll.compose(&ball.orientation).normalize();

    let bounds = *ball.wall_bounds();
    let wall_hits = detect_wall_collision(ball, &bounds);
    handle_wall_collision(ball, wall_hits, material.cushion_damping);

    ball.velocity *= material.friction_decay(dt);

    StepOutcome {
        previous_position,
        distance_moved,
        direction,
        roll,
        wall_hits,
    }
}
