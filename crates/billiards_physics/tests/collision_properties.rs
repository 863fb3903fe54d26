//! Integration tests for ball collision and integration
//!
//! These tests drive the public API the way a frame loop does:
//! 1. Detect and resolve each unordered pair once
//! 2. Advance every ball with `update_place`
//! 3. Check the conservation and boundary properties after each phase

use billiards_math::{PlaneVec, Vec3};
use billiards_physics::{
    Ball, PhysicsMaterial, PhysicsWorld, WallAxes, WallBounds, DEFAULT_CUSHION_DAMPING,
    DEFAULT_FRICTION,
};

const TABLE_HEIGHT: f64 = 0.88;
const EPSILON: f64 = 1e-9;

fn ball(x: f64, z: f64, mass: f64, radius: f64) -> Ball {
    Ball::new(Vec3::new(x, TABLE_HEIGHT, z), mass, radius).expect("valid ball")
}

fn planar_distance(a: &Ball, b: &Ball) -> f64 {
    (a.position.xz() - b.position.xz()).length()
}

// ==================== Pairwise Scenario ====================

#[test]
fn test_struck_ball_transfers_velocity_to_resting_ball() {
    let mut a = ball(0.0, 0.0, 0.17, 0.03).with_velocity(PlaneVec::new(1.0, 0.0));
    let mut b = ball(0.05, 0.0, 0.17, 0.03);

    assert!(a.detect_collision(&b));
    let response = a.handle_collision(&mut b);

    assert!(a.velocity.x.abs() < EPSILON, "A kept {:?}", a.velocity);
    assert!((b.velocity.x - 1.0).abs() < EPSILON, "B got {:?}", b.velocity);
    assert!((planar_distance(&a, &b) - 0.06).abs() < EPSILON);
    assert!((response.overlap - 0.01).abs() < EPSILON);
    assert_eq!(a.position.y, TABLE_HEIGHT);
    assert_eq!(b.position.y, TABLE_HEIGHT);
}

#[test]
fn test_detection_boundary_is_strict() {
    for &(ra, rb) in &[(0.03, 0.03), (0.5, 0.25), (1.0, 2.0)] {
        let a = ball(0.0, 0.0, 1.0, ra);
        let touching = ball(ra + rb, 0.0, 1.0, rb);
        let inside = ball(ra + rb - 1e-6, 0.0, 1.0, rb);
        let outside = ball(ra + rb + 1e-6, 0.0, 1.0, rb);

        assert!(!a.detect_collision(&touching));
        assert!(a.detect_collision(&inside));
        assert!(!a.detect_collision(&outside));
    }
}

#[test]
fn test_oblique_collisions_conserve_momentum_and_separate() {
    let cases = [
        (PlaneVec::new(0.02, 0.03), 0.17, 2.0, PlaneVec::new(1.5, -0.3), PlaneVec::new(-0.2, 0.1)),
        (PlaneVec::new(-0.04, 0.01), 1.0, 1.0, PlaneVec::new(0.0, 0.7), PlaneVec::new(0.4, 0.4)),
        (PlaneVec::new(0.01, -0.05), 0.5, 3.0, PlaneVec::new(-2.0, 1.0), PlaneVec::ZERO),
    ];

    for (offset, mass_a, mass_b, va, vb) in cases {
        let mut a = ball(0.0, 0.0, mass_a, 0.03).with_velocity(va);
        let mut b = ball(offset.x, offset.z, mass_b, 0.03).with_velocity(vb);
        let before = a.momentum() + b.momentum();

        assert!(a.detect_collision(&b));
        a.handle_collision(&mut b);

        let after = a.momentum() + b.momentum();
        let scale = before.length().max(1.0);
        assert!((before - after).length() / scale < EPSILON, "momentum drift for {:?}", offset);
        assert!((planar_distance(&a, &b) - 0.06).abs() < EPSILON);
        assert!(a.is_finite() && b.is_finite());
    }
}

#[test]
fn test_head_on_equal_mass_swap() {
    let mut a = ball(-0.4, 0.0, 1.0, 0.5).with_velocity(PlaneVec::new(2.0, 0.0));
    let mut b = ball(0.4, 0.0, 1.0, 0.5).with_velocity(PlaneVec::new(-2.0, 0.0));

    assert!(a.detect_collision(&b));
    a.handle_collision(&mut b);

    assert!((a.velocity.x + 2.0).abs() < EPSILON);
    assert!((b.velocity.x - 2.0).abs() < EPSILON);
}

// ==================== Cushions and Friction ====================

#[test]
fn test_wall_flags_and_damped_reflection() {
    let bounds = WallBounds::centered(1.27, 0.635).unwrap();
    let mut corner = ball(1.25, -0.62, 0.17, 0.03).with_velocity(PlaneVec::new(0.8, -0.6));

    let hits = corner.detect_wall_collision(&bounds);
    assert_eq!(hits, WallAxes::X | WallAxes::Z);

    corner.handle_wall_collision(hits, DEFAULT_CUSHION_DAMPING);
    assert!((corner.velocity.x + 0.72).abs() < EPSILON);
    assert!((corner.velocity.z - 0.54).abs() < EPSILON);

    let centered = ball(0.0, 0.0, 0.17, 0.03);
    assert!(centered.detect_wall_collision(&bounds).is_empty());
}

#[test]
fn test_update_place_at_rest() {
    let mut resting = ball(0.3, -0.2, 0.17, 0.03);
    let outcome = resting.update_place(1.0 / 60.0, DEFAULT_FRICTION);

    assert_eq!(resting.position, Vec3::new(0.3, TABLE_HEIGHT, -0.2));
    assert_eq!(resting.velocity, PlaneVec::ZERO);
    assert_eq!(outcome.distance_moved, 0.0);
}

// ==================== World Loop ====================

#[test]
fn test_break_shot_stays_finite_and_loses_energy() {
    let bounds = WallBounds::centered(1.27, 0.635).unwrap();
    let mut world = PhysicsWorld::new();

    // Triangle rack of ten with a heavy striker
    let spacing = 0.061;
    for row in 0..4 {
        for col in 0..=row {
            let x = 0.6 + row as f64 * spacing * 0.866;
            let z = (col as f64 - row as f64 / 2.0) * spacing;
            world.add_ball(ball(x, z, 0.17, 0.03));
        }
    }
    let cue = world.add_ball(ball(-0.6, 0.0, 2.0, 0.03).with_velocity(PlaneVec::new(3.0, 0.02)));
    world.set_wall_bounds(bounds);

    let mut contacts = 0;
    let mut energy = world.kinetic_energy();
    for _ in 0..1200 {
        let report = world.step(1.0 / 60.0).expect("finite step");
        contacts += report.contacts.len();

        // Elastic contacts keep energy; friction and cushions only remove it
        let now = world.kinetic_energy();
        assert!(now <= energy * (1.0 + 1e-9), "energy grew from {} to {}", energy, now);
        energy = now;
    }

    assert!(contacts > 0, "striker never reached the rack");
    assert!(world.get_ball(cue).is_some());
    for (_, b) in world.iter() {
        assert!(b.is_finite());
        assert_eq!(b.position.y, TABLE_HEIGHT);
    }
}

#[test]
fn test_frictionless_world_keeps_energy_without_cushions() {
    let mut world = PhysicsWorld::with_material(PhysicsMaterial::FRICTIONLESS);
    world.add_ball(ball(0.0, 0.0, 1.0, 0.03).with_velocity(PlaneVec::new(1.0, 0.0)));
    world.add_ball(ball(0.5, 0.01, 1.0, 0.03));

    let before = world.kinetic_energy();
    for _ in 0..60 {
        world.step(1.0 / 60.0).unwrap();
    }
    let after = world.kinetic_energy();

    assert!((before - after).abs() < 1e-9 * before.max(1.0));
}
