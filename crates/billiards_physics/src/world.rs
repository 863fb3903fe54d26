//! Physics world and simulation

use billiards_math::PlaneVec;
use slotmap::SlotMap;

use crate::body::{Ball, BallKey};
use crate::bounds::WallBounds;
use crate::collision::{detect_collision, handle_collision, CollisionResponse};
use crate::error::PhysicsError;
use crate::integrator::{integrate, StepOutcome};
use crate::material::PhysicsMaterial;

/// A resolved contact between two balls during a step
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub a: BallKey,
    pub b: BallKey,
    pub response: CollisionResponse,
}

/// Everything that happened during one call to [`PhysicsWorld::step`]
#[derive(Clone, Debug, Default)]
pub struct StepReport {
    /// Ball-ball contacts resolved this step, in pair order
    pub contacts: Vec<Contact>,
    /// Per-ball integration results
    pub outcomes: Vec<(BallKey, StepOutcome)>,
}

impl StepReport {
    /// Number of cushion reflections this step
    pub fn wall_hits(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.wall_hits.is_empty())
            .count()
    }

    /// Integration result for one ball
    pub fn outcome(&self, key: BallKey) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|(k, _)| *k == key).map(|(_, o)| o)
    }
}

/// The physics world containing every ball on the table
pub struct PhysicsWorld {
    /// All balls (using generational keys)
    balls: SlotMap<BallKey, Ball>,
    /// Surface and cushion properties
    pub material: PhysicsMaterial,
}

impl PhysicsWorld {
    /// Create a new physics world with the default material
    pub fn new() -> Self {
        Self::with_material(PhysicsMaterial::default())
    }

    /// Create a new physics world with a custom material
    pub fn with_material(material: PhysicsMaterial) -> Self {
        Self {
            balls: SlotMap::with_key(),
            material,
        }
    }

    /// Add a ball to the world and return its key
    pub fn add_ball(&mut self, ball: Ball) -> BallKey {
        self.balls.insert(ball)
    }

    /// Remove a ball from the world and return it
    pub fn remove_ball(&mut self, key: BallKey) -> Option<Ball> {
        self.balls.remove(key)
    }

    /// Get an immutable reference to a ball by key
    pub fn get_ball(&self, key: BallKey) -> Option<&Ball> {
        self.balls.get(key)
    }

    /// Get a mutable reference to a ball by key
    pub fn get_ball_mut(&mut self, key: BallKey) -> Option<&mut Ball> {
        self.balls.get_mut(key)
    }

    /// Get the number of balls in the world
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Iterate over all ball keys
    pub fn ball_keys(&self) -> impl Iterator<Item = BallKey> + '_ {
        self.balls.keys()
    }

    /// Iterate over keys and balls
    pub fn iter(&self) -> impl Iterator<Item = (BallKey, &Ball)> {
        self.balls.iter()
    }

    /// Set a ball's planar velocity
    pub fn set_velocity(&mut self, key: BallKey, velocity: PlaneVec) -> Result<(), PhysicsError> {
        let ball = self.balls.get_mut(key).ok_or(PhysicsError::UnknownBall(key))?;
        ball.set_velocity(velocity);
        Ok(())
    }

    /// Apply the same cushions to every ball
    pub fn set_wall_bounds(&mut self, bounds: WallBounds) {
        for ball in self.balls.values_mut() {
            ball.set_wall_bounds(bounds);
        }
    }

    /// Sum of planar momentum over all balls
    pub fn total_momentum(&self) -> PlaneVec {
        self.balls
            .values()
            .fold(PlaneVec::ZERO, |acc, ball| acc + ball.momentum())
    }

    /// Sum of translational kinetic energy over all balls
    pub fn kinetic_energy(&self) -> f64 {
        self.balls.values().map(Ball::kinetic_energy).sum()
    }

    /// True when every ball is slower than `threshold`
    pub fn is_settled(&self, threshold: f64) -> bool {
        self.balls.values().all(|ball| ball.speed() < threshold)
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Contact detection and resolution for every unordered pair, once
    /// 2. Integration of every ball (movement, cushions, friction)
    /// 3. A finiteness check of the resulting state
    ///
    /// Resolution is a single pass; a ball touching several others can end
    /// the step slightly overlapping one of them.
    pub fn step(&mut self, dt: f64) -> Result<StepReport, PhysicsError> {
        let mut report = StepReport::default();

        // Phase 1: ball-ball contacts
        let keys: Vec<BallKey> = self.balls.keys().collect();
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);
                let Some([a, b]) = self.balls.get_disjoint_mut([key_a, key_b]) else {
                    continue;
                };
                if !detect_collision(a, b) {
                    continue;
                }
                let response = handle_collision(a, b);
                log::debug!(
                    "Contact {:?} <-> {:?}: angle {:.4} rad, overlap {:.5}",
                    key_a,
                    key_b,
                    response.angle,
                    response.overlap
                );
                report.contacts.push(Contact { a: key_a, b: key_b, response });
            }
        }

        // Phase 2: integrate
        for (key, ball) in &mut self.balls {
            let outcome = integrate(ball, dt, &self.material);
            if !outcome.wall_hits.is_empty() {
                log::debug!("Cushion hit {:?} on {:?}", outcome.wall_hits, key);
            }
            report.outcomes.push((key, outcome));
        }

        // Phase 3: invariants
        if let Some((key, _)) = self.balls.iter().find(|(_, ball)| !ball.is_finite()) {
            log::error!("Ball {:?} left the step with non-finite state", key);
            return Err(PhysicsError::NonFiniteState(key));
        }

        log::trace!(
            "Step dt={:.4}: {} contacts, {} cushion hits",
            dt,
            report.contacts.len(),
            report.wall_hits()
        );
        Ok(report)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
