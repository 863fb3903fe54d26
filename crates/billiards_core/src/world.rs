//! Table world
//!
//! The TableWorld owns the physics world and one entity per ball, and keeps
//! the entities in sync after each physics step.

use std::fmt;

use billiards_math::PlaneVec;
use billiards_physics::{
    Ball, BallKey, PhysicsError, PhysicsMaterial, PhysicsWorld, StepReport, WallBounds,
};

use crate::entity::BallEntity;
use crate::layout::{LayoutLoadError, TableLayout};

/// A table with its balls, ready to simulate
pub struct TableWorld {
    /// Layout name this table was built from
    pub name: String,
    physics: PhysicsWorld,
    entities: Vec<BallEntity>,
}

impl TableWorld {
    /// Create an empty table
    pub fn new(material: PhysicsMaterial) -> Self {
        Self {
            name: String::new(),
            physics: PhysicsWorld::with_material(material),
            entities: Vec::new(),
        }
    }

    /// Build a table from a layout
    ///
    /// Every ball is validated; the first invalid one aborts the build.
    pub fn from_layout(layout: &TableLayout, material: PhysicsMaterial) -> Result<Self, TableError> {
        layout.validate()?;

        let mut world = Self::new(material);
        world.name = layout.name.clone();

        for template in &layout.balls {
            let mut ball = Ball::new(template.position(), template.mass, template.radius)
                .and_then(|ball| ball.try_with_velocity(template.velocity()))
                .map_err(PhysicsError::from)?;
            if let Some(bounds) = layout.wall_bounds {
                ball.set_wall_bounds(bounds);
            }

            let entity_material = template.material()?;
            let key = world.physics.add_ball(ball.clone());
            let entity = BallEntity::new(template.name.clone(), key, &ball)
                .with_model_url(template.model_url.clone())
                .with_material(entity_material)
                .with_cue(template.cue);
            world.entities.push(entity);
        }

        log::info!(
            "Built table '{}' with {} balls",
            world.name,
            world.entities.len()
        );
        Ok(world)
    }

    /// Get a reference to the physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// All entities in layout order
    pub fn entities(&self) -> &[BallEntity] {
        &self.entities
    }

    /// All entities in layout order (mutable)
    pub fn entities_mut(&mut self) -> &mut [BallEntity] {
        &mut self.entities
    }

    /// Get the number of balls on the table
    pub fn ball_count(&self) -> usize {
        self.entities.len()
    }

    /// Find an entity by name
    pub fn get_by_name(&self, name: &str) -> Option<&BallEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Physics ball behind a named entity
    pub fn ball(&self, name: &str) -> Option<&Ball> {
        self.get_by_name(name)
            .and_then(|e| self.physics.get_ball(e.body))
    }

    /// The designated striking ball
    pub fn cue_ball(&self) -> Option<&BallEntity> {
        self.entities.iter().find(|e| e.cue)
    }

    /// Set a ball's velocity
    pub fn strike(&mut self, name: &str, velocity: PlaneVec) -> Result<(), TableError> {
        let key = self.key_of(name)?;
        self.physics.set_velocity(key, velocity)?;
        log::info!("Struck '{}' with velocity ({:.3}, {:.3})", name, velocity.x, velocity.z);
        Ok(())
    }

    /// Highlight one ball and clear every other highlight
    pub fn select(&mut self, name: &str) -> Result<(), TableError> {
        self.key_of(name)?;
        for entity in &mut self.entities {
            entity.set_selected(entity.name == name);
        }
        Ok(())
    }

    /// Flip every velocity arrow
    pub fn toggle_arrows(&mut self) {
        for entity in &mut self.entities {
            entity.toggle_arrow();
        }
    }

    /// Apply the same cushions to every ball
    pub fn set_wall_bounds(&mut self, bounds: WallBounds) {
        self.physics.set_wall_bounds(bounds);
    }

    /// Update the table by stepping physics and syncing entity transforms
    pub fn update(&mut self, dt: f64) -> Result<StepReport, TableError> {
        let report = self.physics.step(dt)?;

        for entity in &mut self.entities {
            let Some(ball) = self.physics.get_ball(entity.body) else {
                continue;
            };
            if let Some(outcome) = report.outcome(entity.body) {
                entity.sync(ball, outcome);
            }
        }

        Ok(report)
    }

    /// True when every ball is slower than `threshold`
    pub fn is_settled(&self, threshold: f64) -> bool {
        self.physics.is_settled(threshold)
    }

    fn key_of(&self, name: &str) -> Result<BallKey, TableError> {
        self.get_by_name(name)
            .map(|e| e.body)
            .ok_or_else(|| TableError::UnknownBall(name.to_string()))
    }
}

/// Error type for table operations
#[derive(Debug)]
pub enum TableError {
    /// The layout could not be used
    Layout(LayoutLoadError),
    /// The physics world rejected a ball or a step
    Physics(PhysicsError),
    /// No ball with this name
    UnknownBall(String),
}

impl From<LayoutLoadError> for TableError {
    fn from(e: LayoutLoadError) -> Self {
        TableError::Layout(e)
    }
}

impl From<PhysicsError> for TableError {
    fn from(e: PhysicsError) -> Self {
        TableError::Physics(e)
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Layout(e) => write!(f, "Layout error: {}", e),
            TableError::Physics(e) => write!(f, "Physics error: {}", e),
            TableError::UnknownBall(name) => write!(f, "No ball named '{}'", name),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Layout(e) => Some(e),
            TableError::Physics(e) => Some(e),
            TableError::UnknownBall(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BallTemplate;
    use billiards_physics::BallError;

    fn standard() -> TableWorld {
        TableWorld::from_layout(&TableLayout::standard(), PhysicsMaterial::default()).unwrap()
    }

    #[test]
    fn test_from_layout_builds_every_ball() {
        let world = standard();
        assert_eq!(world.ball_count(), 11);
        assert_eq!(world.physics().ball_count(), 11);
        assert_eq!(world.name, "Standard");

        for entity in world.entities() {
            let ball = world.physics().get_ball(entity.body).unwrap();
            assert_eq!(entity.transform.position, ball.position);
        }
    }

    #[test]
    fn test_cue_ball() {
        let world = standard();
        let cue = world.cue_ball().unwrap();
        assert_eq!(cue.name, "cue");
        assert_eq!(world.ball("cue").unwrap().mass(), 2.0);
    }

    #[test]
    fn test_layout_wall_bounds_applied() {
        let bounds = WallBounds::centered(1.27, 0.635).unwrap();
        let layout = TableLayout::standard().with_wall_bounds(bounds);
        let world = TableWorld::from_layout(&layout, PhysicsMaterial::default()).unwrap();

        for (_, ball) in world.physics().iter() {
            assert_eq!(*ball.wall_bounds(), bounds);
        }
    }

    #[test]
    fn test_from_layout_rejects_bad_mass() {
        let layout = TableLayout::new("Bad")
            .with_ball(BallTemplate::new("a", [0.0, 0.88, 0.0], "#ffffff").with_mass(0.0));

        let err = TableWorld::from_layout(&layout, PhysicsMaterial::default()).err().unwrap();
        assert!(matches!(
            err,
            TableError::Physics(PhysicsError::Ball(BallError::InvalidMass(_)))
        ));
    }

    #[test]
    fn test_from_layout_rejects_non_finite_speed() {
        let layout = TableLayout::new("Bad").with_ball(
            BallTemplate::new("a", [0.0, 0.88, 0.0], "#ffffff").with_speed([f64::NAN, 0.0]),
        );

        let err = TableWorld::from_layout(&layout, PhysicsMaterial::default()).err().unwrap();
        assert!(matches!(
            err,
            TableError::Physics(PhysicsError::Ball(BallError::NonFinite))
        ));
    }

    #[test]
    fn test_from_layout_rejects_bad_color() {
        let layout = TableLayout::new("Bad").with_ball(BallTemplate::new("a", [0.0; 3], "#12"));

        let err = TableWorld::from_layout(&layout, PhysicsMaterial::default()).err().unwrap();
        assert!(matches!(err, TableError::Layout(LayoutLoadError::Invalid(_))));
    }

    #[test]
    fn test_strike_unknown_ball() {
        let mut world = standard();
        let err = world.strike("ball_99", PlaneVec::X).unwrap_err();
        assert!(matches!(err, TableError::UnknownBall(ref n) if n == "ball_99"));
    }

    #[test]
    fn test_strike_and_update_syncs_entities() {
        let mut world = standard();
        world.strike("cue", PlaneVec::new(1.0, 0.0)).unwrap();

        let before = world.get_by_name("cue").unwrap().transform.position;
        world.update(1.0 / 60.0).unwrap();

        let cue = world.get_by_name("cue").unwrap();
        let ball = world.ball("cue").unwrap();
        assert!(cue.transform.position.x > before.x);
        assert_eq!(cue.transform.position, ball.position);
        assert_eq!(cue.arrow.position, ball.position);
        assert!((cue.arrow.length - ball.speed()).abs() < 1e-12);
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut world = standard();
        world.select("ball_1").unwrap();
        world.select("ball_2").unwrap();

        let selected: Vec<_> = world
            .entities()
            .iter()
            .filter(|e| e.is_selected())
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(selected, vec!["ball_2"]);
        assert!(world.select("nope").is_err());
    }

    #[test]
    fn test_toggle_arrows() {
        let mut world = standard();
        world.toggle_arrows();
        assert!(world.entities().iter().all(|e| !e.arrow.visible));
    }

    #[test]
    fn test_break_shot_reaches_rack() {
        let mut world = standard();
        world.strike("cue", PlaneVec::new(2.0, 0.0)).unwrap();

        let mut contacts = 0;
        for _ in 0..60 {
            contacts += world.update(1.0 / 60.0).unwrap().contacts.len();
        }

        assert!(contacts > 0);
        let red = world.ball("ball_1").unwrap();
        assert!(red.speed() > 0.0);
    }
}
