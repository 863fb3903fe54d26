//! Table layout serialization
//!
//! A TableLayout is data only: the balls to place on a table and, optionally,
//! the cushions around them. Layouts are loaded from and saved to RON files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use billiards_math::{PlaneVec, Vec3};
use billiards_physics::WallBounds;

use crate::entity::Material;

/// Height of the table surface the standard rack sits on
pub const TABLE_HEIGHT: f64 = 0.88;

/// Mass of an object ball in the standard rack
pub const OBJECT_BALL_MASS: f64 = 0.17;

/// Mass of the cue ball in the standard rack
pub const CUE_BALL_MASS: f64 = 2.0;

/// Radius shared by every ball in the standard rack
pub const BALL_RADIUS: f64 = 0.03;

/// A serializable description of one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTemplate {
    /// Name for lookup
    pub name: String,
    /// Model asset for the renderer
    #[serde(default)]
    pub model_url: String,
    /// Initial planar velocity [x, z]
    #[serde(default)]
    pub speed: [f64; 2],
    pub mass: f64,
    pub radius: f64,
    /// Center [x, y, z]
    pub position: [f64; 3],
    /// Color as `#rrggbb`
    pub color: String,
    /// True for the designated striking ball
    #[serde(default)]
    pub cue: bool,
}

impl BallTemplate {
    /// Create an object ball at rest
    pub fn new(name: impl Into<String>, position: [f64; 3], color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_url: String::new(),
            speed: [0.0, 0.0],
            mass: OBJECT_BALL_MASS,
            radius: BALL_RADIUS,
            position,
            color: color.into(),
            cue: false,
        }
    }

    /// Set the model asset
    pub fn with_model_url(mut self, url: impl Into<String>) -> Self {
        self.model_url = url.into();
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the initial velocity
    pub fn with_speed(mut self, speed: [f64; 2]) -> Self {
        self.speed = speed;
        self
    }

    /// Mark as the striking ball
    pub fn as_cue(mut self) -> Self {
        self.cue = true;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position.into()
    }

    #[inline]
    pub fn velocity(&self) -> PlaneVec {
        self.speed.into()
    }

    /// Parsed color
    pub fn material(&self) -> Result<Material, LayoutLoadError> {
        Material::from_hex(&self.color).ok_or_else(|| {
            LayoutLoadError::Invalid(format!("ball '{}' has malformed color '{}'", self.name, self.color))
        })
    }
}

/// A serializable table layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Layout name (for display/debugging)
    pub name: String,
    /// Cushions applied to every ball; each ball keeps its default when absent
    #[serde(default)]
    pub wall_bounds: Option<WallBounds>,
    /// Balls on the table
    pub balls: Vec<BallTemplate>,
}

impl TableLayout {
    /// Create a new empty layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wall_bounds: None,
            balls: Vec::new(),
        }
    }

    /// Set the cushions
    pub fn with_wall_bounds(mut self, bounds: WallBounds) -> Self {
        self.wall_bounds = Some(bounds);
        self
    }

    /// Add a ball
    pub fn with_ball(mut self, ball: BallTemplate) -> Self {
        self.balls.push(ball);
        self
    }

    /// The standard rack: ten object balls in a triangle and a heavy cue ball
    pub fn standard() -> Self {
        let rack: [(f64, f64, &str); 10] = [
            (0.0, 0.0, "#ff0000"),
            (0.06, 0.06, "#0000ff"),
            (0.06, -0.06, "#0000ff"),
            (0.12, 0.12, "#00ff00"),
            (0.12, 0.0, "#00ff00"),
            (0.12, -0.12, "#00ff00"),
            (0.18, 0.18, "#ff00ff"),
            (0.18, 0.06, "#ff00ff"),
            (0.18, -0.06, "#ff00ff"),
            (0.18, -0.18, "#ff00ff"),
        ];

        let mut layout = Self::new("Standard");
        for (i, (x, z, color)) in rack.into_iter().enumerate() {
            let n = i + 1;
            layout = layout.with_ball(
                BallTemplate::new(format!("ball_{}", n), [x, TABLE_HEIGHT, z], color)
                    .with_model_url(format!("assets/ball_{}.glb", n)),
            );
        }
        layout.with_ball(
            BallTemplate::new("cue", [-0.5, TABLE_HEIGHT, 0.0], "#ffffff")
                .with_model_url("assets/ball_white.glb")
                .with_mass(CUE_BALL_MASS)
                .as_cue(),
        )
    }

    /// Find a ball by name
    pub fn get(&self, name: &str) -> Option<&BallTemplate> {
        self.balls.iter().find(|b| b.name == name)
    }

    /// Check names, colors, and the cue designation
    ///
    /// Mass and radius are checked when the balls are built.
    pub fn validate(&self) -> Result<(), LayoutLoadError> {
        if let Some(bounds) = self.wall_bounds {
            bounds
                .validated()
                .map_err(|e| LayoutLoadError::Invalid(format!("wall bounds: {}", e)))?;
        }
        let mut cues = 0;
        for (i, ball) in self.balls.iter().enumerate() {
            if ball.name.is_empty() {
                return Err(LayoutLoadError::Invalid(format!("ball #{} has no name", i)));
            }
            if self.balls[..i].iter().any(|b| b.name == ball.name) {
                return Err(LayoutLoadError::Invalid(format!("duplicate ball name '{}'", ball.name)));
            }
            ball.material()?;
            if ball.cue {
                cues += 1;
            }
        }
        if cues > 1 {
            return Err(LayoutLoadError::Invalid(format!("{} balls marked as cue", cues)));
        }
        Ok(())
    }

    /// Load and validate a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LayoutLoadError> {
        let contents = fs::read_to_string(path)?;
        let layout = Self::from_ron(&contents)?;
        Ok(layout)
    }

    /// Parse and validate a layout from RON text
    pub fn from_ron(contents: &str) -> Result<Self, LayoutLoadError> {
        let layout: Self = ron::from_str(contents)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Save a layout to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutSaveError> {
        let contents = self.to_ron()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize to pretty RON text
    pub fn to_ron(&self) -> Result<String, LayoutSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// Error type for layout loading
#[derive(Debug)]
pub enum LayoutLoadError {
    /// IO error (file not found, etc.)
    Io(io::Error),
    /// RON parsing error
    Parse(ron::error::SpannedError),
    /// Parsed but unusable
    Invalid(String),
}

impl From<io::Error> for LayoutLoadError {
    fn from(e: io::Error) -> Self {
        LayoutLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LayoutLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LayoutLoadError::Parse(e)
    }
}

impl std::fmt::Display for LayoutLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutLoadError::Io(e) => write!(f, "IO error: {}", e),
            LayoutLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            LayoutLoadError::Invalid(msg) => write!(f, "Invalid layout: {}", msg),
        }
    }
}

impl std::error::Error for LayoutLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutLoadError::Io(e) => Some(e),
            LayoutLoadError::Parse(e) => Some(e),
            LayoutLoadError::Invalid(_) => None,
        }
    }
}

/// Error type for layout saving
#[derive(Debug)]
pub enum LayoutSaveError {
    /// IO error
    Io(io::Error),
    /// RON serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LayoutSaveError {
    fn from(e: io::Error) -> Self {
        LayoutSaveError::Io(e)
    }
}

impl From<ron::Error> for LayoutSaveError {
    fn from(e: ron::Error) -> Self {
        LayoutSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LayoutSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutSaveError::Io(e) => write!(f, "IO error: {}", e),
            LayoutSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LayoutSaveError {}
