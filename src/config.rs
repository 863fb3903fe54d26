//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BILLIARDS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use billiards_physics::{
    BoundsError, FrictionModel, PhysicsMaterial, WallBounds, DEFAULT_CUSHION_DAMPING,
    DEFAULT_FRICTION,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Table configuration
    #[serde(default)]
    pub table: TableConfig,
    /// Simulation loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BILLIARDS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BILLIARDS_PHYSICS__FRICTION=0.99 -> physics.friction = 0.99
        figment = figment.merge(Env::prefixed("BILLIARDS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Per-frame velocity retention (1.0 = frictionless)
    pub friction: f64,
    /// Velocity scale on a cushion bounce
    pub cushion_damping: f64,
    /// `per_frame` or `time_scaled`
    pub friction_model: FrictionModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            cushion_damping: DEFAULT_CUSHION_DAMPING,
            friction_model: FrictionModel::PerFrame,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics engine's material
    pub fn to_material(&self) -> PhysicsMaterial {
        PhysicsMaterial::new(self.friction, self.cushion_damping)
            .with_friction_model(self.friction_model)
    }
}

/// Table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Layout file to load (RON)
    pub layout: String,
    /// Cushion half extents [x, z]; overrides the layout's bounds when set
    pub half_extents: Option<[f64; 2]>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            layout: "tables/standard.ron".to_string(),
            half_extents: None,
        }
    }
}

impl TableConfig {
    /// Cushions from `half_extents`, if configured
    pub fn wall_bounds(&self) -> Result<Option<WallBounds>, BoundsError> {
        self.half_extents
            .map(|[x, z]| WallBounds::centered(x, z))
            .transpose()
    }
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per frame in a headless run
    pub frame_dt: f64,
    /// Upper bound on frames in a headless run
    pub max_frames: u32,
    /// Speed below which every ball counts as at rest
    pub settle_threshold: f64,
    /// Velocity given to the cue ball at the start [x, z]
    pub break_velocity: [f64; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_dt: 1.0 / 60.0,
            max_frames: 3600,
            settle_threshold: 0.005,
            break_velocity: [3.0, 0.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show velocity arrows at startup
    pub show_arrows: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_arrows: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<BoundsError> for ConfigError {
    fn from(e: BoundsError) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
