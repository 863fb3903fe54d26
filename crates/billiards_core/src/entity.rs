//! Ball entity, material, and velocity arrow
//!
//! A BallEntity is the visual side of a physics ball: model, color,
//! transform, and the arrow that shows where it is heading.

use bitflags::bitflags;
use billiards_math::{PlaneVec, Vec3};
use billiards_physics::{Ball, BallKey, StepOutcome};
use serde::{Deserialize, Serialize};

use crate::BallTransform;

bitflags! {
    /// Flags indicating which parts of an entity changed since the last upload
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position or rotation changed
        const TRANSFORM = 1 << 0;
        /// Arrow direction, length, or visibility changed
        const ARROW = 1 << 1;
        /// Color or highlight changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::ARROW.bits() | Self::MATERIAL.bits();
    }
}

/// A simple material with just a base color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse an opaque color from `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|c| c as f32 / 255.0)
        };
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };

    /// Highlight for a selected ball
    pub const HIGHLIGHT: Self = Self { base_color: [1.0, 0.0, 0.0, 1.0] };
}

/// Velocity indicator drawn from a ball's center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowIndicator {
    /// Arrow origin (the ball center)
    pub position: Vec3,
    /// Unit direction in world space
    pub direction: Vec3,
    /// Arrow length (speed times `scale`)
    pub length: f64,
    /// Length drawn per unit of speed
    pub scale: f64,
    pub visible: bool,
}

impl ArrowIndicator {
    /// Arrow pointing up with unit length, as shown before the first frame
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::Y,
            length: 1.0,
            scale: 1.0,
            visible: true,
        }
    }

    /// Set the length drawn per unit of speed
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Follow a ball at `position` moving with `velocity`
    ///
    /// A ball at rest keeps its last direction instead of a zero vector;
    /// only the length drops to zero.
    pub fn update(&mut self, position: Vec3, velocity: PlaneVec) {
        self.position = position;
        let speed = velocity.length();
        if speed > 0.0 {
            self.direction = velocity.normalized().to_world(0.0);
        }
        self.length = speed * self.scale;
    }

    /// Flip visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// A ball on the table as the renderer sees it
pub struct BallEntity {
    /// Name for lookup
    pub name: String,
    /// Model asset the renderer loads for this ball
    pub model_url: String,
    /// The entity's material
    pub material: Material,
    /// The entity's transform in world space
    pub transform: BallTransform,
    /// Velocity indicator
    pub arrow: ArrowIndicator,
    /// True for the designated striking ball
    pub cue: bool,
    /// Key of the backing physics ball
    pub body: BallKey,
    selected: bool,
    dirty: DirtyFlags,
}

impl BallEntity {
    /// Create an entity for the physics ball `body`
    pub fn new(name: impl Into<String>, body: BallKey, ball: &Ball) -> Self {
        Self {
            name: name.into(),
            model_url: String::new(),
            material: Material::default(),
            transform: BallTransform::from_position(ball.position).with_scale(ball.radius()),
            arrow: ArrowIndicator::new(ball.position),
            cue: false,
            body,
            selected: false,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the model asset
    pub fn with_model_url(mut self, url: impl Into<String>) -> Self {
        self.model_url = url.into();
        self
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Mark as the striking ball
    pub fn with_cue(mut self, cue: bool) -> Self {
        self.cue = cue;
        self
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Store the highlight state
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.mark_dirty(DirtyFlags::MATERIAL);
        }
    }

    /// Color to draw with, taking the highlight into account
    pub fn display_material(&self) -> Material {
        if self.selected {
            Material::HIGHLIGHT
        } else {
            self.material
        }
    }

    /// Flip the velocity arrow
    pub fn toggle_arrow(&mut self) {
        self.arrow.toggle();
        self.mark_dirty(DirtyFlags::ARROW);
    }

    /// Apply one integration step of the backing ball
    ///
    /// The rolling rotation comes from `outcome`; position and arrow follow
    /// the ball's state after the step.
    pub fn sync(&mut self, ball: &Ball, outcome: &StepOutcome) {
        self.transform.position = ball.position;
        self.transform.rotate(outcome.roll);
        self.arrow.update(ball.position, ball.velocity);
        self.mark_dirty(DirtyFlags::TRANSFORM | DirtyFlags::ARROW);
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}
