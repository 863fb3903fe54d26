//! GPU instance data for balls
//!
//! Packs each entity into a fixed-layout record a renderer can upload as an
//! instance buffer without further conversion.

use bytemuck::{Pod, Zeroable};

use crate::entity::BallEntity;
use crate::world::TableWorld;

/// Per-ball instance record
///
/// Layout (112 bytes):
/// - model: column-major 4x4 model matrix
/// - color: RGBA, highlight already applied
/// - arrow: xyz direction, w length
/// - flags: x arrow visible (0/1), y selected (0/1), zw unused
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub arrow: [f32; 4],
    pub flags: [f32; 4],
}

impl BallInstance {
    /// Pack one entity
    pub fn from_entity(entity: &BallEntity) -> Self {
        let [dx, dy, dz] = entity.arrow.direction.to_f32_array();
        Self {
            model: entity.transform.model_matrix(),
            color: entity.display_material().base_color,
            arrow: [dx, dy, dz, entity.arrow.length as f32],
            flags: [
                bool_flag(entity.arrow.visible),
                bool_flag(entity.is_selected()),
                0.0,
                0.0,
            ],
        }
    }
}

fn bool_flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Pack every entity on the table, in layout order
pub fn build_instances(world: &TableWorld) -> Vec<BallInstance> {
    world.entities().iter().map(BallInstance::from_entity).collect()
}

/// Pack only entities that changed, clearing their dirty flags
///
/// Returns (index, instance) pairs so a renderer can patch its buffer.
pub fn take_dirty_instances(world: &mut TableWorld) -> Vec<(usize, BallInstance)> {
    let mut out = Vec::new();
    for (i, entity) in world.entities_mut().iter_mut().enumerate() {
        if entity.is_dirty() {
            out.push((i, BallInstance::from_entity(entity)));
            entity.clear_dirty();
        }
    }
    log::trace!("{} dirty ball instances", out.len());
    out
}

/// View instances as raw bytes for upload
pub fn as_bytes(instances: &[BallInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
