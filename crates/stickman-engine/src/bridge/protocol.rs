/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Status: 16 floats]
/// [Instances: max_instances × 8 floats]
/// ```
///
/// The instance capacity is written into the status block every frame.
/// TypeScript reads it from there to compute offsets.

use bytemuck::{Pod, Zeroable};
use crate::api::game::GameConfig;
use crate::api::session::Session;
use crate::renderer::instance::EntityInstance;

/// Number of floats in the status section.
pub const HEADER_FLOATS: usize = 16;

/// Status field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_LEVEL_WIDTH: usize = 4;
pub const HEADER_LEVEL_HEIGHT: usize = 5;
pub const HEADER_FLOOR_HEIGHT: usize = 6;
pub const HEADER_HERO_X: usize = 7;
pub const HEADER_HERO_Y: usize = 8;
pub const HEADER_TIME: usize = 9;
pub const HEADER_SCORE: usize = 10;
pub const HEADER_TOTAL_SCORE: usize = 11;
pub const HEADER_LIVES: usize = 12;
pub const HEADER_LEVEL_INDEX: usize = 13;
pub const HEADER_LEVEL_COUNT: usize = 14;
pub const HEADER_ACTIVE: usize = 15;

/// Protocol version written into the status block.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// HUD readout for the presentation layer, one per frame.
/// Field order matches the `HEADER_*` indices.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StatusBlock {
    pub frame_counter: f32,
    pub protocol_version: f32,
    pub max_instances: f32,
    pub instance_count: f32,
    pub level_width: f32,
    pub level_height: f32,
    pub floor_height: f32,
    pub hero_x: f32,
    pub hero_y: f32,
    pub time: f32,
    pub score: f32,
    pub total_score: f32,
    pub lives: f32,
    /// 1-based index of the current level.
    pub level_index: f32,
    pub level_count: f32,
    /// 1.0 while the level accepts commands, 0.0 once it is finished.
    pub active: f32,
}

impl StatusBlock {
    pub const FLOATS: usize = HEADER_FLOATS;

    /// Capture the session state for one frame.
    pub fn from_session(
        session: &Session,
        frame_counter: u32,
        instance_count: u32,
        max_instances: usize,
    ) -> Self {
        let level = session.level();
        Self {
            frame_counter: frame_counter as f32,
            protocol_version: PROTOCOL_VERSION,
            max_instances: max_instances as f32,
            instance_count: instance_count as f32,
            level_width: level.width(),
            level_height: level.height(),
            floor_height: level.floor_height(),
            hero_x: level.hero_x(),
            hero_y: level.hero_y(),
            time: level.time() as f32,
            score: level.score() as f32,
            total_score: session.total_score() as f32,
            lives: level.lives() as f32,
            level_index: session.level_index() as f32,
            level_count: session.level_count() as f32,
            active: if level.is_active() { 1.0 } else { 0.0 },
        }
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    /// Raw pointer for SharedArrayBuffer reads.
    pub fn as_ptr(&self) -> *const f32 {
        self as *const Self as *const f32
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum entity instances.
    pub max_instances: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * EntityInstance::FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;
        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances)
    }
}
