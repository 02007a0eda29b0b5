use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::types::Facing;
use crate::core::world::World;
use crate::systems::movement::{fall, slide};

/// Horizontal run speed per tick while a move intent is held.
pub const RUN_SPEED: f32 = 3.0;
/// Vertical velocity applied on jump (negative is up).
pub const JUMP_IMPULSE: f32 = -10.0;

/// Size class of the hero, chosen by the level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroSize {
    Tiny,
    #[default]
    Normal,
    Large,
    Giant,
}

impl HeroSize {
    /// Width and height of the hero's bounding box.
    pub fn dimensions(self) -> Vec2 {
        match self {
            HeroSize::Tiny => Vec2::new(12.0, 24.0),
            HeroSize::Normal => Vec2::new(20.0, 40.0),
            HeroSize::Large => Vec2::new(30.0, 60.0),
            HeroSize::Giant => Vec2::new(40.0, 80.0),
        }
    }
}

/// The player-controlled character.
///
/// Commands only set intent; the position changes on the next tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub vel: Vec2,
    pub facing: Facing,
    /// Whether a move intent is currently held.
    pub moving: bool,
    pub grounded: bool,
    /// Picked up a mushroom; allows shooting.
    pub upgraded: bool,
}

impl Hero {
    pub fn new() -> Self {
        Self {
            vel: Vec2::ZERO,
            facing: Facing::Right,
            moving: false,
            grounded: true,
            upgraded: false,
        }
    }

    /// Start a jump. Fails while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.facing = Facing::Left;
        self.moving = true;
        true
    }

    pub fn move_right(&mut self) -> bool {
        self.facing = Facing::Right;
        self.moving = true;
        true
    }

    pub fn stop(&mut self) -> bool {
        self.moving = false;
        true
    }

    /// Small hop after stomping an enemy.
    pub fn bounce(&mut self) {
        self.vel.y = JUMP_IMPULSE / 2.0;
        self.grounded = false;
    }

    /// Advance one tick: apply intent, then gravity and landing.
    pub fn tick(&mut self, pos: &mut Vec2, size: Vec2, world: &World, floor: f32) {
        if self.moving {
            slide(pos, size, self.facing.sign() * RUN_SPEED, world);
        }
        self.grounded = fall(pos, size, &mut self.vel, world, floor);
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}
