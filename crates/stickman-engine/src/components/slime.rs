use glam::Vec2;
use crate::api::types::Facing;
use crate::core::world::World;
use crate::systems::movement::{fall, slide};

/// Default slime bounding box.
pub const SLIME_SIZE: Vec2 = Vec2::new(30.0, 20.0);
/// Horizontal chase speed per tick.
pub const CHASE_SPEED: f32 = 1.0;
/// The slime only chases a hero closer than this (horizontal distance).
pub const CHASE_RANGE: f32 = 300.0;

/// Enemy that creeps toward the hero.
#[derive(Debug, Clone, PartialEq)]
pub struct Slime {
    pub vel: Vec2,
    pub facing: Facing,
    pub grounded: bool,
}

impl Slime {
    pub fn new() -> Self {
        Self {
            vel: Vec2::ZERO,
            facing: Facing::Left,
            grounded: false,
        }
    }

    pub fn tick(&mut self, pos: &mut Vec2, size: Vec2, world: &World, hero_x: f32, floor: f32) {
        let center = pos.x + size.x / 2.0;
        let gap = hero_x - center;
        if gap.abs() > CHASE_SPEED && gap.abs() < CHASE_RANGE {
            self.facing = if gap < 0.0 { Facing::Left } else { Facing::Right };
            slide(pos, size, self.facing.sign() * CHASE_SPEED, world);
        }
        self.grounded = fall(pos, size, &mut self.vel, world, floor);
    }

    /// Whether a hero with the given bottom edge lands on top of this slime
    /// rather than running into it.
    pub fn is_stomped_by(slime_pos: Vec2, slime_size: Vec2, hero_bottom: f32) -> bool {
        hero_bottom <= slime_pos.y + slime_size.y / 2.0
    }
}

impl Default for Slime {
    fn default() -> Self {
        Self::new()
    }
}
