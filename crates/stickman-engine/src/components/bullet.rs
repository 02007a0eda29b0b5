use glam::Vec2;
use crate::api::types::Facing;

/// Bullet bounding box.
pub const BULLET_SIZE: Vec2 = Vec2::new(8.0, 4.0);
/// Horizontal speed per tick.
pub const BULLET_SPEED: f32 = 6.0;
/// Distance after which a bullet expires.
pub const BULLET_RANGE: f32 = 600.0;

/// A projectile fired by an upgraded hero. Flies straight, ignores gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub facing: Facing,
    /// Distance covered so far.
    pub travelled: f32,
}

impl Bullet {
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            travelled: 0.0,
        }
    }

    /// Advance one tick. Returns false once the bullet is out of range.
    pub fn tick(&mut self, pos: &mut Vec2) -> bool {
        pos.x += self.facing.sign() * BULLET_SPEED;
        self.travelled += BULLET_SPEED;
        self.travelled < BULLET_RANGE
    }
}
