use glam::Vec2;
use crate::components::entity::overlaps;
use crate::core::world::World;

/// Downward acceleration per tick (y grows downward).
pub const GRAVITY: f32 = 0.5;
/// Terminal fall speed per tick.
pub const MAX_FALL_SPEED: f32 = 10.0;

/// Apply gravity, move vertically and resolve landings against solids and the floor.
/// Returns whether the body ended the step standing on something.
pub fn fall(pos: &mut Vec2, size: Vec2, vel: &mut Vec2, world: &World, floor: f32) -> bool {
    vel.y = (vel.y + GRAVITY).min(MAX_FALL_SPEED);

    let prev_top = pos.y;
    let prev_bottom = pos.y + size.y;
    pos.y += vel.y;
    let top = pos.y;
    let bottom = pos.y + size.y;

    if vel.y >= 0.0 {
        let mut landing: Option<f32> = None;
        if bottom >= floor {
            landing = Some(floor);
        }
        for solid in world.solids() {
            if !spans_horizontally(pos.x, size.x, solid.pos.x, solid.size.x) {
                continue;
            }
            let solid_top = solid.pos.y;
            if prev_bottom <= solid_top && bottom >= solid_top {
                landing = Some(landing.map_or(solid_top, |l| l.min(solid_top)));
            }
        }
        if let Some(surface) = landing {
            pos.y = surface - size.y;
            vel.y = 0.0;
            return true;
        }
    } else {
        for solid in world.solids() {
            if !spans_horizontally(pos.x, size.x, solid.pos.x, solid.size.x) {
                continue;
            }
            let solid_bottom = solid.pos.y + solid.size.y;
            if prev_top >= solid_bottom && top < solid_bottom {
                pos.y = solid_bottom;
                vel.y = 0.0;
                break;
            }
        }
    }
    false
}

/// Move horizontally by `dx`, cancelling the move if it would overlap a solid.
/// Returns whether the move happened.
pub fn slide(pos: &mut Vec2, size: Vec2, dx: f32, world: &World) -> bool {
    if dx == 0.0 {
        return true;
    }
    let target = Vec2::new(pos.x + dx, pos.y);
    let blocked = world
        .solids()
        .any(|solid| overlaps(target, size, solid.pos, solid.size));
    if blocked {
        return false;
    }
    *pos = target;
    true
}

fn spans_horizontally(x: f32, w: f32, other_x: f32, other_w: f32) -> bool {
    x < other_x + other_w && other_x < x + w
}
