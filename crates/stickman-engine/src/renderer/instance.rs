use bytemuck::{Pod, Zeroable};
use crate::components::entity::{BannerKind, Entity, EntityKind};
use crate::core::level::Level;

/// Per-entity readout for the presentation layer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    /// Entity id, exact for ids below 2^24.
    pub id: f32,
    /// Top-left x in level space.
    pub x: f32,
    /// Top-left y in level space, y grows downward.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Variant code, see [`kind_code`].
    pub kind: f32,
    /// -1 facing left, +1 facing right, 0 for entities without facing.
    pub facing: f32,
    /// Draw layer, back to front.
    pub layer: f32,
}

impl EntityInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_entity(entity: &Entity) -> Self {
        let facing = match &entity.kind {
            EntityKind::Hero(hero) => hero.facing.sign(),
            EntityKind::Slime(slime) => slime.facing.sign(),
            EntityKind::Bullet(bullet) => bullet.facing.sign(),
            _ => 0.0,
        };
        Self {
            id: entity.id.0 as f32,
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            kind: kind_code(&entity.kind),
            facing,
            layer: entity.layer.as_u8() as f32,
        }
    }
}

/// Numeric variant code shared with the presentation layer.
pub fn kind_code(kind: &EntityKind) -> f32 {
    match kind {
        EntityKind::Hero(_) => 0.0,
        EntityKind::Slime(_) => 1.0,
        EntityKind::Bullet(_) => 2.0,
        EntityKind::Platform => 3.0,
        EntityKind::Flag => 4.0,
        EntityKind::Mushroom => 5.0,
        EntityKind::Banner(BannerKind::Win) => 6.0,
        EntityKind::Banner(BannerKind::Over) => 7.0,
    }
}

/// Instances for one frame plus the visual tags, in the same order.
pub struct InstanceBuffer {
    pub instances: Vec<EntityInstance>,
    /// Visual tag of each instance; strings don't fit the float buffer.
    pub tags: Vec<String>,
    max_instances: usize,
}

impl InstanceBuffer {
    pub fn new(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            tags: Vec::with_capacity(max_instances),
            max_instances,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.tags.clear();
    }

    /// Append an entity. Returns false once the buffer is full.
    pub fn push(&mut self, entity: &Entity) -> bool {
        if self.instances.len() >= self.max_instances {
            return false;
        }
        self.instances.push(EntityInstance::from_entity(entity));
        self.tags.push(entity.tag.clone());
        true
    }

    /// Rebuild from a level: active entities in master-set order, stable-sorted
    /// by layer so later layers draw on top.
    pub fn rebuild(&mut self, level: &Level) {
        self.clear();
        let mut entities: Vec<&Entity> = level.entities().filter(|e| e.active).collect();
        entities.sort_by_key(|e| e.layer);
        let mut dropped = 0;
        for entity in entities {
            if !self.push(entity) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("instance buffer full, {} entities not drawn", dropped);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    pub fn tag(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::hero::HeroSize;
    use crate::core::level::LevelLayout;
    use glam::Vec2;

    fn level() -> Level {
        Level::new(
            LevelLayout {
                source: "levels/draw.json".into(),
                width: 1000.0,
                height: 500.0,
                floor_height: 400.0,
                hero_x: 10.0,
                hero_size: HeroSize::Normal,
                time: 30,
                lives: 1,
            },
            vec![
                Entity::platform(EntityId(1), Vec2::new(100.0, 300.0), Vec2::new(50.0, 10.0)),
                Entity::slime(EntityId(2), Vec2::new(600.0, 380.0), "red"),
            ],
        )
    }

    #[test]
    fn entity_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<EntityInstance>(), 32);
        assert_eq!(EntityInstance::STRIDE_BYTES, 32);
    }

    #[test]
    fn rebuild_follows_the_level() {
        let mut level = level();
        level.spawn(Entity::banner(EntityId(0), Vec2::ZERO, BannerKind::Over));
        let mut buf = InstanceBuffer::new(16);
        buf.rebuild(&level);

        assert_eq!(buf.instance_count(), 4);
        assert_eq!(buf.tag(0), Some("platform"));
        assert_eq!(buf.tag(1), Some("slime_red"));
        assert_eq!(buf.tag(2), Some("hero"));
        // banner is on the effect layer, drawn last
        assert_eq!(buf.tag(3), Some("over"));
        assert_eq!(buf.instances[3].kind, 7.0);

        let hero = buf.instances[2];
        assert_eq!(hero.id, level.hero_id().0 as f32);
        assert_eq!((hero.x, hero.y), (10.0, 360.0));
        assert_eq!(hero.facing, 1.0);
        assert_eq!(buf.as_floats().len(), 4 * EntityInstance::FLOATS);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = InstanceBuffer::new(2);
        buf.rebuild(&level());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.tag(2), None);
    }
}
