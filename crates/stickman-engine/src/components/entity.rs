use glam::Vec2;
use crate::api::types::{EntityId, Facing};
use crate::components::bullet::{Bullet, BULLET_SIZE};
use crate::components::hero::{Hero, HeroSize};
use crate::components::layer::Layer;
use crate::components::slime::{Slime, SLIME_SIZE};
use crate::core::world::World;

pub const MUSHROOM_SIZE: Vec2 = Vec2::new(24.0, 24.0);
pub const FLAG_SIZE: Vec2 = Vec2::new(20.0, 80.0);
pub const BANNER_SIZE: Vec2 = Vec2::new(200.0, 200.0);

/// End-of-game overlay shown over the last level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Win,
    Over,
}

/// Closed set of entity variants. Variant state lives inside the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Hero(Hero),
    Slime(Slime),
    Bullet(Bullet),
    Platform,
    Flag,
    Mushroom,
    Banner(BannerKind),
}

/// Which derived registries an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub movable: bool,
    pub interactable: bool,
    pub projectile: bool,
}

impl EntityKind {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            EntityKind::Hero(_) => Capabilities { movable: true, ..Default::default() },
            EntityKind::Slime(_) => Capabilities { movable: true, interactable: true, projectile: false },
            EntityKind::Bullet(_) => Capabilities { movable: true, interactable: false, projectile: true },
            EntityKind::Flag | EntityKind::Mushroom => Capabilities { interactable: true, ..Default::default() },
            EntityKind::Platform | EntityKind::Banner(_) => Capabilities::default(),
        }
    }

    /// Whether this variant counts as a kill when it dies.
    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Slime(_))
    }
}

/// Side effect of a player interaction that the level itself must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The hero touched the goal.
    Win,
    /// The hero was hit.
    HeroDown,
}

/// Fat entity — one struct for everything placed in a level.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier within a level.
    pub id: EntityId,
    /// Visual tag for the presentation layer; opaque to the simulation.
    pub tag: String,
    /// False means pending removal at the end of the tick.
    pub active: bool,
    /// Blocks movement of movers.
    pub solid: bool,
    /// Top-left corner, y grows downward.
    pub pos: Vec2,
    /// Width and height.
    pub size: Vec2,
    pub layer: Layer,
    pub kind: EntityKind,
}

impl Entity {
    /// Create an entity of the given kind. Solidity follows the kind.
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            solid: matches!(kind, EntityKind::Platform),
            pos,
            size,
            layer: Layer::Foreground,
            kind,
        }
    }

    pub fn hero(id: EntityId, pos: Vec2, size: HeroSize) -> Self {
        Self::new(id, EntityKind::Hero(Hero::new()), pos, size.dimensions()).with_tag("hero")
    }

    pub fn slime(id: EntityId, pos: Vec2, colour: &str) -> Self {
        Self::new(id, EntityKind::Slime(Slime::new()), pos, SLIME_SIZE)
            .with_tag(format!("slime_{colour}"))
    }

    pub fn bullet(id: EntityId, pos: Vec2, facing: Facing) -> Self {
        Self::new(id, EntityKind::Bullet(Bullet::new(facing)), pos, BULLET_SIZE).with_tag("bullet")
    }

    pub fn platform(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self::new(id, EntityKind::Platform, pos, size)
            .with_tag("platform")
            .with_layer(Layer::Background)
    }

    pub fn flag(id: EntityId, pos: Vec2) -> Self {
        Self::new(id, EntityKind::Flag, pos, FLAG_SIZE).with_tag("flag")
    }

    pub fn mushroom(id: EntityId, pos: Vec2) -> Self {
        Self::new(id, EntityKind::Mushroom, pos, MUSHROOM_SIZE).with_tag("mushroom")
    }

    pub fn banner(id: EntityId, pos: Vec2, kind: BannerKind) -> Self {
        let tag = match kind {
            BannerKind::Win => "win",
            BannerKind::Over => "over",
        };
        Self::new(id, EntityKind::Banner(kind), pos, BANNER_SIZE)
            .with_tag(tag)
            .with_layer(Layer::Effect)
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    // -- Capabilities --

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn is_movable(&self) -> bool {
        self.capabilities().movable
    }

    pub fn is_interactable(&self) -> bool {
        self.capabilities().interactable
    }

    pub fn is_projectile(&self) -> bool {
        self.capabilities().projectile
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, EntityKind::Hero(_))
    }

    pub fn as_hero(&self) -> Option<&Hero> {
        match &self.kind {
            EntityKind::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    pub fn as_hero_mut(&mut self) -> Option<&mut Hero> {
        match &mut self.kind {
            EntityKind::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// Bounding-box overlap with another entity. Touching edges do not count.
    pub fn overlaps(&self, other: &Entity) -> bool {
        overlaps(self.pos, self.size, other.pos, other.size)
    }

    // -- Movable --

    /// Advance one tick using the rest of the level as read-only context.
    /// Non-movable entities ignore this.
    pub fn tick(&mut self, world: &World, hero_x: f32, floor: f32) {
        match &mut self.kind {
            EntityKind::Hero(hero) => hero.tick(&mut self.pos, self.size, world, floor),
            EntityKind::Slime(slime) => slime.tick(&mut self.pos, self.size, world, hero_x, floor),
            EntityKind::Bullet(bullet) => {
                if !bullet.tick(&mut self.pos) {
                    self.active = false;
                }
            }
            EntityKind::Platform
            | EntityKind::Flag
            | EntityKind::Mushroom
            | EntityKind::Banner(_) => {}
        }
    }

    // -- Interactable --

    /// Whether this interactable is touching the hero.
    pub fn check_collide(&self, hero: &Entity) -> bool {
        self.is_interactable() && self.active && hero.active && self.overlaps(hero)
    }

    /// Apply this interactable's effect to the hero. Effects the hero can
    /// absorb are applied in place; the rest are returned for the level.
    pub fn interact(&mut self, hero: &mut Entity) -> Option<Effect> {
        let hero_bottom = hero.pos.y + hero.size.y;
        let hero_state = hero.as_hero_mut()?;
        match &self.kind {
            EntityKind::Slime(_) => {
                if Slime::is_stomped_by(self.pos, self.size, hero_bottom) {
                    self.active = false;
                    hero_state.bounce();
                    None
                } else {
                    Some(Effect::HeroDown)
                }
            }
            EntityKind::Mushroom => {
                self.active = false;
                hero_state.upgraded = true;
                None
            }
            EntityKind::Flag => Some(Effect::Win),
            _ => None,
        }
    }

    // -- Projectile --

    /// Collide this projectile with a movable target.
    /// Damageable targets die with the projectile. Returns whether it hit.
    pub fn collide_with_movable(&mut self, target: &mut Entity) -> bool {
        if !self.is_projectile() || !self.active || !target.active || target.is_projectile() {
            return false;
        }
        if !target.kind.is_enemy() || !self.overlaps(target) {
            return false;
        }
        self.active = false;
        target.active = false;
        true
    }

    /// Collide this projectile with a static obstacle.
    /// Solid obstacles stop the projectile; everything else is passed through.
    pub fn collide_with_static(&mut self, target: &Entity) -> bool {
        if !self.is_projectile() || !self.active || !target.active {
            return false;
        }
        if !target.solid || target.is_movable() || !self.overlaps(target) {
            return false;
        }
        self.active = false;
        true
    }
}

/// Strict axis-aligned bounding-box overlap.
pub fn overlaps(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_at(x: f32, y: f32) -> Entity {
        Entity::hero(EntityId(99), Vec2::new(x, y), HeroSize::Normal)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Entity::platform(EntityId(1), Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Entity::platform(EntityId(2), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Entity::platform(EntityId(3), Vec2::new(9.9, 9.9), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn capability_table() {
        let hero = hero_at(0.0, 0.0);
        assert!(hero.is_movable() && !hero.is_interactable() && !hero.is_projectile());
        let slime = Entity::slime(EntityId(1), Vec2::ZERO, "red");
        assert!(slime.is_movable() && slime.is_interactable());
        let bullet = Entity::bullet(EntityId(2), Vec2::ZERO, Facing::Right);
        assert!(bullet.is_movable() && bullet.is_projectile() && !bullet.is_interactable());
        let platform = Entity::platform(EntityId(3), Vec2::ZERO, Vec2::ONE);
        assert!(platform.solid && platform.capabilities() == Capabilities::default());
        assert_eq!(platform.layer, Layer::Background);
        assert!(Entity::flag(EntityId(4), Vec2::ZERO).is_interactable());
        let banner = Entity::banner(EntityId(5), Vec2::ZERO, BannerKind::Over);
        assert_eq!(banner.tag, "over");
        assert_eq!(banner.layer, Layer::Effect);
        assert!(!banner.solid);
    }

    #[test]
    fn stomping_a_slime_kills_it() {
        let mut slime = Entity::slime(EntityId(1), Vec2::new(0.0, 100.0), "blue");
        // hero bottom at 105: above the slime's midpoint (110)
        let mut hero = hero_at(0.0, 65.0);
        assert!(slime.check_collide(&hero));
        assert_eq!(slime.interact(&mut hero), None);
        assert!(!slime.active);
        assert!(hero.as_hero().unwrap().vel.y < 0.0);
    }

    #[test]
    fn running_into_a_slime_downs_the_hero() {
        let mut slime = Entity::slime(EntityId(1), Vec2::new(0.0, 100.0), "blue");
        let mut hero = hero_at(5.0, 80.0);
        assert!(slime.check_collide(&hero));
        assert_eq!(slime.interact(&mut hero), Some(Effect::HeroDown));
        assert!(slime.active);
    }

    #[test]
    fn mushroom_upgrades_and_is_consumed() {
        let mut mushroom = Entity::mushroom(EntityId(1), Vec2::new(0.0, 20.0));
        let mut hero = hero_at(0.0, 0.0);
        assert_eq!(mushroom.interact(&mut hero), None);
        assert!(hero.as_hero().unwrap().upgraded);
        assert!(!mushroom.active);
        assert!(!mushroom.check_collide(&hero));
    }

    #[test]
    fn flag_reports_win() {
        let mut flag = Entity::flag(EntityId(1), Vec2::ZERO);
        let mut hero = hero_at(0.0, 0.0);
        assert_eq!(flag.interact(&mut hero), Some(Effect::Win));
    }

    #[test]
    fn bullet_kills_slime_and_itself() {
        let mut bullet = Entity::bullet(EntityId(1), Vec2::new(5.0, 105.0), Facing::Right);
        let mut slime = Entity::slime(EntityId(2), Vec2::new(0.0, 100.0), "red");
        assert!(bullet.collide_with_movable(&mut slime));
        assert!(!bullet.active && !slime.active);
    }

    #[test]
    fn bullet_stops_at_solids_only() {
        let mut bullet = Entity::bullet(EntityId(1), Vec2::new(5.0, 5.0), Facing::Right);
        let flag = Entity::flag(EntityId(2), Vec2::ZERO);
        assert!(!bullet.collide_with_static(&flag));
        assert!(bullet.active);
        let wall = Entity::platform(EntityId(3), Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(bullet.collide_with_static(&wall));
        assert!(!bullet.active);
    }

    #[test]
    fn bullet_expires_through_tick() {
        let mut bullet = Entity::bullet(EntityId(1), Vec2::ZERO, Facing::Left);
        for _ in 0..200 {
            bullet.tick(&World::empty(), 0.0, 1000.0);
        }
        assert!(!bullet.active);
        assert!(bullet.pos.x < 0.0);
    }
}
