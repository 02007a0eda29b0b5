use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::types::{EntityId, Transition};
use crate::components::entity::{Effect, Entity};
use crate::components::hero::{Hero, HeroSize};
use crate::core::scene::Scene;
use crate::core::world::split_world;
use crate::systems::collision::resolve_collisions;

/// Scoring cadence and bonuses. Shared by every level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelRules {
    /// Ticks per countdown step (one "second" of level time).
    pub score_interval: u32,
    /// Points for killing enemies, awarded at most once per tick.
    pub kill_bonus: u64,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            score_interval: 120,
            kill_bonus: 100,
        }
    }
}

/// Everything needed to construct a level besides its entities.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    /// Identifier of the level definition, used to reload it.
    pub source: String,
    pub width: f32,
    pub height: f32,
    /// y-coordinate of the ground.
    pub floor_height: f32,
    /// Hero spawn x; the hero always spawns standing on the floor.
    pub hero_x: f32,
    pub hero_size: HeroSize,
    /// Countdown budget; also the starting score.
    pub time: u64,
    pub lives: u32,
}

/// A running level: entities, hero, clock, score and lives.
#[derive(Debug, Clone)]
pub struct Level {
    source: String,
    width: f32,
    height: f32,
    floor_height: f32,
    hero_size: HeroSize,
    hero: EntityId,
    scene: Scene,
    time: u64,
    score: u64,
    lives: u32,
    active: bool,
    tick_count: u64,
    next_id: u32,
    rules: LevelRules,
}

impl Level {
    /// Build a level from its layout and placed entities.
    ///
    /// Entities with duplicate ids are dropped (first one wins). The hero is
    /// spawned last with a fresh id, standing on the floor at `hero_x`.
    pub fn new(layout: LevelLayout, entities: Vec<Entity>) -> Self {
        let mut scene = Scene::new();
        for entity in entities {
            if !scene.spawn(entity) {
                log::warn!("{}: dropped duplicate entity", layout.source);
            }
        }

        let next = scene.max_id().map_or(1, |id| id.0 + 1);
        let hero = EntityId(next);
        let size = layout.hero_size.dimensions();
        scene.spawn(Entity::hero(
            hero,
            Vec2::new(layout.hero_x, layout.floor_height - size.y),
            layout.hero_size,
        ));

        Self {
            source: layout.source,
            width: layout.width,
            height: layout.height,
            floor_height: layout.floor_height,
            hero_size: layout.hero_size,
            hero,
            scene,
            time: layout.time,
            score: layout.time,
            lives: layout.lives,
            active: true,
            tick_count: 0,
            next_id: next + 1,
            rules: LevelRules::default(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance the level by one tick. No-op on an inactive level.
    pub fn tick(&mut self) -> Transition {
        if !self.active {
            return Transition::Continue;
        }
        self.tick_count += 1;

        self.step_movables();

        let mut transition = Transition::Continue;
        for effect in resolve_collisions(&mut self.scene, self.hero) {
            transition = self.apply_effect(effect, transition);
        }

        self.prune();

        if self.tick_count % u64::from(self.rules.score_interval.max(1)) == 0 {
            self.count_down();
        }

        transition
    }

    fn step_movables(&mut self) {
        let hero_x = self.hero_x();
        let floor = self.floor_height;
        let movers = self.scene.indices_where(|e| e.is_movable());
        let entities = self.scene.as_mut_slice();
        for idx in movers {
            let (mover, world) = split_world(entities, idx);
            mover.tick(&world, hero_x, floor);
        }
    }

    /// Only the first terminal effect in a tick counts.
    fn apply_effect(&mut self, effect: Effect, so_far: Transition) -> Transition {
        if !so_far.is_continue() {
            log::debug!("{}: ignoring {:?} after {:?}", self.source, effect, so_far);
            return so_far;
        }
        match effect {
            Effect::Win => self.win(),
            Effect::HeroDown => self.hero_down(),
        }
    }

    /// Award the kill bonus once if any enemy died, then drop dead entities.
    fn prune(&mut self) {
        let killed = self
            .scene
            .iter()
            .any(|e| !e.active && e.is_movable() && e.is_interactable() && e.kind.is_enemy());
        if killed {
            self.score += self.rules.kill_bonus;
            log::debug!("{}: kill bonus, score {}", self.source, self.score);
        }
        self.scene.prune_inactive();
    }

    fn count_down(&mut self) {
        if self.time == 0 {
            self.score = self.score.saturating_sub(1);
        } else {
            self.time -= 1;
            self.score = self.score.saturating_sub(1);
        }
    }

    // -- Player commands --

    fn with_hero<R>(&mut self, f: impl FnOnce(&mut Hero) -> R) -> Option<R> {
        if !self.active {
            return None;
        }
        let hero = self.scene.get_mut(self.hero)?.as_hero_mut()?;
        Some(f(hero))
    }

    pub fn jump(&mut self) -> bool {
        self.with_hero(|h| h.jump()).unwrap_or(false)
    }

    pub fn move_left(&mut self) -> bool {
        self.with_hero(|h| h.move_left()).unwrap_or(false)
    }

    pub fn move_right(&mut self) -> bool {
        self.with_hero(|h| h.move_right()).unwrap_or(false)
    }

    pub fn stop_moving(&mut self) -> bool {
        self.with_hero(|h| h.stop()).unwrap_or(false)
    }

    /// Fire a bullet from the hero's leading edge. Requires an upgraded hero
    /// and an active level. Returns the new bullet's id.
    pub fn shoot(&mut self) -> Option<EntityId> {
        if !self.active {
            return None;
        }
        let hero = self.scene.get(self.hero)?;
        let state = hero.as_hero()?;
        if !state.upgraded {
            return None;
        }

        let x = if state.facing.is_left() {
            hero.pos.x
        } else {
            hero.pos.x + hero.size.x
        };
        let y = hero.pos.y + 2.0 * hero.size.x / 3.0;
        let facing = state.facing;

        let id = self.next_id();
        self.scene.spawn(Entity::bullet(id, Vec2::new(x, y), facing));
        log::debug!("{}: bullet {:?} fired {:?}", self.source, id, facing);
        Some(id)
    }

    // -- Lifecycle --

    /// The hero reached the goal. Deactivates the level.
    pub fn win(&mut self) -> Transition {
        if !self.active {
            return Transition::Continue;
        }
        self.active = false;
        log::info!("{}: level complete, score {}", self.source, self.score);
        Transition::Advance
    }

    /// The hero was hit: lose a life, then reload or end the game.
    pub fn hero_down(&mut self) -> Transition {
        if !self.active {
            return Transition::Continue;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.active = false;
            log::info!("{}: out of lives", self.source);
            Transition::GameOver
        } else {
            log::info!("{}: hero down, {} lives left", self.source, self.lives);
            Transition::Reload
        }
    }

    /// Add an entity to a running level, e.g. an end-of-game banner.
    /// Its id is replaced with a fresh one.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id();
        entity.id = id;
        self.scene.spawn(entity);
        id
    }

    // -- Accessors --

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    pub fn hero_size(&self) -> HeroSize {
        self.hero_size
    }

    pub fn hero_id(&self) -> EntityId {
        self.hero
    }

    pub fn hero(&self) -> Option<&Entity> {
        self.scene.get(self.hero)
    }

    pub fn hero_mut(&mut self) -> Option<&mut Entity> {
        self.scene.get_mut(self.hero)
    }

    pub fn hero_x(&self) -> f32 {
        self.hero().map_or(0.0, |h| h.pos.x)
    }

    pub fn hero_y(&self) -> f32 {
        self.hero().map_or(0.0, |h| h.pos.y)
    }

    /// The master entity set.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.scene.iter()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn rules(&self) -> LevelRules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: LevelRules) {
        self.rules = rules;
    }
}
