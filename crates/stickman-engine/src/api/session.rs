use glam::Vec2;
use crate::api::types::{EntityId, Transition};
use crate::assets::config::SessionConfig;
use crate::assets::loader::{LevelLoader, LoadError};
use crate::components::entity::{BannerKind, Entity};
use crate::core::level::Level;

/// Offset of the end-of-game banner from the hero's position.
const BANNER_OFFSET: f32 = 200.0;

/// Saved session state: enough to put the player back where they were.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Snapshot of the level at save time (without hero).
    pub level: Level,
    pub total_score: u64,
    /// Number of levels started so far, including the saved one.
    pub level_index: usize,
    pub hero_y: f32,
}

/// Single quick-save slot.
#[derive(Debug, Clone, Default)]
pub struct CheckpointSlot {
    checkpoint: Option<Checkpoint>,
}

impl CheckpointSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, checkpoint: Checkpoint) {
        self.checkpoint = Some(checkpoint);
    }

    pub fn get(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref()
    }
}

/// Sequences levels, carries score and lives across them and keeps checkpoints.
pub struct Session {
    loader: Box<dyn LevelLoader>,
    config: SessionConfig,
    sources: Vec<String>,
    level: Level,
    total_score: u64,
    /// Number of levels started so far; the current one is `level_index - 1`.
    level_index: usize,
    slot: CheckpointSlot,
}

impl Session {
    /// Load the first configured level. Fails if there are no levels or the
    /// first one cannot be loaded.
    pub fn start(config: SessionConfig, loader: Box<dyn LevelLoader>) -> Result<Self, LoadError> {
        let sources = config.level_sources();
        let first = sources.first().ok_or(LoadError::NoLevels)?;
        let mut level = loader.load(first)?;
        level.set_rules(config.rules);
        log::info!("session started with {} levels, first {}", sources.len(), first);

        Ok(Self {
            loader,
            config,
            sources,
            level,
            total_score: 0,
            level_index: 1,
            slot: CheckpointSlot::new(),
        })
    }

    fn load(&self, source: &str) -> Result<Level, LoadError> {
        let mut level = self.loader.load(source)?;
        level.set_rules(self.config.rules);
        Ok(level)
    }

    /// Advance the current level by one tick and act on its outcome.
    pub fn tick(&mut self) -> Transition {
        let transition = self.level.tick();
        self.apply(transition);
        transition
    }

    /// Act on a transition reported by the level.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Continue => {}
            Transition::Advance => {
                if let Err(err) = self.next_level() {
                    log::warn!("could not advance: {err}");
                }
            }
            Transition::Reload => {
                if let Err(err) = self.reload() {
                    log::warn!("could not reload: {err}");
                }
            }
            Transition::GameOver => self.end_game(),
        }
    }

    /// Bank the level score and move on, or finish the game after the last level.
    /// On a load failure the finished level stays in place.
    pub fn next_level(&mut self) -> Result<(), LoadError> {
        let Some(source) = self.sources.get(self.level_index).cloned() else {
            self.total_score += self.level.score();
            self.spawn_banner(BannerKind::Win);
            log::info!("game complete, total score {}", self.total_score);
            return Ok(());
        };

        let mut level = self.load(&source)?;
        level.set_lives(self.level.lives());
        self.total_score += self.level.score();
        self.level = level;
        self.level_index += 1;
        log::info!("advanced to {} ({} / {})", source, self.level_index, self.sources.len());
        Ok(())
    }

    /// Restart the current level definition, keeping score and lives.
    /// On a load failure the current level stays in place.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let score = self.level.score();
        let lives = self.level.lives();
        let mut level = self.load(self.level.source())?;
        level.set_score(score);
        level.set_lives(lives);
        self.level = level;
        log::info!("reloaded {}", self.level.source());
        Ok(())
    }

    /// Bank the level score and show the game-over banner.
    pub fn end_game(&mut self) {
        self.total_score += self.level.score();
        self.spawn_banner(BannerKind::Over);
        log::info!("game over, total score {}", self.total_score);
    }

    fn spawn_banner(&mut self, kind: BannerKind) -> EntityId {
        let pos = Vec2::new(
            self.level.hero_x() - BANNER_OFFSET,
            self.level.hero_y() - BANNER_OFFSET,
        );
        self.level.spawn(Entity::banner(EntityId(0), pos, kind))
    }

    // -- Commands --

    pub fn jump(&mut self) -> bool {
        self.level.jump()
    }

    pub fn move_left(&mut self) -> bool {
        self.level.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.level.move_right()
    }

    pub fn stop_moving(&mut self) -> bool {
        self.level.stop_moving()
    }

    pub fn shoot(&mut self) -> Option<EntityId> {
        self.level.shoot()
    }

    // -- Checkpoints --

    /// Capture the current state. Call between ticks only.
    pub fn save(&self) -> Checkpoint {
        log::info!("checkpoint saved at {}", self.level.source());
        Checkpoint {
            level: self.level.snapshot(),
            total_score: self.total_score,
            level_index: self.level_index,
            hero_y: self.level.hero_y(),
        }
    }

    /// Put a checkpoint back in place.
    ///
    /// Upgrade state comes from the live hero. Facing is set to the inverse
    /// of the live hero's facing; kept as observed, see DESIGN.md.
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        let live = self.level.hero().and_then(|h| h.as_hero()).cloned();

        self.level = checkpoint.level.clone();
        if let Some(hero) = self.level.hero_mut() {
            hero.pos.y = checkpoint.hero_y;
            if let (Some(state), Some(live)) = (hero.as_hero_mut(), live) {
                state.facing = live.facing.flipped();
                state.upgraded = live.upgraded;
            }
        }
        self.total_score = checkpoint.total_score;
        self.level_index = checkpoint.level_index;
        log::info!("checkpoint restored at {}", self.level.source());
    }

    /// Save into the quick-save slot.
    pub fn quick_save(&mut self) {
        let checkpoint = self.save();
        self.slot.store(checkpoint);
    }

    /// Restore from the quick-save slot. Returns false if it is empty.
    pub fn quick_load(&mut self) -> bool {
        let Some(checkpoint) = self.slot.get().cloned() else {
            return false;
        };
        self.restore(&checkpoint);
        true
    }

    // -- Accessors --

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.sources.len()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Facing;
    use crate::assets::loader::LevelCatalog;
    use crate::core::level::LevelRules;

    const FLOOR: f32 = 400.0;

    fn level_json(time: u64, lives: u32, flag_x: f32) -> String {
        format!(
            r#"{{ "width": 2000, "height": 500, "floorHeight": {FLOOR},
                "stickmanPos": {{ "x": 50 }}, "time": {time}, "lives": {lives},
                "entities": [
                    {{ "type": "flag", "x": {flag_x}, "y": 320 }},
                    {{ "type": "slime", "x": 1500, "y": 380 }}
                ] }}"#
        )
    }

    fn session(levels: &[&str]) -> Session {
        let mut catalog = LevelCatalog::new();
        catalog.insert_json("levels/one.json", &level_json(50, 3, 900.0)).unwrap();
        catalog.insert_json("levels/two.json", &level_json(70, 5, 900.0)).unwrap();
        let config = SessionConfig {
            level_files: levels.iter().map(|s| s.to_string()).collect(),
            rules: LevelRules::default(),
        };
        Session::start(config, Box::new(catalog)).unwrap()
    }

    #[test]
    fn start_requires_levels() {
        let err = Session::start(SessionConfig::default(), Box::new(LevelCatalog::new()))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::NoLevels));
    }

    #[test]
    fn start_fails_on_missing_first_level() {
        let config = SessionConfig {
            level_files: vec!["ghost.json".into()],
            rules: LevelRules::default(),
        };
        let err = Session::start(config, Box::new(LevelCatalog::new())).err().unwrap();
        assert!(matches!(err, LoadError::Missing(_)));
    }

    #[test]
    fn win_advances_and_carries_lives() {
        let mut s = session(&["one.json", "two.json"]);
        s.level_mut().set_lives(2);
        let transition = s.level_mut().win();
        s.apply(transition);
        assert_eq!(s.total_score(), 50);
        assert_eq!(s.level().source(), "levels/two.json");
        assert_eq!(s.level().lives(), 2);
        assert_eq!(s.level().score(), 70);
        assert_eq!(s.level_index(), 2);
    }

    #[test]
    fn winning_the_last_level_shows_banner() {
        let mut s = session(&["one.json"]);
        let transition = s.level_mut().win();
        s.apply(transition);
        assert_eq!(s.total_score(), 50);
        assert!(!s.level().is_active());
        let banner = s.level().entities().find(|e| e.tag == "win").unwrap();
        assert_eq!(banner.pos.x, s.level().hero_x() - 200.0);
        assert_eq!(banner.pos.y, s.level().hero_y() - 200.0);
    }

    #[test]
    fn reload_keeps_score_and_lives() {
        let mut s = session(&["one.json"]);
        s.level_mut().set_score(42);
        assert_eq!(s.level_mut().hero_down(), Transition::Reload);
        s.apply(Transition::Reload);
        assert_eq!(s.level().score(), 42);
        assert_eq!(s.level().lives(), 2);
        assert!(s.level().is_active());
        assert_eq!(s.level().tick_count(), 0);
    }

    #[test]
    fn last_life_ends_game_not_reload() {
        let mut s = session(&["one.json"]);
        s.level_mut().set_lives(1);
        let transition = s.level_mut().hero_down();
        assert_eq!(transition, Transition::GameOver);
        s.apply(transition);
        assert!(!s.level().is_active());
        assert_eq!(s.total_score(), 50);
        assert!(s.level().entities().any(|e| e.tag == "over"));
        assert_eq!(s.tick(), Transition::Continue);
        assert!(!s.jump());
    }

    #[test]
    fn failed_advance_keeps_prior_level() {
        let mut s = session(&["one.json", "missing.json"]);
        s.level_mut().win();
        assert!(s.next_level().is_err());
        assert_eq!(s.total_score(), 0);
        assert_eq!(s.level().source(), "levels/one.json");
        assert_eq!(s.level_index(), 1);
    }

    #[test]
    fn touching_the_flag_through_ticks_advances() {
        let mut s = session(&["one.json", "two.json"]);
        s.move_right();
        let mut advanced = false;
        for _ in 0..600 {
            if s.tick() == Transition::Advance {
                advanced = true;
                break;
            }
        }
        assert!(advanced);
        assert_eq!(s.level().source(), "levels/two.json");
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut s = session(&["one.json", "two.json"]);
        s.level_mut().hero_mut().unwrap().as_hero_mut().unwrap().upgraded = true;
        s.move_right();
        for _ in 0..10 {
            s.tick();
        }
        let checkpoint = s.save();
        let saved_x = s.level().hero_x();
        assert_eq!(checkpoint.level_index, 1);
        assert_eq!(checkpoint.hero_y, s.level().hero_y());

        for _ in 0..130 {
            s.tick();
        }
        assert!(s.level().hero_x() > saved_x);
        let facing_before = s.level().hero().unwrap().as_hero().unwrap().facing;

        s.restore(&checkpoint);
        let hero = s.level().hero().unwrap();
        assert_eq!(hero.pos.x, saved_x);
        assert_eq!(hero.pos.y, checkpoint.hero_y);
        assert_eq!(hero.as_hero().unwrap().facing, facing_before.flipped());
        assert_eq!(hero.as_hero().unwrap().facing, Facing::Left);
        assert!(hero.as_hero().unwrap().upgraded);
        assert_eq!(s.level().score(), checkpoint.level.score());
        assert_eq!(s.total_score(), 0);
    }

    #[test]
    fn restoring_twice_gives_the_same_state() {
        let mut s = session(&["one.json"]);
        let checkpoint = s.save();
        s.restore(&checkpoint);
        for _ in 0..50 {
            s.tick();
        }
        s.restore(&checkpoint);
        assert_eq!(s.level().tick_count(), 0);
        assert_eq!(s.level().hero_x(), 50.0);
    }

    #[test]
    fn restore_mid_jump_gives_a_standing_hero() {
        let mut s = session(&["one.json"]);
        assert!(s.jump());
        for _ in 0..5 {
            s.tick();
        }
        assert!(!s.jump());
        let checkpoint = s.save();
        assert!(checkpoint.hero_y < FLOOR - 40.0);

        s.restore(&checkpoint);
        let hero = s.level().hero().unwrap();
        assert_eq!(hero.pos.y, checkpoint.hero_y);
        assert_eq!(hero.as_hero().unwrap().vel, Vec2::ZERO);
        assert!(s.jump());
    }

    #[test]
    fn quick_load_without_save_is_a_no_op() {
        let mut s = session(&["one.json"]);
        assert!(!s.quick_load());
        s.quick_save();
        s.move_right();
        s.tick();
        assert!(s.quick_load());
        assert_eq!(s.level().hero_x(), 50.0);
    }
}
