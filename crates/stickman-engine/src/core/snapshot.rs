// core/snapshot.rs
//
// Deep copy of a running level for checkpoints.
//
// The copy goes through `Level::new` like a freshly loaded level, so the
// registry views are rebuilt from the copied master set. The hero is never
// copied: the new level spawns its own at the current hero x and the session
// restores the rest of the hero state.

use crate::components::entity::{Entity, EntityKind};
use crate::core::level::{Level, LevelLayout};

impl Level {
    /// Independent copy of this level without the hero.
    ///
    /// Time, lives and rules carry over; score is copied verbatim after
    /// construction. Bullets in flight stay movable projectiles in the copy.
    /// The tick counter restarts at zero.
    pub fn snapshot(&self) -> Level {
        let entities: Vec<Entity> = self
            .entities()
            .filter(|e| !matches!(e.kind, EntityKind::Hero(_)))
            .cloned()
            .collect();

        let layout = LevelLayout {
            source: self.source().to_string(),
            width: self.width(),
            height: self.height(),
            floor_height: self.floor_height(),
            hero_x: self.hero_x(),
            hero_size: self.hero_size(),
            time: self.time(),
            lives: self.lives(),
        };

        let mut copy = Level::new(layout, entities);
        copy.set_rules(self.rules());
        copy.set_score(self.score());
        log::debug!(
            "{}: snapshot of {} entities, score {}",
            self.source(),
            copy.scene().len(),
            copy.score()
        );
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::hero::HeroSize;
    use crate::components::entity::BannerKind;
    use crate::core::level::LevelRules;
    use glam::Vec2;

    fn level() -> Level {
        Level::new(
            LevelLayout {
                source: "levels/snap.json".into(),
                width: 1500.0,
                height: 500.0,
                floor_height: 400.0,
                hero_x: 10.0,
                hero_size: HeroSize::Large,
                time: 80,
                lives: 2,
            },
            vec![
                Entity::platform(EntityId(1), Vec2::new(300.0, 300.0), Vec2::new(100.0, 20.0)),
                Entity::slime(EntityId(2), Vec2::new(900.0, 380.0), "green"),
                Entity::mushroom(EntityId(3), Vec2::new(600.0, 376.0)),
                Entity::flag(EntityId(4), Vec2::new(1400.0, 320.0)),
            ],
        )
    }

    #[test]
    fn copies_everything_but_the_hero() {
        let mut original = level();
        original.hero_mut().unwrap().pos.x = 120.0;
        original.set_score(999);
        let copy = original.snapshot();

        assert_eq!(copy.scene().len(), original.scene().len());
        assert_eq!(copy.score(), 999);
        assert_eq!(copy.time(), 80);
        assert_eq!(copy.lives(), 2);
        assert_eq!(copy.source(), "levels/snap.json");
        assert_eq!(copy.hero_x(), 120.0);
        assert_eq!(copy.hero_y(), 400.0 - HeroSize::Large.dimensions().y);
        assert_eq!(copy.scene().movables().count(), 2);
        assert_eq!(copy.scene().interactables().count(), 3);
        assert_eq!(copy.scene().iter().filter(|e| e.is_hero()).count(), 1);
        assert_eq!(copy.tick_count(), 0);
    }

    #[test]
    fn bullets_rejoin_movable_and_projectile_views() {
        let mut original = level();
        original.hero_mut().unwrap().as_hero_mut().unwrap().upgraded = true;
        let bullet = original.shoot().unwrap();
        let copy = original.snapshot();

        assert!(copy.scene().projectiles().any(|e| e.id == bullet));
        assert!(copy.scene().movables().any(|e| e.id == bullet));
        // the copy's hero is fresh, not upgraded
        assert!(!copy.hero().unwrap().as_hero().unwrap().upgraded);
        assert_ne!(copy.hero_id(), bullet);
    }

    #[test]
    fn copy_is_independent_of_original() {
        let mut original = level();
        original.set_rules(LevelRules { score_interval: 60, kill_bonus: 10 });
        let copy = original.snapshot();
        let slime_before = copy.scene().get(EntityId(2)).unwrap().clone();

        original.move_right();
        for _ in 0..200 {
            original.tick();
        }
        original.scene_mut().get_mut(EntityId(2)).unwrap().active = false;
        original.set_score(0);

        let slime_after = copy.scene().get(EntityId(2)).unwrap();
        assert_eq!(slime_after.pos, slime_before.pos);
        assert!(slime_after.active);
        assert_eq!(copy.score(), 80);
        assert_eq!(copy.rules(), LevelRules { score_interval: 60, kill_bonus: 10 });
        assert_eq!(copy.tick_count(), 0);
    }

    #[test]
    fn banners_are_copied_as_statics() {
        let mut original = level();
        original.spawn(Entity::banner(EntityId(0), Vec2::ZERO, BannerKind::Win));
        let copy = original.snapshot();
        assert!(copy.scene().iter().any(|e| e.tag == "win"));
        assert_eq!(copy.scene().movables().count(), 2);
    }
}
