use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::types::EntityId;
use crate::assets::loader::LoadError;
use crate::components::entity::Entity;
use crate::components::hero::HeroSize;
use crate::core::level::{Level, LevelLayout};

/// A level definition as stored on disk.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFile {
    pub width: f32,
    pub height: f32,
    /// y-coordinate of the ground.
    pub floor_height: f32,
    pub stickman_pos: SpawnPoint,
    #[serde(default)]
    pub stickman_size: HeroSize,
    /// Countdown budget in seconds.
    pub time: u64,
    pub lives: u32,
    #[serde(default)]
    pub entities: Vec<PlacedEntity>,
}

/// Hero spawn column. The hero always starts on the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
}

/// One entry of the level's `entities` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedEntity {
    #[serde(rename = "type")]
    pub kind: PlacedKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Slime colour, used for its visual tag.
    #[serde(default)]
    pub colour: Option<String>,
    /// Overrides the default visual tag.
    #[serde(default)]
    pub sprite: Option<String>,
}

/// Entity types a level file may place. The hero is never placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacedKind {
    Platform,
    Slime,
    Mushroom,
    Flag,
}

impl LevelFile {
    /// Parse a level definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the definition for values that would make an unplayable level.
    pub fn validate(&self, source: &str) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::Invalid {
            source_id: source.to_string(),
            reason,
        };
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid(format!("non-positive size {}x{}", self.width, self.height)));
        }
        if self.floor_height <= 0.0 || self.floor_height > self.height {
            return Err(invalid(format!("floor {} outside level height {}", self.floor_height, self.height)));
        }
        if self.lives == 0 {
            return Err(invalid("zero lives".to_string()));
        }
        for (i, placed) in self.entities.iter().enumerate() {
            if placed.kind == PlacedKind::Platform && placed.size().is_none() {
                return Err(invalid(format!("platform #{i} has no width/height")));
            }
        }
        Ok(())
    }

    /// Build a running level. Placed entities get ids 1..=n in file order.
    pub fn build(&self, source: &str) -> Result<Level, LoadError> {
        self.validate(source)?;

        let entities = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, placed)| placed.to_entity(EntityId(i as u32 + 1)))
            .collect();

        let layout = LevelLayout {
            source: source.to_string(),
            width: self.width,
            height: self.height,
            floor_height: self.floor_height,
            hero_x: self.stickman_pos.x,
            hero_size: self.stickman_size,
            time: self.time,
            lives: self.lives,
        };
        Ok(Level::new(layout, entities))
    }
}

impl PlacedEntity {
    fn size(&self) -> Option<Vec2> {
        Some(Vec2::new(self.width?, self.height?))
    }

    fn to_entity(&self, id: EntityId) -> Entity {
        let pos = Vec2::new(self.x, self.y);
        let mut entity = match self.kind {
            PlacedKind::Platform => Entity::platform(id, pos, self.size().unwrap_or(Vec2::ONE)),
            PlacedKind::Slime => Entity::slime(id, pos, self.colour.as_deref().unwrap_or("green")),
            PlacedKind::Mushroom => Entity::mushroom(id, pos),
            PlacedKind::Flag => Entity::flag(id, pos),
        };
        if self.kind != PlacedKind::Platform {
            if let Some(size) = self.size() {
                entity = entity.with_size(size);
            }
        }
        if let Some(sprite) = &self.sprite {
            entity = entity.with_tag(sprite.clone());
        }
        entity
    }
}
