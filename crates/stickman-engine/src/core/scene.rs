use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// The master entity set of a level.
///
/// A flat Vec in insertion order, deduplicated by id. The movable,
/// interactable and projectile registries are views filtered by capability,
/// so they can never hold an entity the master set does not.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity. Returns false (and drops it) if its id is already present.
    pub fn spawn(&mut self, entity: Entity) -> bool {
        if self.contains(entity.id) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Slice access for split borrows during a tick.
    pub fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Movable registry view.
    pub fn movables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_movable())
    }

    /// Interactable registry view.
    pub fn interactables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_interactable())
    }

    /// Projectile registry view.
    pub fn projectiles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_projectile())
    }

    /// Master-set indices of the entities matching `pred`, in order.
    pub fn indices_where(&self, pred: impl Fn(&Entity) -> bool) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| pred(e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Drop every inactive entity. Returns how many were removed.
    pub fn prune_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.active);
        before - self.entities.len()
    }

    /// Largest id in use, if any.
    pub fn max_id(&self) -> Option<EntityId> {
        self.entities.iter().map(|e| e.id).max()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
