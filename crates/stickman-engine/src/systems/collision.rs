use crate::api::types::EntityId;
use crate::components::entity::Effect;
use crate::core::scene::Scene;
use crate::core::world::pair_mut;

/// Resolve all interactions for one tick.
///
/// Order: hero against every interactable, then every projectile against
/// movables, then every projectile against statics. Hero-side effects the
/// level must act on are returned in the order they fired. Skipped entirely
/// if the hero is no longer in the scene.
pub fn resolve_collisions(scene: &mut Scene, hero_id: EntityId) -> Vec<Effect> {
    let mut effects = Vec::new();
    let Some(hero_idx) = scene.index_of(hero_id) else {
        return effects;
    };

    // Hero x interactables. Several may fire in the same tick.
    let interactables = scene.indices_where(|e| e.is_interactable());
    let entities = scene.as_mut_slice();
    for idx in interactables {
        if idx == hero_idx {
            continue;
        }
        let (interactable, hero) = pair_mut(entities, idx, hero_idx);
        if interactable.check_collide(hero) {
            if let Some(effect) = interactable.interact(hero) {
                effects.push(effect);
            }
        }
    }

    let projectiles = scene.indices_where(|e| e.is_projectile());
    if projectiles.is_empty() {
        return effects;
    }

    // Projectiles x movables (not the hero).
    let movables = scene.indices_where(|e| e.is_movable());
    let entities = scene.as_mut_slice();
    for &p in &projectiles {
        for &m in &movables {
            if m == p || m == hero_idx {
                continue;
            }
            let (projectile, target) = pair_mut(entities, p, m);
            if projectile.collide_with_movable(target) {
                log::debug!("bullet {:?} hit {:?}", projectile.id, target.id);
            }
        }
    }

    // Projectiles x everything else (not the hero).
    for &p in &projectiles {
        for s in 0..entities.len() {
            if s == p || s == hero_idx {
                continue;
            }
            let (projectile, target) = pair_mut(entities, p, s);
            projectile.collide_with_static(target);
        }
    }

    effects
}
