use crate::components::entity::Entity;

/// Read-only view of every entity except the one currently ticking.
///
/// Built by splitting the master set around the mover, so the mover can be
/// borrowed mutably while it inspects the rest of the level.
#[derive(Clone, Copy)]
pub struct World<'a> {
    before: &'a [Entity],
    after: &'a [Entity],
}

impl<'a> World<'a> {
    pub fn new(before: &'a [Entity], after: &'a [Entity]) -> Self {
        Self { before, after }
    }

    /// An empty world (no other entities).
    pub fn empty() -> Self {
        Self { before: &[], after: &[] }
    }

    /// Iterate over all other entities in master-set order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Entity> {
        self.before.iter().chain(self.after.iter())
    }

    /// Active entities that block movement.
    pub fn solids(&self) -> impl Iterator<Item = &'a Entity> {
        self.iter().filter(|e| e.active && e.solid)
    }
}

/// Split a slice into the element at `index` and a world view of the rest.
pub fn split_world(entities: &mut [Entity], index: usize) -> (&mut Entity, World<'_>) {
    let (before, rest) = entities.split_at_mut(index);
    let (me, after) = rest
        .split_first_mut()
        .expect("split_world index out of bounds");
    (me, World::new(before, after))
}

/// Borrow two distinct elements of a slice mutably.
///
/// Panics if `a == b` or either index is out of bounds.
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut requires distinct indices");
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
