use serde::{Deserialize, Serialize};

/// Unique identifier for an entity within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Horizontal facing of the hero, enemies and bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn is_left(self) -> bool {
        self == Facing::Left
    }

    /// The opposite facing.
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Unit sign along the x-axis: -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// What the owner of a level should do after a tick or command.
///
/// The level never holds a reference to its owner; it reports intent instead
/// and the session coordinator acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Nothing to do, keep ticking.
    #[default]
    Continue,
    /// The hero reached the goal: move to the next level or finish the game.
    Advance,
    /// The hero went down with lives left: reload the current level definition.
    Reload,
    /// The hero ran out of lives. The level is permanently inactive.
    GameOver,
}

impl Transition {
    pub fn is_continue(self) -> bool {
        self == Transition::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_flip_and_sign() {
        assert_eq!(Facing::Left.flipped(), Facing::Right);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::default(), Facing::Right);
    }

    #[test]
    fn only_continue_is_continue() {
        assert!(Transition::default().is_continue());
        assert!(!Transition::GameOver.is_continue());
    }
}
