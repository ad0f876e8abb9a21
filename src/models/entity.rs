use super::constants::ENEMY_INITIAL_HULL;
use super::position::Cell;

/// Kind tag for everything that can occupy a sector cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Star,
    Base,
    Enemy,
    Ship,
}

/// An inert star. Blocks torpedoes, phasers and travel courses.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub cell: Cell,
}

impl Star {
    pub fn new(cell: Cell) -> Self {
        Star { cell }
    }
}

/// A station. Friendly until hit by weapons fire, then permanently hostile.
#[derive(Debug, Clone, Copy)]
pub struct Base {
    pub cell: Cell,
    pub friendly: bool,
}

impl Base {
    pub fn new(cell: Cell) -> Self {
        Base {
            cell,
            friendly: true,
        }
    }
}

/// An enemy warship within the sector. Up to 3 per quadrant.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub cell: Cell,
    /// Remaining hull points. Not clamped; removal happens at <= 0.
    pub hull: i32,
}

impl Enemy {
    pub fn new(cell: Cell) -> Self {
        Enemy {
            cell,
            hull: ENEMY_INITIAL_HULL,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hull > 0
    }
}
