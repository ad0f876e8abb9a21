use super::constants::{INITIAL_ENERGY, INITIAL_SHIELDS, INITIAL_TORPEDOES};
use super::position::Cell;

/// The player's starship. Lives in the active sector; resources reset to
/// full every time a quadrant is loaded.
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub cell: Cell,
    pub torpedoes: i32,
    pub energy: i32,
    pub shields: i32,
}

impl Ship {
    pub fn new(cell: Cell) -> Self {
        Ship {
            cell,
            torpedoes: INITIAL_TORPEDOES,
            energy: INITIAL_ENERGY,
            shields: INITIAL_SHIELDS,
        }
    }
}
