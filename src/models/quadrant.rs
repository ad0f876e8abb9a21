use super::entity::EntityKind;
use super::position::Cell;

/// Persistent contents of one galaxy quadrant. Populated once at galaxy
/// generation; loading the quadrant for play copies these positions into a
/// fresh [`Sector`](super::sector::Sector) and never writes back.
#[derive(Debug, Clone, Default)]
pub struct Quadrant {
    pub stars: Vec<Cell>,
    pub bases: Vec<Cell>,
    pub enemies: Vec<Cell>,
}

impl Quadrant {
    pub fn new() -> Self {
        Quadrant::default()
    }

    /// Number of entities of the given kind already placed here.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Star => self.stars.len(),
            EntityKind::Base => self.bases.len(),
            EntityKind::Enemy => self.enemies.len(),
            EntityKind::Ship => 0,
        }
    }

    /// Whether any entity of any kind sits at the given cell.
    pub fn cell_occupied(&self, cell: Cell) -> bool {
        self.stars.contains(&cell)
            || self.bases.contains(&cell)
            || self.enemies.contains(&cell)
    }

    /// Record a new entity of the given kind. Ships are never persisted at
    /// quadrant level.
    pub fn add(&mut self, kind: EntityKind, cell: Cell) {
        match kind {
            EntityKind::Star => self.stars.push(cell),
            EntityKind::Base => self.bases.push(cell),
            EntityKind::Enemy => self.enemies.push(cell),
            EntityKind::Ship => unreachable!("ships are not quadrant entities"),
        }
    }
}
