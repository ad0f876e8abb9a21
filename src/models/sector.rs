use log::debug;
use rand::Rng;

use super::constants::SECTOR_SIZE;
use super::entity::{Base, Enemy, EntityKind, Star};
use super::position::Cell;
use super::quadrant::Quadrant;
use super::ship::Ship;

/// One endpoint of a phaser beam, in cell units. Offset by +0.5 from the
/// cell corner so beams render from cell centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamPoint {
    pub x: f64,
    pub y: f64,
}

impl BeamPoint {
    pub fn center_of(cell: Cell) -> Self {
        BeamPoint {
            x: cell.x as f64 + 0.5,
            y: cell.y as f64 + 0.5,
        }
    }
}

/// An in-flight torpedo. The head of `path` is the next cell to test for
/// impact; the torpedo dies when the path empties.
#[derive(Debug, Clone)]
pub struct Torpedo {
    pub path: Vec<Cell>,
    /// Timestamp of the last step, in session milliseconds.
    pub base_time: u64,
    /// Milliseconds between steps.
    pub interval: u64,
}

impl Torpedo {
    pub fn head(&self) -> Option<Cell> {
        self.path.first().copied()
    }
}

/// A live phaser beam. Damage lands on the enemy at `target` when the
/// beam expires, `duration` ms after creation.
#[derive(Debug, Clone)]
pub struct PhaserBeam {
    pub from: BeamPoint,
    pub to: BeamPoint,
    pub base_time: u64,
    pub duration: u64,
    pub target: Cell,
    pub energy: i32,
}

/// The actively played 8x8 grid: the current quadrant's entities plus the
/// ship and all transient combat state. Rebuilt wholesale on every
/// quadrant transition.
#[derive(Debug, Clone)]
pub struct Sector {
    pub stars: Vec<Star>,
    pub bases: Vec<Base>,
    pub enemies: Vec<Enemy>,
    pub ship: Ship,

    pub torpedoes: Vec<Torpedo>,
    pub phasers: Vec<PhaserBeam>,
    /// Cells the ship will step through, head first.
    pub course: Vec<Cell>,
    /// Timestamp of the last course step, in session milliseconds.
    pub course_base_time: u64,
    /// Player-selected target cell for fire/travel commands.
    pub lock: Option<Cell>,
    /// Cell the pointer currently hovers, if on-grid.
    pub hover: Option<Cell>,
}

impl Sector {
    /// Build a fresh sector from a quadrant's persistent contents. Entity
    /// positions are copied (the quadrant is never written back), all
    /// transient state is cleared, and the ship spawns at a free cell
    /// with full resources.
    pub fn load_from_quadrant(quadrant: &Quadrant, rng: &mut impl Rng) -> Self {
        let stars: Vec<Star> = quadrant.stars.iter().map(|&c| Star::new(c)).collect();
        let bases: Vec<Base> = quadrant.bases.iter().map(|&c| Base::new(c)).collect();
        let enemies: Vec<Enemy> = quadrant.enemies.iter().map(|&c| Enemy::new(c)).collect();

        let spawn = loop {
            let cell = random_cell(rng);
            if !quadrant.cell_occupied(cell) {
                break cell;
            }
        };
        debug!("ship spawned at ({},{})", spawn.x, spawn.y);

        Sector {
            stars,
            bases,
            enemies,
            ship: Ship::new(spawn),
            torpedoes: Vec::new(),
            phasers: Vec::new(),
            course: Vec::new(),
            course_base_time: 0,
            lock: None,
            hover: None,
        }
    }

    /// What occupies the given cell, if anything. Scan order (stars, bases,
    /// enemies, ship) is the tie-break should the one-occupant-per-cell
    /// invariant ever be violated.
    pub fn occupant_at(&self, cell: Cell) -> Option<EntityKind> {
        if self.stars.iter().any(|s| s.cell == cell) {
            return Some(EntityKind::Star);
        }
        if self.bases.iter().any(|b| b.cell == cell) {
            return Some(EntityKind::Base);
        }
        if self.enemies.iter().any(|e| e.cell == cell) {
            return Some(EntityKind::Enemy);
        }
        if self.ship.cell == cell {
            return Some(EntityKind::Ship);
        }
        None
    }

    pub fn base_at(&self, cell: Cell) -> Option<&Base> {
        self.bases.iter().find(|b| b.cell == cell)
    }

    pub fn base_at_mut(&mut self, cell: Cell) -> Option<&mut Base> {
        self.bases.iter_mut().find(|b| b.cell == cell)
    }

    pub fn enemy_at(&self, cell: Cell) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.cell == cell)
    }

    /// Uniform rejection sampling for an unoccupied cell. The grid is
    /// mostly empty at generation scale, so retries are cheap; entity caps
    /// guarantee free cells exist.
    pub fn find_free_cell(&self, rng: &mut impl Rng) -> Cell {
        loop {
            let cell = random_cell(rng);
            if self.occupant_at(cell).is_none() {
                return cell;
            }
        }
    }

    /// Apply damage to the enemy at `cell`, if one is there, and drop any
    /// enemy whose hull is exhausted. Hull values are not clamped at zero.
    pub fn damage_enemy_at(&mut self, cell: Cell, amount: i32) {
        if let Some(enemy) = self.enemies.iter_mut().find(|e| e.cell == cell) {
            enemy.hull -= amount;
            debug!(
                "enemy at ({},{}) took {} damage, hull {}",
                cell.x, cell.y, amount, enemy.hull
            );
        }
        self.enemies.retain(|e| e.is_alive());
    }
}

fn random_cell(rng: &mut impl Rng) -> Cell {
    Cell::new(
        rng.gen_range(0..SECTOR_SIZE as i32),
        rng.gen_range(0..SECTOR_SIZE as i32),
    )
}
