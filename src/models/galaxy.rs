use log::info;
use rand::Rng;

use super::constants::{
    GALAXY_SIZE, MAX_BASES_PER_QUADRANT, MAX_ENEMIES_PER_QUADRANT, MAX_STARS_PER_QUADRANT,
    NEW_GAME_BASES, NEW_GAME_ENEMIES, NEW_GAME_STAR_FLOOR, NEW_GAME_STAR_SPREAD, SECTOR_SIZE,
};
use super::entity::EntityKind;
use super::position::{Cell, QuadrantPosition};
use super::quadrant::Quadrant;

/// Total entity counts and per-quadrant caps for one galaxy generation run.
/// Caps are parameters rather than baked-in so tests can generate at other
/// scales.
#[derive(Debug, Clone, Copy)]
pub struct GenerationPlan {
    pub stars: u32,
    pub bases: u32,
    pub enemies: u32,
    pub star_cap: usize,
    pub base_cap: usize,
    pub enemy_cap: usize,
}

impl GenerationPlan {
    /// The standard new-game population: randomized star total, fixed base
    /// and enemy totals, default caps.
    pub fn new_game(rng: &mut impl Rng) -> Self {
        GenerationPlan {
            stars: NEW_GAME_STAR_FLOOR + rng.gen_range(0..=NEW_GAME_STAR_SPREAD),
            bases: NEW_GAME_BASES,
            enemies: NEW_GAME_ENEMIES,
            star_cap: MAX_STARS_PER_QUADRANT,
            base_cap: MAX_BASES_PER_QUADRANT,
            enemy_cap: MAX_ENEMIES_PER_QUADRANT,
        }
    }
}

/// The 8x8 grid of quadrants making up the play area.
#[derive(Debug, Clone)]
pub struct Galaxy {
    /// Indexed quadrants[y][x], 0-based.
    quadrants: [[Quadrant; GALAXY_SIZE]; GALAXY_SIZE],
}

impl Galaxy {
    /// Generate a fully populated galaxy: three placement passes (stars,
    /// bases, enemies). Each entity is placed by rejection sampling twice
    /// over — quadrants already at the kind's cap are rejected, then
    /// occupied cells within the chosen quadrant are rejected.
    pub fn generate(rng: &mut impl Rng, plan: &GenerationPlan) -> Self {
        let mut galaxy = Galaxy {
            quadrants: Default::default(),
        };

        galaxy.place_entities(rng, EntityKind::Star, plan.stars, plan.star_cap);
        galaxy.place_entities(rng, EntityKind::Base, plan.bases, plan.base_cap);
        galaxy.place_entities(rng, EntityKind::Enemy, plan.enemies, plan.enemy_cap);

        info!(
            "generated galaxy: {} stars, {} bases, {} enemies",
            plan.stars, plan.bases, plan.enemies
        );
        galaxy
    }

    fn place_entities(&mut self, rng: &mut impl Rng, kind: EntityKind, count: u32, cap: usize) {
        for _ in 0..count {
            let (qx, qy) = loop {
                let qx = rng.gen_range(0..GALAXY_SIZE);
                let qy = rng.gen_range(0..GALAXY_SIZE);
                if self.quadrants[qy][qx].count(kind) < cap {
                    break (qx, qy);
                }
            };
            let cell = loop {
                let cell = Cell::new(
                    rng.gen_range(0..SECTOR_SIZE as i32),
                    rng.gen_range(0..SECTOR_SIZE as i32),
                );
                if !self.quadrants[qy][qx].cell_occupied(cell) {
                    break cell;
                }
            };
            self.quadrants[qy][qx].add(kind, cell);
        }
    }

    /// Look up a quadrant by position.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0,8)`; callers are expected
    /// to hold the galaxy-bounds invariant.
    pub fn quadrant_at(&self, pos: QuadrantPosition) -> &Quadrant {
        assert!(
            (0..GALAXY_SIZE as i32).contains(&pos.x) && (0..GALAXY_SIZE as i32).contains(&pos.y),
            "quadrant position out of range: ({},{})",
            pos.x,
            pos.y
        );
        &self.quadrants[pos.y as usize][pos.x as usize]
    }

    /// Iterate all 64 quadrants with their positions, row-major.
    pub fn quadrants(&self) -> impl Iterator<Item = (QuadrantPosition, &Quadrant)> {
        self.quadrants.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, q)| (QuadrantPosition::new(x as i32, y as i32), q))
        })
    }
}
