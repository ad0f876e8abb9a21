pub const GALAXY_SIZE: usize = 8;
pub const SECTOR_SIZE: usize = 8;

pub const MAX_STARS_PER_QUADRANT: usize = 7;
pub const MAX_BASES_PER_QUADRANT: usize = 2;
pub const MAX_ENEMIES_PER_QUADRANT: usize = 3;

pub const INITIAL_TORPEDOES: i32 = 9;
pub const INITIAL_ENERGY: i32 = 999;
pub const INITIAL_SHIELDS: i32 = 100;

/// Hull points an enemy spawns with. A torpedo hit lands 200..=1200, so a
/// single hit can kill; phaser fire (100 per beam) needs sustained use.
pub const ENEMY_INITIAL_HULL: i32 = 1000;

pub const TORPEDO_DAMAGE_BASE: i32 = 200;
pub const TORPEDO_DAMAGE_SPREAD: i32 = 1000;

/// Milliseconds between torpedo path steps.
pub const TORPEDO_STEP_INTERVAL_MS: u64 = 200;

/// Milliseconds a phaser beam stays live before its damage lands.
pub const PHASER_DURATION_MS: u64 = 5000;

/// Energy drained from the ship (and dealt to the target) per beam.
pub const PHASER_ENERGY_COST: i32 = 100;

/// Milliseconds between ship steps along a travel course.
pub const COURSE_STEP_INTERVAL_MS: u64 = 500;

/// New-game galaxy population: the star total is randomized on top of the
/// floor, base and enemy totals are fixed.
pub const NEW_GAME_STAR_FLOOR: u32 = 200;
pub const NEW_GAME_STAR_SPREAD: u32 = 246;
pub const NEW_GAME_BASES: u32 = 8;
pub const NEW_GAME_ENEMIES: u32 = 20;

/// Number of status readout lines pushed to the shell every tick.
pub const READOUT_LINES: usize = 7;
