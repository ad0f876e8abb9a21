//! The action/projectile engine: per-tick advancement of torpedoes,
//! phaser beams and travel courses, plus the fire/travel commands the
//! shell's buttons invoke.
//!
//! Everything is run-to-completion against a caller-supplied timestamp;
//! "waiting" is an elapsed-time comparison, never a blocking wait.

use log::{debug, info};
use rand::Rng;

use crate::io::UiShell;
use crate::models::constants::{
    COURSE_STEP_INTERVAL_MS, PHASER_DURATION_MS, PHASER_ENERGY_COST, TORPEDO_DAMAGE_BASE,
    TORPEDO_DAMAGE_SPREAD, TORPEDO_STEP_INTERVAL_MS,
};
use crate::models::entity::EntityKind;
use crate::models::sector::{BeamPoint, PhaserBeam, Sector, Torpedo};
use crate::services::geometry::{clip_path, trace_line};
use crate::services::status::readout_lines;

/// Advance the simulation one tick. Order is fixed: readout, torpedoes,
/// phasers, travel course, redraw request.
pub fn tick(sector: &mut Sector, now: u64, rng: &mut impl Rng, shell: &mut dyn UiShell) {
    for (line, text) in readout_lines(sector).iter().enumerate() {
        shell.set_readout_line(line, text);
    }

    let mut want_redraw = !sector.torpedoes.is_empty() || !sector.phasers.is_empty();

    advance_torpedoes(sector, now, rng);
    expire_phasers(sector, now);
    want_redraw |= !sector.phasers.is_empty();
    want_redraw |= step_course(sector, now);

    if want_redraw {
        shell.request_redraw();
    }
}

/// Torpedo pass: impact resolution at the head cell, then timed stepping.
/// The firing ship is transparent to its own torpedo (the path starts on
/// the ship's cell).
fn advance_torpedoes(sector: &mut Sector, now: u64, rng: &mut impl Rng) {
    for i in 0..sector.torpedoes.len() {
        let head = match sector.torpedoes[i].head() {
            Some(cell) => cell,
            None => continue,
        };

        match sector.occupant_at(head) {
            Some(EntityKind::Ship) | None => {
                let torpedo = &mut sector.torpedoes[i];
                if now - torpedo.base_time > torpedo.interval {
                    torpedo.base_time = now;
                    torpedo.path.remove(0);
                }
            }
            Some(kind) => {
                info!("torpedo impact at ({},{}) on {:?}", head.x, head.y, kind);
                match kind {
                    EntityKind::Base => {
                        if let Some(base) = sector.base_at_mut(head) {
                            base.friendly = false;
                        }
                    }
                    EntityKind::Enemy => {
                        let damage =
                            TORPEDO_DAMAGE_BASE + rng.gen_range(0..=TORPEDO_DAMAGE_SPREAD);
                        sector.damage_enemy_at(head, damage);
                    }
                    // Stars absorb the hit with no effect.
                    EntityKind::Star | EntityKind::Ship => {}
                }
                sector.torpedoes[i].path.clear();
            }
        }
    }
    sector.torpedoes.retain(|t| !t.path.is_empty());
}

/// Phaser pass: beams past their duration land their damage on whatever
/// enemy still holds the target cell, drain the ship, and disappear.
fn expire_phasers(sector: &mut Sector, now: u64) {
    let mut expired = Vec::new();
    sector.phasers.retain(|beam| {
        if now - beam.base_time > beam.duration {
            expired.push((beam.target, beam.energy));
            false
        } else {
            true
        }
    });
    for (target, energy) in expired {
        sector.damage_enemy_at(target, energy);
        sector.ship.energy -= energy;
    }
}

/// Course pass: one ship step per interval; exhausting the course clears
/// the targeting lock. Returns true if the ship moved this tick.
fn step_course(sector: &mut Sector, now: u64) -> bool {
    if sector.course.is_empty() || now - sector.course_base_time <= COURSE_STEP_INTERVAL_MS {
        return false;
    }
    sector.course_base_time = now;
    sector.ship.cell = sector.course.remove(0);
    if sector.course.is_empty() {
        sector.lock = None;
    }
    true
}

/// Fire a torpedo at the locked cell. Silent no-op without a lock or with
/// the magazine empty.
pub fn fire_torpedo(sector: &mut Sector, now: u64) {
    if sector.ship.torpedoes <= 0 {
        return;
    }
    let lock = match sector.lock {
        Some(cell) => cell,
        None => return,
    };

    sector.ship.torpedoes -= 1;
    let path = trace_line(sector.ship.cell.x, sector.ship.cell.y, lock.x, lock.y);
    debug!("torpedo away, {} cells to ({},{})", path.len(), lock.x, lock.y);
    sector.torpedoes.push(Torpedo {
        path,
        base_time: now,
        interval: TORPEDO_STEP_INTERVAL_MS,
    });
}

/// Fire a phaser beam at the locked enemy. Requires no beam already live,
/// a lock, an enemy at the lock, and an unobstructed line to it; anything
/// else is a silent no-op.
pub fn fire_phasers(sector: &mut Sector, now: u64) {
    if !sector.phasers.is_empty() {
        return;
    }
    let lock = match sector.lock {
        Some(cell) => cell,
        None => return,
    };
    if sector.occupant_at(lock) != Some(EntityKind::Enemy) {
        return;
    }

    let traced = trace_line(sector.ship.cell.x, sector.ship.cell.y, lock.x, lock.y);
    if traced.len() < 2 {
        return;
    }
    // Clip past the ship's own cell; the beam reaches the first occupied
    // cell along the line, which must still be the enemy.
    let clipped = clip_path(sector, &traced[1..]);
    let endpoint = match clipped.last() {
        Some(&cell) => cell,
        None => return,
    };
    if sector.occupant_at(endpoint) != Some(EntityKind::Enemy) {
        return;
    }

    debug!("phasers firing at ({},{})", endpoint.x, endpoint.y);
    sector.phasers.push(PhaserBeam {
        from: BeamPoint::center_of(sector.ship.cell),
        to: BeamPoint::center_of(endpoint),
        base_time: now,
        duration: PHASER_DURATION_MS,
        target: endpoint,
        energy: PHASER_ENERGY_COST,
    });
}

/// Queue a travel course toward the locked cell. The course excludes the
/// ship's own cell and ends before the first occupied cell; the ship
/// never enters an occupied cell. Silent no-op without a lock or when the
/// course comes up empty.
pub fn travel_to(sector: &mut Sector, now: u64) {
    let lock = match sector.lock {
        Some(cell) => cell,
        None => return,
    };

    let traced = trace_line(sector.ship.cell.x, sector.ship.cell.y, lock.x, lock.y);
    let mut course = Vec::with_capacity(traced.len().saturating_sub(1));
    for &cell in &traced[1..] {
        if sector.occupant_at(cell).is_some() {
            break;
        }
        course.push(cell);
    }
    if course.is_empty() {
        return;
    }

    debug!("travel course set, {} cells", course.len());
    sector.course = course;
    sector.course_base_time = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_utils::MockShell;
    use crate::models::entity::{Base, Enemy, Star};
    use crate::models::position::Cell;
    use crate::models::sector::tests::empty_sector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    /// Ship at (0,0), enemy at (0,3), lock on the enemy.
    fn combat_sector() -> Sector {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.enemies.push(Enemy::new(Cell::new(0, 3)));
        sector.lock = Some(Cell::new(0, 3));
        sector
    }

    #[test]
    fn torpedo_traces_full_path_to_lock() {
        let mut sector = combat_sector();
        fire_torpedo(&mut sector, 1000);

        assert_eq!(sector.ship.torpedoes, 8);
        assert_eq!(sector.torpedoes.len(), 1);
        assert_eq!(
            sector.torpedoes[0].path,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(0, 3)
            ]
        );
    }

    #[test]
    fn torpedo_advances_one_cell_per_elapsed_interval() {
        let mut sector = combat_sector();
        let mut shell = MockShell::new();
        fire_torpedo(&mut sector, 1000);

        // Head is on the ship's own cell: transparent, steps on schedule.
        tick(&mut sector, 1000 + TORPEDO_STEP_INTERVAL_MS + 1, &mut rng(), &mut shell);
        assert_eq!(sector.torpedoes[0].head(), Some(Cell::new(0, 1)));

        // Not enough time elapsed since the step: head stays put.
        tick(&mut sector, 1000 + TORPEDO_STEP_INTERVAL_MS + 2, &mut rng(), &mut shell);
        assert_eq!(sector.torpedoes[0].head(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn torpedo_impact_damages_enemy_and_dies() {
        let mut sector = combat_sector();
        let mut shell = MockShell::new();
        sector.torpedoes.push(Torpedo {
            path: vec![Cell::new(0, 3)],
            base_time: 0,
            interval: TORPEDO_STEP_INTERVAL_MS,
        });

        tick(&mut sector, 10, &mut rng(), &mut shell);

        assert!(sector.torpedoes.is_empty());
        // Damage is 200..=1200 against a 1000-point hull: either dead or
        // measurably damaged.
        if let Some(enemy) = sector.enemy_at(Cell::new(0, 3)) {
            assert!(enemy.hull < 1000);
        }
        assert!(shell.redraw_requests > 0);
    }

    #[test]
    fn torpedo_impact_turns_base_hostile() {
        let mut sector = empty_sector();
        let mut shell = MockShell::new();
        sector.bases.push(Base::new(Cell::new(2, 2)));
        sector.torpedoes.push(Torpedo {
            path: vec![Cell::new(2, 2), Cell::new(2, 3)],
            base_time: 0,
            interval: TORPEDO_STEP_INTERVAL_MS,
        });

        tick(&mut sector, 10, &mut rng(), &mut shell);

        assert!(!sector.base_at(Cell::new(2, 2)).unwrap().friendly);
        assert!(sector.torpedoes.is_empty());
    }

    #[test]
    fn torpedo_without_lock_is_a_no_op() {
        let mut sector = combat_sector();
        sector.lock = None;
        fire_torpedo(&mut sector, 0);
        assert!(sector.torpedoes.is_empty());
        assert_eq!(sector.ship.torpedoes, 9);
    }

    #[test]
    fn torpedo_with_empty_magazine_is_a_no_op() {
        let mut sector = combat_sector();
        sector.ship.torpedoes = 0;
        fire_torpedo(&mut sector, 0);
        assert!(sector.torpedoes.is_empty());
    }

    #[test]
    fn phasers_fire_on_clear_line_to_enemy() {
        let mut sector = combat_sector();
        fire_phasers(&mut sector, 500);

        assert_eq!(sector.phasers.len(), 1);
        let beam = &sector.phasers[0];
        assert_eq!(beam.from, BeamPoint { x: 0.5, y: 0.5 });
        assert_eq!(beam.to, BeamPoint { x: 0.5, y: 3.5 });
        assert_eq!(beam.target, Cell::new(0, 3));
        assert_eq!(beam.energy, PHASER_ENERGY_COST);
    }

    #[test]
    fn phasers_refuse_non_enemy_target() {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.stars.push(Star::new(Cell::new(0, 3)));
        sector.lock = Some(Cell::new(0, 3));

        fire_phasers(&mut sector, 0);
        assert!(sector.phasers.is_empty());
    }

    #[test]
    fn phasers_refuse_obstructed_line() {
        let mut sector = combat_sector();
        sector.stars.push(Star::new(Cell::new(0, 1)));

        fire_phasers(&mut sector, 0);
        assert!(sector.phasers.is_empty());
    }

    #[test]
    fn only_one_beam_at_a_time() {
        let mut sector = combat_sector();
        fire_phasers(&mut sector, 0);
        fire_phasers(&mut sector, 1);
        assert_eq!(sector.phasers.len(), 1);
    }

    #[test]
    fn beam_expiry_damages_enemy_and_drains_ship() {
        let mut sector = combat_sector();
        let mut shell = MockShell::new();
        fire_phasers(&mut sector, 0);

        // Still live halfway through.
        tick(&mut sector, PHASER_DURATION_MS / 2, &mut rng(), &mut shell);
        assert_eq!(sector.phasers.len(), 1);
        assert_eq!(sector.ship.energy, 999);

        tick(&mut sector, PHASER_DURATION_MS + 1, &mut rng(), &mut shell);
        assert!(sector.phasers.is_empty());
        assert_eq!(sector.ship.energy, 999 - PHASER_ENERGY_COST);
        assert_eq!(
            sector.enemy_at(Cell::new(0, 3)).map(|e| e.hull),
            Some(1000 - PHASER_ENERGY_COST)
        );
    }

    #[test]
    fn beam_expiry_skips_enemy_destroyed_in_flight() {
        let mut sector = combat_sector();
        let mut shell = MockShell::new();
        fire_phasers(&mut sector, 0);
        sector.enemies.clear();

        tick(&mut sector, PHASER_DURATION_MS + 1, &mut rng(), &mut shell);
        // Energy is spent either way.
        assert_eq!(sector.ship.energy, 999 - PHASER_ENERGY_COST);
    }

    #[test]
    fn travel_course_excludes_ship_cell() {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.lock = Some(Cell::new(0, 4));

        travel_to(&mut sector, 0);
        assert_eq!(
            sector.course,
            vec![
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(0, 3),
                Cell::new(0, 4)
            ]
        );
    }

    #[test]
    fn travel_clips_at_obstruction() {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.stars.push(Star::new(Cell::new(0, 3)));
        sector.lock = Some(Cell::new(0, 5));

        travel_to(&mut sector, 0);
        // Obstruction at the 3rd course cell: only the first 2 survive.
        assert_eq!(sector.course, vec![Cell::new(0, 1), Cell::new(0, 2)]);
    }

    #[test]
    fn travel_stops_short_of_occupied_destination() {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.stars.push(Star::new(Cell::new(0, 4)));
        sector.lock = Some(Cell::new(0, 4));

        travel_to(&mut sector, 0);
        assert_eq!(
            sector.course,
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]
        );
    }

    #[test]
    fn course_steps_on_schedule_and_clears_lock() {
        let mut sector = empty_sector();
        let mut shell = MockShell::new();
        sector.ship.cell = Cell::new(0, 0);
        sector.lock = Some(Cell::new(0, 2));
        travel_to(&mut sector, 0);
        assert_eq!(sector.course.len(), 2);

        tick(&mut sector, COURSE_STEP_INTERVAL_MS + 1, &mut rng(), &mut shell);
        assert_eq!(sector.ship.cell, Cell::new(0, 1));
        assert!(sector.lock.is_some());

        tick(&mut sector, 2 * (COURSE_STEP_INTERVAL_MS + 1), &mut rng(), &mut shell);
        assert_eq!(sector.ship.cell, Cell::new(0, 2));
        assert!(sector.course.is_empty());
        assert!(sector.lock.is_none(), "exhausted course clears the lock");
    }

    #[test]
    fn travel_without_lock_is_a_no_op() {
        let mut sector = empty_sector();
        travel_to(&mut sector, 0);
        assert!(sector.course.is_empty());
    }

    #[test]
    fn travel_to_adjacent_occupied_cell_is_a_no_op() {
        let mut sector = empty_sector();
        sector.ship.cell = Cell::new(0, 0);
        sector.stars.push(Star::new(Cell::new(0, 1)));
        sector.lock = Some(Cell::new(0, 1));

        travel_to(&mut sector, 0);
        assert!(sector.course.is_empty());
    }

    #[test]
    fn tick_pushes_all_readout_lines() {
        let mut sector = empty_sector();
        let mut shell = MockShell::new();
        tick(&mut sector, 0, &mut rng(), &mut shell);

        assert_eq!(shell.readout[0], "Ship Status");
        assert_eq!(shell.readout[5], "Target Status");
        assert_eq!(shell.readout[6], "No Target");
    }

    #[test]
    fn quiet_tick_requests_no_redraw() {
        let mut sector = empty_sector();
        let mut shell = MockShell::new();
        tick(&mut sector, 1_000_000, &mut rng(), &mut shell);
        assert_eq!(shell.redraw_requests, 0);
    }
}
