//! Readout derivation: the seven status lines and the target summary the
//! shell renders beside the grid.

use std::fmt;

use crate::models::constants::READOUT_LINES;
use crate::models::entity::EntityKind;
use crate::models::sector::Sector;

/// What the current targeting lock points at, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    NoTarget,
    Star,
    /// A base that has not been fired upon.
    Friend,
    /// A base turned hostile by weapons fire.
    Foe,
    /// An enemy, with its remaining hull.
    EnemyDamage(i32),
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetStatus::NoTarget => write!(f, "No Target"),
            TargetStatus::Star => write!(f, "Star"),
            TargetStatus::Friend => write!(f, "FRIEND"),
            TargetStatus::Foe => write!(f, "FOE"),
            TargetStatus::EnemyDamage(hull) => write!(f, "DMG: {}", hull),
        }
    }
}

/// Derive the target summary from the lock and its occupant.
pub fn target_status(sector: &Sector) -> TargetStatus {
    let lock = match sector.lock {
        Some(cell) => cell,
        None => return TargetStatus::NoTarget,
    };
    match sector.occupant_at(lock) {
        Some(EntityKind::Star) => TargetStatus::Star,
        Some(EntityKind::Base) => {
            // occupant_at just reported a base here
            if sector.base_at(lock).map_or(true, |b| b.friendly) {
                TargetStatus::Friend
            } else {
                TargetStatus::Foe
            }
        }
        Some(EntityKind::Enemy) => {
            TargetStatus::EnemyDamage(sector.enemy_at(lock).map_or(0, |e| e.hull))
        }
        Some(EntityKind::Ship) | None => TargetStatus::NoTarget,
    }
}

/// The seven readout lines, pushed to the shell every tick.
pub fn readout_lines(sector: &Sector) -> [String; READOUT_LINES] {
    [
        "Ship Status".to_string(),
        format!("TORP: {}", sector.ship.torpedoes),
        format!("ENER: {}", sector.ship.energy),
        format!("SHLD: {}", sector.ship.shields),
        String::new(),
        "Target Status".to_string(),
        target_status(sector).to_string(),
    ]
}
