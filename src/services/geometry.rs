//! Grid rasterization and path clipping for targeting, torpedo flight and
//! travel courses.

use crate::models::position::Cell;
use crate::models::sector::Sector;

/// Bresenham line trace from (x0,y0) to (x1,y1), both endpoints included.
/// Steps are 8-connected; identical endpoints yield a single-cell path.
pub fn trace_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Cell> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut x = x0;
    let mut y = y0;
    let mut err = dx - dy;
    let mut path = vec![Cell::new(x, y)];

    while x != x1 || y != y1 {
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
        path.push(Cell::new(x, y));
    }
    path
}

/// Truncate a path at (and including) the first occupied cell. Paths with
/// no obstruction come back whole.
pub fn clip_path(sector: &Sector, path: &[Cell]) -> Vec<Cell> {
    let mut clipped = Vec::with_capacity(path.len());
    for &cell in path {
        clipped.push(cell);
        if sector.occupant_at(cell).is_some() {
            break;
        }
    }
    clipped
}
