/// A cell within an 8x8 sector grid.
/// Values range 0-7. (0,0) is upper-left, (7,7) is lower-right.
/// X increases left-to-right, Y increases top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// A position within the 8x8 galaxy (quadrant coordinates).
/// Values range 0-7, same orientation as [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantPosition {
    pub x: i32,
    pub y: i32,
}

impl QuadrantPosition {
    pub fn new(x: i32, y: i32) -> Self {
        QuadrantPosition { x, y }
    }
}
