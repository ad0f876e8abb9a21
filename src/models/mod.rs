//! Domain models
//!
//! Pure data structures for the galaxy, quadrants, the active sector and
//! everything that lives in them. Models carry minimal logic; the tick and
//! command behavior lives in [`crate::services`].

pub mod constants;
pub mod entity;
pub mod galaxy;
pub mod position;
pub mod quadrant;
pub mod sector;
pub mod ship;
