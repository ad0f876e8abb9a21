//! Game services
//!
//! Behavior over the models: the geometry kernel, the per-tick
//! action/projectile engine, and status readout derivation.

pub mod engine;
pub mod geometry;
pub mod status;
