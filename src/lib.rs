//! WebTrek Game Core
//!
//! A grid game in the Star Trek mold: an 8x8 galaxy of quadrants, each an
//! 8x8 sector of stars, bases and enemies, played with a pointer-driven
//! targeting lock, torpedoes, phaser beams and travel courses.
//!
//! # Modules
//!
//! - [`game_state`] - Mode state machine, mode stack and the [`GameSession`] aggregate
//! - [`models`] - Domain models (Galaxy, Quadrant, Sector, Ship, entities)
//! - [`services`] - Geometry kernel, projectile engine, status readout
//! - [`io`] - The shell boundary ([`io::UiShell`]) and test mocks
//! - [`ui`] - Crossterm terminal shell
//!
//! The core is single-threaded and event-driven: the shell delivers key,
//! pointer and fixed-cadence tick events to the session, then pulls the
//! sector contents back out to draw. Nothing in the core touches a
//! drawing surface.
//!
//! # Example
//!
//! ```rust
//! use webtrek::io::test_utils::MockShell;
//! use webtrek::{GameSession, Mode};
//!
//! let mut shell = MockShell::new();
//! let mut session = GameSession::new(42);
//! session.start(&mut shell);
//! session.request_new_game(&mut shell);
//! session.on_frame_update(0, &mut shell);
//! assert_eq!(session.mode(), Mode::ShortRange);
//! ```

pub mod cli;
pub mod game_state;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use game_state::{GameSession, Key, Mode};
