//! Terminal front end
//!
//! A crossterm implementation of the shell boundary. Everything here is
//! presentation: it forwards input to the session and draws from the
//! session's queries, holding no game state of its own.

pub mod terminal;
